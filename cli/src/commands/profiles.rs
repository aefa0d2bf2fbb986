use colored::*;
use scanbatch_common::config::store::ConfigStore;
use scanbatch_common::profile::ScanProfile;
use scanbatch_common::{success, warn};
use scanbatch_core::ScannerApi;
use scanbatch_core::models::ScanningProfile;

use crate::commands;
use crate::mprint;
use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print};

pub async fn profiles(remote: bool, store: &dyn ConfigStore, q_level: u8) -> anyhow::Result<()> {
    print::header("scan profiles", q_level);
    for (idx, profile) in ScanProfile::ALL.iter().enumerate() {
        print_profile(idx, profile, q_level);
    }

    if !remote {
        return Ok(());
    }

    let client = commands::connect(store)?;
    let available: Vec<ScanningProfile> = client.get_scanning_profiles().await?;

    mprint!();
    print::header("profiles on the scanner", q_level);
    for (idx, profile) in available.iter().enumerate() {
        let known_as = ScanProfile::ALL
            .iter()
            .find(|p| p.profile_id() == Some(profile.profile_id.as_str()))
            .map(|p| p.alias());
        match q_level {
            0 => {
                print::tree_head(idx, &profile.name);
                print::as_tree_one_level(format::remote_profile_details(profile, known_as));
            }
            _ => print::print(&format!(
                "{} {}",
                profile.profile_id.color(colors::PROFILE_ID),
                profile.name
            )),
        }
    }

    let missing: Vec<ScanProfile> = missing_profiles(&available);
    if missing.is_empty() {
        success!("Every built-in profile exists on the scanner");
    }
    for profile in missing {
        warn!(
            "{} ({}) is not defined on the scanner",
            profile.alias().bold(),
            profile.profile_id().unwrap_or_default()
        );
    }
    Ok(())
}

fn print_profile(idx: usize, profile: &ScanProfile, q_level: u8) {
    if q_level > 0 {
        print::print(&format!("{:<14} {}", profile.alias(), profile.label()));
        return;
    }

    print::tree_head(idx, profile.label());
    let id: ColoredString = match profile.profile_id() {
        Some(id) => id.color(colors::PROFILE_ID),
        None => "none, targets are only added".color(colors::MUTED),
    };
    let details: Vec<Detail> = vec![
        ("Alias".to_string(), profile.alias().color(colors::ACCENT)),
        ("ID".to_string(), id),
        ("About".to_string(), profile.description().normal()),
    ];
    print::as_tree_one_level(details);
}

/// Built-in profiles whose id the scanner does not know.
pub fn missing_profiles(available: &[ScanningProfile]) -> Vec<ScanProfile> {
    ScanProfile::ALL
        .into_iter()
        .filter(|profile| match profile.profile_id() {
            Some(id) => !available.iter().any(|p| p.profile_id == id),
            None => false,
        })
        .collect()
}
