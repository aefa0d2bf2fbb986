use colored::*;
use scanbatch_common::config::store::ConfigStore;
use scanbatch_common::success;
use scanbatch_core::ScannerApi;
use scanbatch_core::models::{Scan, Target};

use crate::commands;
use crate::mprint;
use crate::terminal::{colors, format, print};

pub async fn targets(store: &dyn ConfigStore, q_level: u8) -> anyhow::Result<()> {
    let client = commands::connect(store)?;
    let targets: Vec<Target> = client.get_targets().await?;
    let scans: Vec<Scan> = client.get_scans().await?;

    if targets.is_empty() {
        print::header("no targets", q_level);
        print::print_status("The scanner has no targets registered");
        return Ok(());
    }

    print::header("targets", q_level);
    for (idx, target) in targets.iter().enumerate() {
        match q_level {
            0 => {
                let own_scans: Vec<&Scan> = scans_for(target, &scans);
                print::tree_head(idx, &target.address);
                print::as_tree_one_level(format::target_details(target, &own_scans));
                if idx + 1 != targets.len() {
                    mprint!();
                }
            }
            _ => print::print(&format!(
                "{} {}",
                target.target_id.color(colors::TARGET_ID),
                target.address
            )),
        }
    }

    if q_level == 0 {
        print::fat_separator();
    }
    success!(
        "{} targets, {} scans",
        targets.len().to_string().bold(),
        scans.len().to_string().bold()
    );
    Ok(())
}

/// Scans that belong to `target`, by id or, failing that, by address.
fn scans_for<'a>(target: &Target, scans: &'a [Scan]) -> Vec<&'a Scan> {
    scans
        .iter()
        .filter(|scan| match &scan.target_id {
            Some(id) => *id == target.target_id,
            None => scan
                .target
                .as_ref()
                .is_some_and(|t| t.address == target.address),
        })
        .collect()
}
