use anyhow::bail;
use colored::*;
use scanbatch_common::config::store::ConfigStore;
use scanbatch_common::success;
use scanbatch_core::ScannerApi;
use scanbatch_core::models::Target;

use crate::commands::{self, ProfileArgs};
use crate::terminal::colors;

pub async fn rescan(query: &str, profile: &ProfileArgs, store: &dyn ConfigStore) -> anyhow::Result<()> {
    let choice = profile.choice();
    let Some(profile_id) = choice.profile_id() else {
        bail!("{choice} does not start a scan, pick another profile");
    };

    let client = commands::connect(store)?;
    let targets: Vec<Target> = client.get_targets().await?;
    let target: &Target = resolve_target(&targets, query)?;

    client.start_scan(&target.target_id, profile_id).await?;
    success!(
        "Started {} on {} ({})",
        choice.to_string().color(colors::PROFILE_ID),
        target.address.bold(),
        target.target_id.color(colors::TARGET_ID)
    );
    Ok(())
}

/// Finds a target by exact id, otherwise by address.
pub fn resolve_target<'a>(targets: &'a [Target], query: &str) -> anyhow::Result<&'a Target> {
    let query = query.trim();
    if let Some(target) = targets.iter().find(|t| t.target_id == query) {
        return Ok(target);
    }

    let wanted = normalize_address(query);
    let matches: Vec<&Target> = targets
        .iter()
        .filter(|t| normalize_address(&t.address) == wanted)
        .collect();

    match matches.as_slice() {
        [] => bail!("no target with id or address '{query}'"),
        [target] => Ok(*target),
        many => bail!(
            "'{query}' matches {} targets, use one of the ids: {}",
            many.len(),
            many.iter()
                .map(|t| t.target_id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn normalize_address(address: &str) -> String {
    address.trim().trim_end_matches('/').to_ascii_lowercase()
}
