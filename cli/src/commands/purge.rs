use anyhow::{Context, bail};
use colored::*;
use console::Term;
use scanbatch_common::config::store::ConfigStore;
use scanbatch_common::{info, success};
use scanbatch_core::ScannerApi;

use crate::commands;

pub async fn purge(scans_only: bool, yes: bool, store: &dyn ConfigStore) -> anyhow::Result<()> {
    let client = commands::connect(store)?;
    let what = if scans_only { "every scan" } else { "every scan and target" };

    if !yes && !confirm(&format!("Delete {} on {}?", what, client.config().base_url()))? {
        info!("Nothing was deleted");
        return Ok(());
    }

    // Scans go first so no target is removed from under a running scan.
    let scans = client.delete_all_scans().await.context("deleting scans")?;
    success!("Deleted {} scans", scans.to_string().bold());

    if !scans_only {
        let targets = client.delete_all_targets().await.context("deleting targets")?;
        success!("Deleted {} targets", targets.to_string().bold());
    }
    Ok(())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    let term = Term::stderr();
    if !term.is_term() {
        bail!("refusing to purge without a terminal to confirm on, pass --yes");
    }
    term.write_str(&format!("{} {} ", question.yellow().bold(), "[y/N]".bright_black()))?;
    let answer = term.read_line()?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
