use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use colored::*;
use scanbatch_common::config::store::ConfigStore;
use scanbatch_common::targets::{parse_url_list, read_url_file};
use scanbatch_common::{error, success, warn};
use scanbatch_core::batch::{BatchEvent, BatchRunner, BatchSummary, Stage};
use tokio::sync::mpsc;
use tracing::{Instrument, Span};

use crate::commands::{self, SubmitArgs};
use crate::mprint;
use crate::terminal::interrupt::CancelHandle;
use crate::terminal::{colors, print, spinner};

const STDIN_MARKER: &str = "-";

pub async fn submit(args: SubmitArgs, store: &dyn ConfigStore, q_level: u8) -> anyhow::Result<()> {
    let urls: Vec<String> = collect_urls(&args.urls, &args.files)?;
    if urls.is_empty() {
        bail!("no URLs to submit, pass them as arguments, with --file or on stdin");
    }

    let client = commands::connect(store)?;
    let choice = args.profile.choice();

    print::header("submitting targets", q_level);
    if q_level == 0 {
        print::aligned_lines(&[
            ("Scanner", client.config().base_url().color(colors::ACCENT)),
            ("Profile", choice.to_string().color(colors::PROFILE_ID)),
            ("Targets", urls.len().to_string().bold()),
        ]);
        mprint!();
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let runner = BatchRunner::new(client, choice.profile_id().map(String::from)).with_events(tx);
    let cancel = CancelHandle::install(runner.cancel_flag());

    let start_time: Instant = Instant::now();
    let span: Span = spinner::batch_span(urls.len());
    let handle = runner.spawn(urls);

    report_events(rx, span.clone()).instrument(span).await;
    let summary: BatchSummary = handle.await.context("batch worker stopped unexpectedly")?;
    drop(cancel);

    print_summary(&summary, start_time.elapsed(), q_level);

    if summary.submitted == 0 && summary.failed > 0 {
        bail!("none of the {} targets could be submitted", summary.total);
    }
    Ok(())
}

/// Gathers URLs from the arguments, the given files and stdin, in that order.
pub fn collect_urls(args: &[String], files: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    let mut urls: Vec<String> = Vec::new();
    let mut read_stdin = false;

    for arg in args {
        if arg.trim() == STDIN_MARKER {
            read_stdin = true;
        } else {
            urls.extend(parse_url_list(arg));
        }
    }

    for file in files {
        urls.extend(read_url_file(file)?);
    }

    if read_stdin {
        let text = io::read_to_string(io::stdin()).context("reading URLs from stdin")?;
        urls.extend(parse_url_list(&text));
    }

    Ok(urls)
}

async fn report_events(mut rx: mpsc::UnboundedReceiver<BatchEvent>, span: Span) {
    while let Some(event) = rx.recv().await {
        match event {
            BatchEvent::Processing { url, .. } => spinner::report_processing(&span, &url),
            BatchEvent::Submitted {
                url,
                target_id,
                scan_started,
                ..
            } => {
                let action = if scan_started { "scan started" } else { "added" };
                success!("{} {} ({})", url.bold(), action, target_id.color(colors::TARGET_ID));
                spinner::report_done(&span);
            }
            BatchEvent::Failed {
                url,
                stage,
                target_id,
                error,
                ..
            } => {
                error!("{} failed while {}: {}", url.bold(), stage_name(stage), error);
                if let Some(id) = target_id {
                    warn!("Target {} was added without a scan", id.color(colors::TARGET_ID));
                }
                spinner::report_done(&span);
            }
            BatchEvent::Cancelled { processed, total } => {
                warn!("Cancelled after {processed} of {total} targets");
            }
            BatchEvent::Started { .. } | BatchEvent::Finished(_) => {}
        }
    }
}

fn stage_name(stage: Stage) -> &'static str {
    match stage {
        Stage::AddTarget => "adding the target",
        Stage::StartScan => "starting the scan",
    }
}

fn print_summary(summary: &BatchSummary, total_time: Duration, q_level: u8) {
    let submitted: ColoredString = format!("{} submitted", summary.submitted).bold().green();
    let failed: ColoredString = match summary.failed {
        0 => "0 failed".normal(),
        n => format!("{n} failed").bold().red(),
    };
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let mut output: String = format!("Batch complete: {submitted}, {failed} in {total_time}");
    if summary.cancelled {
        output.push_str(&format!(", {} skipped", summary.skipped()));
    }

    match q_level {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => success!("{}", output),
    }
}
