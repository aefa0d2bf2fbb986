use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub const CANCEL_TIP: &str = "Press Ctrl-C to stop after the current target";

fn batch_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} [{pos}/{len}] {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

/// A span rendered as a progress bar for the lifetime of the batch.
pub fn batch_span(total: usize) -> Span {
    let span = info_span!("submit", indicatif.pb_show = true);
    span.pb_set_style(&batch_style());
    span.pb_set_length(total as u64);
    span.pb_set_message(&format!("{}", CANCEL_TIP.italic().white()));
    span
}

pub fn report_processing(span: &Span, url: &str) {
    span.pb_set_message(&format!("Submitting {}", url.bold()));
}

pub fn report_done(span: &Span) {
    span.pb_inc(1);
}
