//! # URL Lists
//!
//! Batch input arrives as newline-delimited text, typed or read from a file.
//! Each non-blank line is one scan target. URLs are not validated here; the
//! scanner rejects what it cannot use.

use std::fs;
use std::path::Path;

use anyhow::Context;

/// Splits text into target URLs.
///
/// Lines are trimmed; blank lines and `#` comments are dropped. Order and
/// duplicates are kept.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Reads a newline-delimited URL file.
pub fn read_url_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let bytes = fs::read(path).with_context(|| format!("reading URL list {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(parse_url_list(text.trim_start_matches('\u{feff}')))
}
