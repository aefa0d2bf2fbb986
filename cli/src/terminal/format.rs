use colored::*;
use scanbatch_common::config::ScannerConfig;
use scanbatch_core::models::{Scan, ScanningProfile, Target};

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

const KEY_VISIBLE: usize = 4;

/// Hides all but the last few characters of an API key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.trim().chars().collect();
    if chars.is_empty() {
        return String::from("(not set)");
    }
    if chars.len() <= KEY_VISIBLE * 2 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - KEY_VISIBLE..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - KEY_VISIBLE), tail)
}

fn or_unset(value: Option<&str>) -> ColoredString {
    match value {
        Some(v) if !v.is_empty() => v.normal(),
        _ => "-".color(colors::MUTED),
    }
}

pub fn target_details(target: &Target, scans: &[&Scan]) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("ID".to_string(), target.target_id.color(colors::TARGET_ID)),
        ("Note".to_string(), or_unset(target.description.as_deref())),
    ];

    if let Some(criticality) = target.criticality {
        details.push(("Crit".to_string(), criticality.to_string().normal()));
    }

    let profiles: Vec<&str> = scans
        .iter()
        .filter_map(|s| s.profile_name.as_deref().or(s.profile_id.as_deref()))
        .collect();
    let scans_value: ColoredString = if profiles.is_empty() {
        "none".color(colors::MUTED)
    } else {
        profiles.join(", ").color(colors::PROFILE_ID)
    };
    details.push(("Scans".to_string(), scans_value));

    details
}

pub fn remote_profile_details(profile: &ScanningProfile, known_as: Option<&str>) -> Vec<Detail> {
    let kind: ColoredString = if profile.custom {
        "custom".color(colors::ACCENT)
    } else {
        "built-in".normal()
    };
    vec![
        ("ID".to_string(), profile.profile_id.color(colors::PROFILE_ID)),
        ("Kind".to_string(), kind),
        ("Alias".to_string(), or_unset(known_as)),
    ]
}

pub fn config_rows(config: &ScannerConfig) -> Vec<(&'static str, ColoredString)> {
    let proxy: ColoredString = match config.scan_proxy() {
        Some(proxy) => match proxy.port {
            Some(port) => format!("{}:{}", proxy.address, port).color(colors::ACCENT),
            None => proxy.address.color(colors::ACCENT),
        },
        None => "disabled".color(colors::MUTED),
    };

    vec![
        ("API URL", or_unset(Some(config.api_url.as_str()))),
        ("API key", mask_key(&config.api_key).normal()),
        ("Scan proxy", proxy),
        ("Scan speed", config.scan_speed.as_str().normal()),
        ("Report type", config.report_type.as_str().normal()),
        ("Threads", config.thread_num.to_string().normal()),
        ("Insecure TLS", config.insecure_tls.to_string().normal()),
        ("Client proxy", or_unset(config.client_proxy.as_deref())),
    ]
}
