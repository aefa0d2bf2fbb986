//! # Scan Profiles
//!
//! The built-in scan types and the scanner profile each one maps to.
//!
//! The table is fixed at compile time. Conversion from a human-supplied label
//! happens here, at the boundary; the client accepts any profile id and lets
//! the scanner decide.

use std::fmt;
use std::str::FromStr;

/// A built-in scan type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScanProfile {
    #[default]
    FullScan,
    HighRisk,
    SqlInjection,
    Log4j,
    WeakPasswords,
    Xss,
    CrawlOnly,
    BugBounty,
    CommonCves,
    Spring4Shell,
    /// Register targets without starting a scan.
    AddOnly,
}

impl ScanProfile {
    pub const ALL: [ScanProfile; 11] = [
        Self::FullScan,
        Self::HighRisk,
        Self::SqlInjection,
        Self::Log4j,
        Self::WeakPasswords,
        Self::Xss,
        Self::CrawlOnly,
        Self::BugBounty,
        Self::CommonCves,
        Self::Spring4Shell,
        Self::AddOnly,
    ];

    /// Short name used on the command line.
    pub fn alias(&self) -> &'static str {
        match self {
            Self::FullScan => "full",
            Self::HighRisk => "high-risk",
            Self::SqlInjection => "sqli",
            Self::Log4j => "log4j",
            Self::WeakPasswords => "weak-passwords",
            Self::Xss => "xss",
            Self::CrawlOnly => "crawl-only",
            Self::BugBounty => "bug-bounty",
            Self::CommonCves => "common-cves",
            Self::Spring4Shell => "spring4shell",
            Self::AddOnly => "add-only",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullScan => "Full Scan",
            Self::HighRisk => "High Risk Vulnerabilities",
            Self::SqlInjection => "SQL Injection Vulnerabilities",
            Self::Log4j => "Apache Log4j",
            Self::WeakPasswords => "Weak Passwords",
            Self::Xss => "Cross-site Scripting Vulnerabilities",
            Self::CrawlOnly => "Crawl Only",
            Self::BugBounty => "Bug Bounty",
            Self::CommonCves => "Common CVEs",
            Self::Spring4Shell => "Spring4Shell",
            Self::AddOnly => "Add Target Only",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FullScan => "every check the scanner has",
            Self::HighRisk => "high-severity issues such as command injection and file inclusion",
            Self::SqlInjection => "SQL injection only",
            Self::Log4j => "Log4Shell and related Log4j issues",
            Self::WeakPasswords => "common weak credentials",
            Self::Xss => "cross-site scripting only",
            Self::CrawlOnly => "crawl the site without testing it, useful alongside a passive proxy",
            Self::BugBounty => "issues most often reported in bug bounty programs",
            Self::CommonCves => "well-known CVEs",
            Self::Spring4Shell => "Spring4Shell (CVE-2022-22965)",
            Self::AddOnly => "register the target and start nothing",
        }
    }

    /// The scanner's profile id, or `None` when no scan should be started.
    pub fn profile_id(&self) -> Option<&'static str> {
        match self {
            Self::FullScan => Some("11111111-1111-1111-1111-111111111111"),
            Self::HighRisk => Some("11111111-1111-1111-1111-111111111112"),
            Self::SqlInjection => Some("11111111-1111-1111-1111-111111111113"),
            Self::Log4j => Some("11111111-1111-1111-1111-111111111114"),
            Self::WeakPasswords => Some("11111111-1111-1111-1111-111111111115"),
            Self::Xss => Some("11111111-1111-1111-1111-111111111116"),
            Self::CrawlOnly => Some("11111111-1111-1111-1111-111111111117"),
            Self::BugBounty => Some("11111111-1111-1111-1111-111111111118"),
            Self::CommonCves => Some("11111111-1111-1111-1111-111111111121"),
            Self::Spring4Shell => Some("11111111-1111-1111-1111-111111111122"),
            Self::AddOnly => None,
        }
    }
}

impl fmt::Display for ScanProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScanProfile {
    type Err = String;

    /// Accepts the alias or the label, ignoring case, `_` and surrounding space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|p| normalize(p.alias()) == wanted || normalize(p.label()) == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|p| p.alias()).collect();
                format!("unknown scan type '{}' (expected one of: {})", s.trim(), known.join(", "))
            })
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['_', ' '], "-")
}

/// What a batch should do after each target is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileChoice {
    Builtin(ScanProfile),
    /// A profile id that is not in the table, e.g. a custom profile.
    Custom(String),
}

impl ProfileChoice {
    pub fn profile_id(&self) -> Option<&str> {
        match self {
            Self::Builtin(profile) => profile.profile_id(),
            Self::Custom(id) => Some(id.as_str()),
        }
    }
}

impl Default for ProfileChoice {
    fn default() -> Self {
        Self::Builtin(ScanProfile::default())
    }
}

impl fmt::Display for ProfileChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(profile) => write!(f, "{profile}"),
            Self::Custom(id) => write!(f, "custom profile {id}"),
        }
    }
}
