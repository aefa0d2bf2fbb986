//! Records exchanged with the scanner's `/api/v1` endpoints.
//!
//! Response types only name the fields this crate reads; anything else the
//! scanner sends is ignored.

use serde::{Deserialize, Serialize};

/// Criticality sent with every new target.
pub const TARGET_CRITICALITY: u8 = 10;
pub const TARGET_DESCRIPTION: &str = "Added by scanbatch";

/// A scan subject registered with the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub target_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub criticality: Option<i64>,
}

/// A scan job as listed by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scan {
    pub scan_id: String,
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
    #[serde(default)]
    pub target: Option<ScanTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTarget {
    #[serde(default)]
    pub address: String,
}

/// A scan configuration template defined on the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanningProfile {
    pub profile_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub custom: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddTargetRequest<'a> {
    pub address: &'a str,
    pub description: &'a str,
    pub criticality: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddTargetResponse {
    #[serde(default)]
    pub target_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StartScanRequest<'a> {
    pub target_id: &'a str,
    pub profile_id: &'a str,
    pub schedule: Schedule,
    pub scan_speed: &'a str,
    pub user_authorized_to_scan: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyPayload<'a>>,
}

/// "Start now": enabled, no start date, not time sensitive.
#[derive(Debug, Default, Serialize)]
pub(crate) struct Schedule {
    pub disable: bool,
    pub start_date: Option<String>,
    pub time_sensitive: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProxyPayload<'a> {
    pub address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TargetList {
    #[serde(default)]
    pub targets: Vec<Target>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScanList {
    #[serde(default)]
    pub scans: Vec<Scan>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileList {
    #[serde(default)]
    pub scanning_profiles: Vec<ScanningProfile>,
}
