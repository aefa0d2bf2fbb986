//! # Scanner Configuration
//!
//! The single value every other part of the workspace is built from. It is
//! loaded once by the caller (see [`store`]) and handed to the client by value;
//! nothing downstream mutates it.
//!
//! The on-disk field names (`ip`, `port`, `proxy_enabled`, ...) match the files
//! written by the earlier desktop front-end, so existing configurations keep
//! loading.

use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

pub mod store;

pub const DEFAULT_THREAD_NUM: u32 = 10;

/// Placeholder scheme for proxy addresses given without one. Not a special
/// scheme, so an explicit port is never dropped as a default.
const BARE_PROXY_SCHEME: &str = "proxy";

/// Throttling hint forwarded to the scanner with every new scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanSpeed {
    Sequential,
    Slow,
    #[default]
    Moderate,
    Fast,
}

impl ScanSpeed {
    pub const ALL: [ScanSpeed; 4] = [Self::Sequential, Self::Slow, Self::Moderate, Self::Fast];

    /// The string the scanner API expects in `scan_speed`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Slow => "slow",
            Self::Moderate => "moderate",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for ScanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid scan speed '{s}' (expected sequential, slow, moderate or fast)"))
    }
}

/// Report format preference. Stored for the user, never sent by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportType {
    #[default]
    Html,
    Pdf,
    Xml,
}

impl ReportType {
    pub const ALL: [ReportType; 3] = [Self::Html, Self::Pdf, Self::Xml];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Pdf => "PDF",
            Self::Xml => "XML",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|report| report.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid report type '{s}' (expected HTML, PDF or XML)"))
    }
}

/// Proxy the *scanner appliance* should route its scan traffic through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanProxy {
    pub address: String,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Base URL of the scanner, e.g. `https://scanner.local:3443`.
    #[serde(default)]
    pub api_url: String,

    /// Sent verbatim in the `X-Auth` header.
    #[serde(default)]
    pub api_key: String,

    #[serde(default, deserialize_with = "legacy::bool_or_string")]
    pub proxy_enabled: bool,

    #[serde(default, rename = "ip", skip_serializing_if = "Option::is_none")]
    pub proxy_ip: Option<String>,

    #[serde(
        default,
        rename = "port",
        deserialize_with = "legacy::port_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub proxy_port: Option<u16>,

    /// Kept for the user; batches are always submitted one target at a time.
    #[serde(default = "default_thread_num")]
    pub thread_num: u32,

    #[serde(default)]
    pub scan_speed: ScanSpeed,

    #[serde(default)]
    pub report_type: ReportType,

    /// Skip certificate validation. Appliances ship with self-signed certs.
    #[serde(default = "default_insecure_tls")]
    pub insecure_tls: bool,

    /// HTTP proxy for the client's own requests to the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_proxy: Option<String>,
}

fn default_thread_num() -> u32 {
    DEFAULT_THREAD_NUM
}

fn default_insecure_tls() -> bool {
    true
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            proxy_enabled: false,
            proxy_ip: None,
            proxy_port: None,
            thread_num: DEFAULT_THREAD_NUM,
            scan_speed: ScanSpeed::default(),
            report_type: ReportType::default(),
            insecure_tls: default_insecure_tls(),
            client_proxy: None,
        }
    }
}

impl ScannerConfig {
    /// The API base without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }

    /// Returns the scan proxy only when it is switched on and has an address.
    pub fn scan_proxy(&self) -> Option<ScanProxy> {
        if !self.proxy_enabled {
            return None;
        }
        let address = self.proxy_ip.as_deref().map(str::trim).filter(|a| !a.is_empty())?;
        Some(ScanProxy {
            address: address.to_string(),
            port: self.proxy_port,
        })
    }

    /// Checks the fields a client cannot work without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url();
        if url.is_empty() {
            return Err(ConfigError::Invalid("api_url is not set".into()));
        }
        let parsed = Url::parse(url)
            .map_err(|e| ConfigError::Invalid(format!("api_url '{url}' is not a valid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api_url '{url}' must use http or https"
            )));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::Invalid(format!("api_url '{url}' has no host")));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("api_key is not set".into()));
        }
        Ok(())
    }

    /// Sets the scan proxy from `ADDR:PORT`, `ADDR` or `http://ADDR:PORT`.
    pub fn set_scan_proxy(&mut self, input: &str) -> Result<(), ConfigError> {
        let (address, port) = split_proxy_address(input)?;
        self.proxy_enabled = true;
        self.proxy_ip = Some(address);
        self.proxy_port = port;
        Ok(())
    }

    pub fn clear_scan_proxy(&mut self) {
        self.proxy_enabled = false;
        self.proxy_ip = None;
        self.proxy_port = None;
    }
}

/// Splits a proxy string into host and optional port.
///
/// With a scheme the scheme's default port applies; without one the port is
/// only what was written.
pub fn split_proxy_address(input: &str) -> Result<(String, Option<u16>), ConfigError> {
    let input = input.trim();
    let invalid = |detail: &dyn fmt::Display| {
        ConfigError::Invalid(format!("invalid proxy address '{input}': {detail}"))
    };

    if input.is_empty() {
        return Err(invalid(&"empty"));
    }

    // Bare IPv6 literals carry no port.
    if input.parse::<Ipv6Addr>().is_ok() {
        return Ok((input.to_string(), None));
    }

    let (parsed, port) = if input.contains("://") {
        let parsed = Url::parse(input).map_err(|e| invalid(&e))?;
        let port = parsed.port_or_known_default();
        (parsed, port)
    } else {
        let parsed = Url::parse(&format!("{BARE_PROXY_SCHEME}://{input}")).map_err(|e| invalid(&e))?;
        let port = parsed.port();
        (parsed, port)
    };

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok((host.to_string(), port)),
        _ => Err(invalid(&"no host")),
    }
}

mod legacy {
    use serde::{Deserialize, Deserializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortOrString {
        Port(u16),
        Str(String),
    }

    /// Older files store the switch as `"True"` / `"False"`.
    pub fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match BoolOrString::deserialize(deserializer)? {
            BoolOrString::Bool(value) => Ok(value),
            BoolOrString::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(true),
                "false" | "no" | "0" | "off" | "" => Ok(false),
                other => Err(de::Error::custom(format!("invalid boolean '{other}'"))),
            },
        }
    }

    /// Older files store the port as a string; an empty string means unset.
    pub fn port_or_string<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<PortOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(PortOrString::Port(port)) => Ok(Some(port)),
            Some(PortOrString::Str(s)) if s.trim().is_empty() => Ok(None),
            Some(PortOrString::Str(s)) => s
                .trim()
                .parse::<u16>()
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid port '{s}': {e}"))),
        }
    }
}
