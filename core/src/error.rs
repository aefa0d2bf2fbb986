//! Error types for scanbatch-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a single scanner operation can fail with.
///
/// Every error goes back to the caller; nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// DNS, connect, TLS or I/O failure below HTTP.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The scanner answered with a status the operation does not accept.
    #[error("scanner returned HTTP {status}{}", body_suffix(.body))]
    Status { status: u16, body: String },

    #[error("could not decode scanner response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("scanner response has no `{0}` field")]
    MissingField(&'static str),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status for protocol errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body, when the scanner sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } if !body.is_empty() => {
                Some(body.as_str())
            }
            _ => None,
        }
    }
}

const MAX_BODY_IN_MESSAGE: usize = 512;

fn body_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    match body.char_indices().nth(MAX_BODY_IN_MESSAGE) {
        Some((cut, _)) => format!(" (response: {}…)", &body[..cut]),
        None => format!(" (response: {body})"),
    }
}
