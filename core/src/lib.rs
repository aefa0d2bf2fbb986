//! # scanbatch core
//!
//! Talks to the scanner's REST API and drives batches of targets through it.
//!
//! * **[`api`]**: the [`ScannerApi`] abstraction every caller depends on.
//! * **[`client`]**: the HTTP implementation, [`ScannerClient`].
//! * **[`batch`]**: the sequential add-and-scan worker.
//! * **[`models`]**: records exchanged with the scanner.

pub mod api;
pub mod batch;
pub mod client;
pub mod error;
pub mod models;

pub use api::ScannerApi;
pub use client::ScannerClient;
pub use error::{Error, Result};
