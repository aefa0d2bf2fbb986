//! The central **abstraction** over the remote scanner.
//!
//! High-level code (the batch worker, the command line) depends on
//! [`ScannerApi`] rather than on [`ScannerClient`](crate::ScannerClient)
//! directly, so a fake scanner can stand in for the HTTP one.
//!
//! Every method is one round trip, except the bulk deletions, which list first
//! and then delete one record per request. Nothing is cached between calls.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::models::{Scan, ScanningProfile, Target};

#[async_trait]
pub trait ScannerApi: Send + Sync {
    /// Registers `url` and returns the scanner-assigned target id.
    async fn add_target(&self, url: &str) -> Result<String>;

    /// Starts a scan immediately. `profile_id` is passed through unchecked.
    async fn start_scan(&self, target_id: &str, profile_id: &str) -> Result<()>;

    /// Lists targets. Zero targets is an empty list, not an error.
    async fn get_targets(&self) -> Result<Vec<Target>>;

    async fn get_scans(&self) -> Result<Vec<Scan>>;

    async fn get_scanning_profiles(&self) -> Result<Vec<ScanningProfile>>;

    async fn delete_target(&self, target_id: &str) -> Result<()>;

    async fn delete_scan(&self, scan_id: &str) -> Result<()>;

    /// Deletes every target, one request each, stopping at the first failure.
    ///
    /// Targets deleted before the failure stay deleted. Returns how many were
    /// removed.
    async fn delete_all_targets(&self) -> Result<usize> {
        let targets = self.get_targets().await?;
        for (deleted, target) in targets.iter().enumerate() {
            if let Err(e) = self.delete_target(&target.target_id).await {
                debug!(deleted, target_id = %target.target_id, "stopping target deletion");
                return Err(e);
            }
        }
        Ok(targets.len())
    }

    /// Deletes every scan, one request each, stopping at the first failure.
    async fn delete_all_scans(&self) -> Result<usize> {
        let scans = self.get_scans().await?;
        for (deleted, scan) in scans.iter().enumerate() {
            if let Err(e) = self.delete_scan(&scan.scan_id).await {
                debug!(deleted, scan_id = %scan.scan_id, "stopping scan deletion");
                return Err(e);
            }
        }
        Ok(scans.len())
    }
}
