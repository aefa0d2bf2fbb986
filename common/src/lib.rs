//! # scanbatch common
//!
//! Values shared by the scanner client and the command line:
//!
//! * **[`config`]**: the scanner configuration value and its on-disk store.
//! * **[`profile`]**: the built-in table of scan profiles.
//! * **[`targets`]**: newline-delimited URL lists.
//! * **[`log`]**: status macros on top of `tracing`.

pub mod config;
pub mod error;
pub mod log;
pub mod profile;
pub mod targets;

#[doc(hidden)]
pub use tracing as __tracing;
