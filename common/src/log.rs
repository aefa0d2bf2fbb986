//! Status macros used across the workspace.
//!
//! They forward to `tracing` with a dedicated target per status so the
//! terminal formatter can pick a symbol for each line.

pub const SUCCESS_TARGET: &str = "scanbatch::success";
pub const PRINT_TARGET: &str = "scanbatch::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "scanbatch::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!($($arg)*)
    };
}
