//! Shared module for common functionality across the library and CLI

pub mod logger;

/// Returns the current version of the `gpa-planner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
