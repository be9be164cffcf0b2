//! CLI command handlers for `gpaplanner`.
//!
//! Each command is implemented in its own submodule.

pub mod analyze;
pub mod catalog;
pub mod config;
pub mod project;
