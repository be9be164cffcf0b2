//! Grade reconciliation and GPA projection for HCMUT transcript exports
//!
//! The engine in [`core`] turns a transcript JSON export into a reconciled
//! course list, GPA and credit totals, and target-GPA guidance. [`config`]
//! holds the CLI configuration layer; [`shared`] re-exports the logger.

pub mod config;
pub mod core;
pub mod shared;

pub use crate::core::{
    aggregate, analysis, catalog, error, grades, models, notify, projector, reconciler, reducer,
    report, transcript,
};
pub use shared::get_version;
