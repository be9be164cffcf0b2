//! Grade reconciliation and GPA projection engine

pub mod aggregate;
pub mod analysis;
pub mod catalog;
pub mod error;
pub mod grades;
pub mod models;
pub mod notify;
pub mod projector;
pub mod reconciler;
pub mod reducer;
pub mod report;
pub mod transcript;

pub use analysis::{analyze, analyze_json, Analysis, AnalysisOptions, Summary};
pub use catalog::Catalog;
pub use transcript::Transcript;

