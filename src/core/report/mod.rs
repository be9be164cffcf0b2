//! Report generation for grade analyses
//!
//! Renders an [`Analysis`] with its derived [`Summary`] as Markdown or JSON.

pub mod json;
pub mod markdown;

use crate::core::analysis::{Analysis, Summary};
use crate::core::models::ProgramInfo;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Markdown tables
    #[default]
    Markdown,
    /// Pretty-printed JSON
    Json,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }

    /// Generator for this format
    #[must_use]
    pub fn generator(&self) -> Box<dyn ReportGenerator> {
        match self {
            Self::Markdown => Box::new(MarkdownReporter::new()),
            Self::Json => Box::new(JsonReporter::new()),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Transcript file or other label for the input
    pub source: &'a str,
    /// Program credit targets
    pub program: &'a ProgramInfo,
    /// Reconciled analysis
    pub analysis: &'a Analysis,
    /// Summary computed from `analysis`
    pub summary: &'a Summary,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        source: &'a str,
        program: &'a ProgramInfo,
        analysis: &'a Analysis,
        summary: &'a Summary,
    ) -> Self {
        Self {
            source,
            program,
            analysis,
            summary,
        }
    }

    /// Number of reconciled courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.analysis.courses.len()
    }

    /// Number of courses with a manual grade override
    #[must_use]
    pub fn override_count(&self) -> usize {
        self.analysis.courses.overridden().count()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        std::fs::write(output_path, report_content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
