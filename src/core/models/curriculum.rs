//! Curriculum catalog models

use serde::{Deserialize, Serialize};

/// One catalog row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumEntry {
    /// Course code (e.g., "CO2003")
    #[serde(rename = "code")]
    pub course_code: String,

    /// Course name
    #[serde(rename = "name")]
    pub course_name: String,

    /// Credit count
    #[serde(rename = "credits")]
    pub credit_count: u32,

    /// Grade used when the transcript has no record for this course
    #[serde(rename = "fallback", default = "default_fallback")]
    pub fallback_grade: String,

    /// Advisory expected grade, shown to the user only
    #[serde(rename = "predicted", default, skip_serializing_if = "Option::is_none")]
    pub predicted_grade: Option<String>,
}

fn default_fallback() -> String {
    crate::core::grades::FAIL.to_string()
}

impl CurriculumEntry {
    /// Create a catalog row with no predicted grade
    #[must_use]
    pub fn new(course_code: &str, course_name: &str, credit_count: u32, fallback_grade: &str) -> Self {
        Self {
            course_code: course_code.to_string(),
            course_name: course_name.to_string(),
            credit_count,
            fallback_grade: fallback_grade.to_string(),
            predicted_grade: None,
        }
    }

    /// Attach an advisory predicted grade
    #[must_use]
    pub fn with_prediction(mut self, grade: &str) -> Self {
        self.predicted_grade = Some(grade.to_string());
        self
    }
}

/// Program-level credit targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramInfo {
    /// Program name
    pub name: String,
    /// Credits the required courses add up to
    pub required_credits: u32,
    /// Credits expected from the elective pool
    pub elective_credits: u32,
    /// Credits needed to graduate
    pub total_credits: u32,
}

impl Default for ProgramInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            required_credits: 104,
            elective_credits: 24,
            total_credits: 128,
        }
    }
}
