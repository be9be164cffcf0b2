//! Curriculum catalog loading
//!
//! The catalog is data, not logic: an ordered list of required courses and an
//! ordered list of advanced electives, read from TOML. A Computer Science
//! catalog is compiled in; a user catalog file can replace it.

use crate::core::error::CatalogError;
use crate::core::models::{CurriculumEntry, ProgramInfo};
use planner_logger::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Compiled-in program catalog
const DEFAULT_CATALOG: &str = include_str!("../../assets/DefaultCurriculum.toml");

/// Required and advanced-elective course lists for one program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Program-level credit targets
    #[serde(default)]
    pub program: ProgramInfo,

    /// Mandatory courses, in display order
    #[serde(default, rename = "required")]
    pub required_courses: Vec<CurriculumEntry>,

    /// Recognized elective courses, in display order
    #[serde(default, rename = "elective")]
    pub advanced_elective_courses: Vec<CurriculumEntry>,
}

impl Catalog {
    /// Build a catalog from explicit lists (program targets use defaults)
    #[must_use]
    pub fn new(required: Vec<CurriculumEntry>, electives: Vec<CurriculumEntry>) -> Self {
        Self {
            program: ProgramInfo::default(),
            required_courses: required,
            advanced_elective_courses: electives,
        }
    }

    /// Parse a catalog from TOML.
    ///
    /// Overlapping or duplicated course codes are logged as warnings and kept;
    /// the reconciler consumes each transcript record at most once.
    ///
    /// # Errors
    /// Returns an error if the TOML does not match the catalog schema or lists
    /// no required courses.
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(toml_str)?;
        if catalog.required_courses.is_empty() {
            return Err(CatalogError::Empty);
        }
        for problem in catalog.overlaps() {
            warn!("Catalog: {problem}");
        }
        debug!(
            "Catalog '{}' loaded: {} required, {} electives",
            catalog.program.name,
            catalog.required_courses.len(),
            catalog.advanced_elective_courses.len()
        );
        Ok(catalog)
    }

    /// Load a catalog file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// The compiled-in Computer Science catalog
    ///
    /// # Panics
    /// Panics if the embedded catalog is invalid. It is compiled into the
    /// binary and covered by tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml(DEFAULT_CATALOG).expect("Failed to parse compiled-in curriculum catalog")
    }

    /// Load `path` when given and non-empty, otherwise the builtin catalog.
    ///
    /// # Errors
    /// Returns an error if a catalog file was named but could not be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(p) if !p.as_os_str().is_empty() => Self::from_file(p),
            _ => Ok(Self::builtin()),
        }
    }

    /// Find a catalog row by course code (required courses first)
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&CurriculumEntry> {
        self.required_courses
            .iter()
            .chain(&self.advanced_elective_courses)
            .find(|e| e.course_code == code)
    }

    /// Sum of credits over the required list
    #[must_use]
    pub fn required_credit_total(&self) -> u32 {
        self.required_courses.iter().map(|e| e.credit_count).sum()
    }

    /// Describe codes that appear more than once across both lists.
    ///
    /// A code in both lists is consumed by the required pass, which leaves the
    /// elective row as a placeholder that can never be satisfied.
    #[must_use]
    pub fn overlaps(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen_required = HashSet::new();
        for entry in &self.required_courses {
            if !seen_required.insert(entry.course_code.as_str()) {
                problems.push(format!("{} is listed twice as required", entry.course_code));
            }
        }

        let mut seen_elective = HashSet::new();
        for entry in &self.advanced_elective_courses {
            let code = entry.course_code.as_str();
            if seen_required.contains(code) {
                problems.push(format!(
                    "{code} is both required and elective; the elective row can never be satisfied"
                ));
            } else if !seen_elective.insert(code) {
                problems.push(format!("{code} is listed twice as elective"));
            }
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert!(!catalog.required_courses.is_empty());
        assert!(!catalog.advanced_elective_courses.is_empty());
        assert_eq!(catalog.required_credit_total(), catalog.program.required_credits);
        assert_eq!(catalog.program.total_credits, 128);
        assert!(catalog.overlaps().is_empty(), "{:?}", catalog.overlaps());
    }

    #[test]
    fn test_builtin_english_courses_fall_back_to_dt() {
        let catalog = Catalog::builtin();
        let english: Vec<_> = catalog
            .required_courses
            .iter()
            .filter(|e| e.course_name.starts_with("Anh văn"))
            .collect();
        assert_eq!(english.len(), 4);
        assert!(english.iter().all(|e| e.fallback_grade == "DT"));
    }

    #[test]
    fn test_from_toml_defaults() {
        let catalog = Catalog::from_toml(
            r#"
[[required]]
code = "AA1000"
name = "Course A"
credits = 3
"#,
        )
        .expect("valid catalog");
        assert_eq!(catalog.required_courses[0].fallback_grade, "F");
        assert!(catalog.required_courses[0].predicted_grade.is_none());
        assert!(catalog.advanced_elective_courses.is_empty());
        assert_eq!(catalog.program.total_credits, 128);
    }

    #[test]
    fn test_from_toml_rejects_empty_required() {
        let result = Catalog::from_toml("[program]\nname = \"x\"\nrequired_credits = 0\nelective_credits = 0\ntotal_credits = 0\n");
        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn test_overlaps_reported() {
        let catalog = Catalog::new(
            vec![
                CurriculumEntry::new("AA1000", "A", 3, "F"),
                CurriculumEntry::new("AA1000", "A again", 3, "F"),
            ],
            vec![
                CurriculumEntry::new("AA1000", "A as elective", 3, "F"),
                CurriculumEntry::new("BB2000", "B", 3, "F"),
                CurriculumEntry::new("BB2000", "B again", 3, "F"),
            ],
        );
        assert_eq!(catalog.overlaps().len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load(Some(Path::new("/nonexistent/catalog.toml")));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_load_without_path_uses_builtin() {
        let catalog = Catalog::load(None).expect("builtin catalog");
        assert_eq!(catalog, Catalog::builtin());
        assert!(Catalog::load(Some(Path::new(""))).is_ok());
    }
}
