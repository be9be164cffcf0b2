//! Reconciled course model and the working set built from it

use crate::core::error::CourseSetError;
use crate::core::grades;
use crate::core::models::{CurriculumEntry, GradeRecord};
use serde::{Deserialize, Serialize};

/// A course after merging the transcript with the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledCourse {
    /// Course code, unique within a [`CourseSet`]
    pub course_code: String,

    /// Course name
    pub course_name: String,

    /// Credit count
    pub credit_count: u32,

    /// Grade used for every computation; changed by overrides
    pub current_grade: String,

    /// Grade at merge time (real grade, or the catalog fallback)
    pub original_grade: String,

    /// True when no transcript record existed for this course
    pub is_predicted: bool,

    /// True when the course comes from the required catalog
    pub is_required: bool,

    /// Advisory grade from the catalog; never used in GPA math
    pub predicted_grade_hint: Option<String>,

    /// Term the real grade was earned in, when known
    pub term: Option<String>,
}

impl ReconciledCourse {
    /// Build from a real transcript record
    #[must_use]
    pub fn from_record(record: GradeRecord, is_required: bool) -> Self {
        Self {
            course_code: record.course_code,
            course_name: record.course_name,
            credit_count: record.credit_count,
            current_grade: record.letter_grade.clone(),
            original_grade: record.letter_grade,
            is_predicted: false,
            is_required,
            predicted_grade_hint: None,
            term: record.term,
        }
    }

    /// Build a placeholder for a catalog course the transcript does not have
    #[must_use]
    pub fn placeholder(entry: &CurriculumEntry, is_required: bool) -> Self {
        Self {
            course_code: entry.course_code.clone(),
            course_name: entry.course_name.clone(),
            credit_count: entry.credit_count,
            current_grade: entry.fallback_grade.clone(),
            original_grade: entry.fallback_grade.clone(),
            is_predicted: true,
            is_required,
            predicted_grade_hint: entry.predicted_grade.clone(),
            term: None,
        }
    }

    /// True when the current grade differs from the merge-time grade
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        self.current_grade != self.original_grade
    }

    /// True when the course earns its credits (anything but `F`)
    #[must_use]
    pub fn earns_credit(&self) -> bool {
        self.current_grade != grades::FAIL
    }

    /// Force both grades to `F`
    pub(crate) fn demote(&mut self) {
        grades::FAIL.clone_into(&mut self.current_grade);
        grades::FAIL.clone_into(&mut self.original_grade);
    }
}

/// Ordered, immutable set of reconciled courses.
///
/// Required courses come first in catalog order, then the ranked elective pool.
/// Overrides and resets return a new set and leave the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseSet {
    courses: Vec<ReconciledCourse>,
}

impl CourseSet {
    /// Wrap an already-ordered course list
    #[must_use]
    pub const fn new(courses: Vec<ReconciledCourse>) -> Self {
        Self { courses }
    }

    /// All courses, in display order
    #[must_use]
    pub fn courses(&self) -> &[ReconciledCourse] {
        &self.courses
    }

    /// Iterate over all courses
    pub fn iter(&self) -> std::slice::Iter<'_, ReconciledCourse> {
        self.courses.iter()
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// True when the set holds no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Look up a course by code
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&ReconciledCourse> {
        self.courses.iter().find(|c| c.course_code == code)
    }

    /// Required courses, in catalog order
    pub fn required(&self) -> impl Iterator<Item = &ReconciledCourse> {
        self.courses.iter().filter(|c| c.is_required)
    }

    /// Elective pool (advanced and free), in ranked order
    pub fn optional(&self) -> impl Iterator<Item = &ReconciledCourse> {
        self.courses.iter().filter(|c| !c.is_required)
    }

    /// Courses whose grade has been manually changed
    pub fn overridden(&self) -> impl Iterator<Item = &ReconciledCourse> {
        self.courses.iter().filter(|c| c.is_overridden())
    }

    /// Return a copy of the set with one course's current grade replaced.
    ///
    /// # Errors
    /// Returns [`CourseSetError::UnsupportedGrade`] if `grade` is not one of
    /// [`grades::GRADE_OPTIONS`], or [`CourseSetError::UnknownCourse`] if no
    /// course has `code`.
    pub fn with_override(&self, code: &str, grade: &str) -> Result<Self, CourseSetError> {
        if !grades::is_selectable(grade) {
            return Err(CourseSetError::UnsupportedGrade(grade.to_string()));
        }
        self.replace(code, |course| grade.clone_into(&mut course.current_grade))
    }

    /// Return a copy of the set with one course's current grade restored to
    /// its merge-time grade.
    ///
    /// # Errors
    /// Returns [`CourseSetError::UnknownCourse`] if no course has `code`.
    pub fn with_reset(&self, code: &str) -> Result<Self, CourseSetError> {
        self.replace(code, |course| {
            course.current_grade.clone_from(&course.original_grade);
        })
    }

    /// Return a copy of the set with every override undone
    #[must_use]
    pub fn reset_all(&self) -> Self {
        let courses = self
            .courses
            .iter()
            .map(|c| ReconciledCourse {
                current_grade: c.original_grade.clone(),
                ..c.clone()
            })
            .collect();
        Self { courses }
    }

    fn replace(
        &self,
        code: &str,
        edit: impl FnOnce(&mut ReconciledCourse),
    ) -> Result<Self, CourseSetError> {
        let index = self
            .courses
            .iter()
            .position(|c| c.course_code == code)
            .ok_or_else(|| CourseSetError::UnknownCourse(code.to_string()))?;

        let mut courses = self.courses.clone();
        edit(&mut courses[index]);
        Ok(Self { courses })
    }
}

impl<'a> IntoIterator for &'a CourseSet {
    type Item = &'a ReconciledCourse;
    type IntoIter = std::slice::Iter<'a, ReconciledCourse>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}
