//! GPA and credit totals
//!
//! Everything here is recomputed from the current grades on every call, so
//! results always reflect the latest overrides.

use crate::core::grades::GpaPolicy;
use crate::core::models::ReconciledCourse;
use serde::{Deserialize, Serialize};

/// Weighted GPA on the 4.0 scale under the strict policy.
///
/// Only `A+`..`D` courses contribute, to both the numerator and denominator.
/// Returns 0.0 when no course qualifies.
#[must_use]
pub fn compute_gpa<'a>(courses: impl IntoIterator<Item = &'a ReconciledCourse>) -> f64 {
    compute_gpa_with(courses, GpaPolicy::Strict)
}

/// Weighted GPA on the 4.0 scale under `policy`. Returns 0.0 on an empty
/// or zero-credit denominator.
#[must_use]
pub fn compute_gpa_with<'a>(
    courses: impl IntoIterator<Item = &'a ReconciledCourse>,
    policy: GpaPolicy,
) -> f64 {
    let (points, credits) = courses
        .into_iter()
        .filter(|c| policy.in_denominator(&c.current_grade))
        .fold((0.0_f64, 0_u32), |(points, credits), c| {
            (
                points + policy.weighted_point(&c.current_grade) * f64::from(c.credit_count),
                credits + c.credit_count,
            )
        });

    if credits == 0 {
        0.0
    } else {
        points / f64::from(credits)
    }
}

/// Credits earned by required courses (any grade but `F`)
#[must_use]
pub fn required_credits_earned<'a>(courses: impl IntoIterator<Item = &'a ReconciledCourse>) -> u32 {
    courses
        .into_iter()
        .filter(|c| c.is_required && c.earns_credit())
        .map(|c| c.credit_count)
        .sum()
}

/// Credits earned by elective courses (any grade but `F`)
#[must_use]
pub fn optional_credits_earned<'a>(courses: impl IntoIterator<Item = &'a ReconciledCourse>) -> u32 {
    courses
        .into_iter()
        .filter(|c| !c.is_required && c.earns_credit())
        .map(|c| c.credit_count)
        .sum()
}

/// Earned credits split by requirement kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSummary {
    /// Credits from required courses
    pub required: u32,
    /// Credits from the elective pool
    pub optional: u32,
    /// `required + optional`
    pub total: u32,
}

impl CreditSummary {
    /// Tally earned credits over a course list
    #[must_use]
    pub fn from_courses(courses: &[ReconciledCourse]) -> Self {
        let required = required_credits_earned(courses);
        let optional = optional_credits_earned(courses);
        Self {
            required,
            optional,
            total: required + optional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::GradeRecord;

    fn course(grade: &str, credits: u32, required: bool) -> ReconciledCourse {
        ReconciledCourse::from_record(GradeRecord::new("X", "X", credits, grade), required)
    }

    #[test]
    fn test_weighted_gpa() {
        let courses = [course("A", 4, true), course("C", 2, true)];
        // (4*4 + 2*2) / 6
        assert!((compute_gpa(&courses) - 20.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_set_is_zero() {
        let courses: [ReconciledCourse; 0] = [];
        assert!(compute_gpa(&courses).abs() < f64::EPSILON);
        assert_eq!(CreditSummary::from_courses(&courses), CreditSummary::default());
    }

    #[test]
    fn test_dt_only_is_zero() {
        let courses = [course("DT", 2, true), course("DT", 2, true)];
        assert!(compute_gpa(&courses).abs() < f64::EPSILON);
    }

    #[test]
    fn test_f_and_dt_excluded_from_strict_fraction() {
        let courses = [course("B+", 4, true), course("F", 4, true), course("DT", 2, true)];
        assert!((compute_gpa(&courses) - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_graded_policy_counts_f_and_dt_credits() {
        let courses = [course("B+", 4, true), course("F", 4, true), course("DT", 2, true)];
        // 14 / 10
        assert!((compute_gpa_with(&courses, GpaPolicy::Graded) - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_grade_ignored_by_strict_policy() {
        let courses = [course("A", 3, false), course("??", 3, false)];
        assert!((compute_gpa(&courses) - 4.0).abs() < 1e-9);
        assert!((compute_gpa_with(&courses, GpaPolicy::Graded) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_credit_split() {
        let courses = [
            course("A", 4, true),
            course("F", 3, true),
            course("DT", 2, true),
            course("B", 3, false),
            course("F", 3, false),
        ];
        let summary = CreditSummary::from_courses(&courses);
        assert_eq!(summary.required, 6);
        assert_eq!(summary.optional, 3);
        assert_eq!(summary.total, 9);
    }
}
