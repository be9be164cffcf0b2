//! Letter-grade classification
//!
//! Letter grades are plain case-sensitive strings taken from the transcript.
//! Every function here is total: an unrecognized grade never errors, it just
//! classifies as worth zero points and lands in [`DisplayBucket::Other`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Failing grade. Also the grade forced onto electives beyond the cap.
pub const FAIL: &str = "F";

/// Credit-only pass: earns credit, never enters the GPA fraction.
pub const PASS_NO_GRADE: &str = "DT";

/// Administrative codes that are neither credit nor GPA (exempted, withdrawn, blank).
pub const NON_ACADEMIC: [&str; 3] = ["MT", "KD", ""];

/// Grades that take part in the weighted GPA under [`GpaPolicy::Strict`].
pub const GPA_GRADES: [&str; 8] = ["A+", "A", "B+", "B", "C+", "C", "D+", "D"];

/// Grades a caller may assign when overriding a reconciled course.
pub const GRADE_OPTIONS: [&str; 10] = ["A+", "A", "B+", "B", "C+", "C", "D+", "D", "F", "DT"];

/// Grade points on the 4.0 scale.
///
/// `DT` maps to 4.0 so that credit-only passes rank above failures when
/// electives are sorted; the aggregator never weights it into the GPA.
#[must_use]
pub fn grade_point(letter: &str) -> f64 {
    match letter {
        "A+" | "A" | "DT" => 4.0,
        "B+" => 3.5,
        "B" => 3.0,
        "C+" => 2.5,
        "C" => 2.0,
        "D+" => 1.5,
        "D" => 1.0,
        _ => 0.0,
    }
}

/// False for administrative non-grades, which are dropped from credit and GPA.
#[must_use]
pub fn is_graded(letter: &str) -> bool {
    !NON_ACADEMIC.contains(&letter)
}

/// True only for the quality grades `A+` through `D`.
#[must_use]
pub fn is_counted_for_gpa(letter: &str) -> bool {
    GPA_GRADES.contains(&letter)
}

/// True when the grade can be chosen as an override.
#[must_use]
pub fn is_selectable(letter: &str) -> bool {
    GRADE_OPTIONS.contains(&letter)
}

/// Presentation grouping for a letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayBucket {
    /// `A+`, `A`
    Excellent,
    /// `B+`, `B`
    Good,
    /// `C+`, `C`
    Fair,
    /// `D+`, `D`
    Poor,
    /// `F`
    Failing,
    /// Anything else (`DT`, administrative codes, unknown values)
    Other,
}

/// Bucket a grade for display. Has no effect on any computation.
#[must_use]
pub fn display_bucket(letter: &str) -> DisplayBucket {
    match letter {
        "A+" | "A" => DisplayBucket::Excellent,
        "B+" | "B" => DisplayBucket::Good,
        "C+" | "C" => DisplayBucket::Fair,
        "D+" | "D" => DisplayBucket::Poor,
        FAIL => DisplayBucket::Failing,
        _ => DisplayBucket::Other,
    }
}

impl fmt::Display for DisplayBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::Failing => "failing",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// Which courses make up the GPA fraction.
///
/// Earlier revisions of the grade sheet disagreed on this, so it is kept as a
/// switch rather than baked into the aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpaPolicy {
    /// Only `A+`..`D` count, in both numerator and denominator.
    #[default]
    Strict,
    /// Every graded course sits in the denominator (including `F` and `DT`);
    /// `DT` adds nothing to the numerator.
    Graded,
}

impl GpaPolicy {
    /// Whether a course with this grade contributes its credits to the denominator.
    #[must_use]
    pub fn in_denominator(self, letter: &str) -> bool {
        match self {
            Self::Strict => is_counted_for_gpa(letter),
            Self::Graded => is_graded(letter),
        }
    }

    /// Points per credit this grade adds to the numerator.
    #[must_use]
    pub fn weighted_point(self, letter: &str) -> f64 {
        match self {
            Self::Strict if is_counted_for_gpa(letter) => grade_point(letter),
            Self::Graded if is_graded(letter) && letter != PASS_NO_GRADE => grade_point(letter),
            _ => 0.0,
        }
    }
}

impl FromStr for GpaPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "graded" => Ok(Self::Graded),
            _ => Err(format!("Unknown GPA policy: '{s}' (expected strict or graded)")),
        }
    }
}

impl fmt::Display for GpaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Graded => f.write_str("graded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_points() {
        assert!((grade_point("A+") - 4.0).abs() < f64::EPSILON);
        assert!((grade_point("B+") - 3.5).abs() < f64::EPSILON);
        assert!((grade_point("C") - 2.0).abs() < f64::EPSILON);
        assert!((grade_point("D+") - 1.5).abs() < f64::EPSILON);
        assert!(grade_point("F").abs() < f64::EPSILON);
        assert!((grade_point("DT") - 4.0).abs() < f64::EPSILON);
        assert!(grade_point("MT").abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_grade_is_zero() {
        assert!(grade_point("Z").abs() < f64::EPSILON);
        assert!(grade_point("a").abs() < f64::EPSILON, "grades are case-sensitive");
        assert!(grade_point("").abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_graded() {
        assert!(!is_graded("MT"));
        assert!(!is_graded("KD"));
        assert!(!is_graded(""));
        assert!(is_graded("F"));
        assert!(is_graded("DT"));
        assert!(is_graded("garbage"));
    }

    #[test]
    fn test_counted_for_gpa_excludes_f_and_dt() {
        for g in GPA_GRADES {
            assert!(is_counted_for_gpa(g), "{g} should count");
        }
        assert!(!is_counted_for_gpa("F"));
        assert!(!is_counted_for_gpa("DT"));
        assert!(!is_counted_for_gpa("MT"));
    }

    #[test]
    fn test_display_buckets() {
        assert_eq!(display_bucket("A"), DisplayBucket::Excellent);
        assert_eq!(display_bucket("B+"), DisplayBucket::Good);
        assert_eq!(display_bucket("C+"), DisplayBucket::Fair);
        assert_eq!(display_bucket("D"), DisplayBucket::Poor);
        assert_eq!(display_bucket("F"), DisplayBucket::Failing);
        assert_eq!(display_bucket("DT"), DisplayBucket::Other);
        assert_eq!(display_bucket("??"), DisplayBucket::Other);
    }

    #[test]
    fn test_policy_weights() {
        assert!(GpaPolicy::Strict.weighted_point("DT").abs() < f64::EPSILON);
        assert!(!GpaPolicy::Strict.in_denominator("F"));
        assert!(GpaPolicy::Graded.in_denominator("F"));
        assert!(GpaPolicy::Graded.in_denominator("DT"));
        assert!(GpaPolicy::Graded.weighted_point("DT").abs() < f64::EPSILON);
        assert!(!GpaPolicy::Graded.in_denominator("KD"));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Strict".parse::<GpaPolicy>(), Ok(GpaPolicy::Strict));
        assert_eq!("graded".parse::<GpaPolicy>(), Ok(GpaPolicy::Graded));
        assert!("loose".parse::<GpaPolicy>().is_err());
        assert_eq!(GpaPolicy::default().to_string(), "strict");
    }
}
