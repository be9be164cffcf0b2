//! Target-GPA projection
//!
//! Given where the student stands now, how high must the average grade point
//! be on every remaining credit to finish at a target GPA?

use serde::{Deserialize, Serialize};
use std::fmt;

/// Graduation credit total used when none is configured
pub const DEFAULT_MAX_CREDITS: u32 = 128;

/// Highest grade point on the scale
pub const DEFAULT_MAX_GRADE_POINT: f64 = 4.0;

/// Scale limits for a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Credits needed to graduate
    pub max_credits: u32,
    /// Highest achievable grade point
    pub max_grade_point: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            max_credits: DEFAULT_MAX_CREDITS,
            max_grade_point: DEFAULT_MAX_GRADE_POINT,
        }
    }
}

/// Outcome of a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Projection {
    /// Current credits already reach the graduation total
    NoCapacity,
    /// The target is met even with zero points on the remaining credits
    AlreadyMet,
    /// Even a perfect grade on every remaining credit falls short
    Unreachable {
        /// Average that would be needed
        required_average: f64,
        /// Credits left
        remaining_credits: u32,
    },
    /// The target is reachable with this average
    Needed {
        /// Grade point needed per remaining credit
        average: f64,
        /// Credits left
        remaining_credits: u32,
    },
}

impl Projection {
    /// True when the target can still be reached (or already is)
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        matches!(self, Self::AlreadyMet | Self::Needed { .. })
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCapacity => write!(f, "No remaining credits to improve GPA"),
            Self::AlreadyMet => write!(f, "Target GPA already met"),
            Self::Unreachable { .. } => write!(f, "Target GPA unreachable within remaining credits"),
            Self::Needed {
                average,
                remaining_credits,
            } => write!(
                f,
                "Need an average of {average:.2} GPA over the remaining {remaining_credits} credits"
            ),
        }
    }
}

/// Project the average grade point needed to finish at `target_gpa`.
///
/// `avg = (target * max_credits - current_gpa * current_credits) / remaining`
#[must_use]
pub fn project(
    current_gpa: f64,
    current_credits: u32,
    target_gpa: f64,
    params: ProjectionParams,
) -> Projection {
    if current_credits >= params.max_credits {
        return Projection::NoCapacity;
    }
    let remaining_credits = params.max_credits - current_credits;

    let average = target_gpa.mul_add(
        f64::from(params.max_credits),
        -current_gpa * f64::from(current_credits),
    ) / f64::from(remaining_credits);

    if average <= 0.0 {
        Projection::AlreadyMet
    } else if average > params.max_grade_point {
        Projection::Unreachable {
            required_average: average,
            remaining_credits,
        }
    } else {
        Projection::Needed {
            average,
            remaining_credits,
        }
    }
}

/// Message form of [`project`]
#[must_use]
pub fn credits_needed(
    current_gpa: f64,
    current_credits: u32,
    target_gpa: f64,
    max_credits: u32,
    max_grade_point: f64,
) -> String {
    project(
        current_gpa,
        current_credits,
        target_gpa,
        ProjectionParams {
            max_credits,
            max_grade_point,
        },
    )
    .to_string()
}
