//! End-to-end analysis pipeline
//!
//! transcript → redacted notification → best grades → reconciled set →
//! GPA/credits → target projections.
//!
//! An [`Analysis`] owns the reconciled set; overrides produce a new
//! `Analysis` and the summary is recomputed on every call.

use crate::core::aggregate::{compute_gpa_with, CreditSummary};
use crate::core::catalog::Catalog;
use crate::core::error::{CourseSetError, TranscriptError};
use crate::core::grades::GpaPolicy;
use crate::core::models::CourseSet;
use crate::core::notify::{notify_best_effort, NotificationSink};
use crate::core::projector::{project, Projection, ProjectionParams};
use crate::core::reconciler::{reconcile, DEFAULT_ELECTIVE_CAP};
use crate::core::reducer::best_grades;
use crate::core::transcript::Transcript;
use planner_logger::info;
use serde::{Deserialize, Serialize};

/// Honor thresholds shown by default ("very good" and "excellent")
pub const DEFAULT_TARGETS: [f64; 2] = [3.15, 3.55];

/// Tunables for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Elective courses that keep their grade after ranking
    pub elective_cap: usize,
    /// Which courses form the GPA fraction
    pub policy: GpaPolicy,
    /// Scale limits for projections
    pub projection: ProjectionParams,
    /// Target GPAs to project toward
    pub targets: Vec<f64>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            elective_cap: DEFAULT_ELECTIVE_CAP,
            policy: GpaPolicy::default(),
            projection: ProjectionParams::default(),
            targets: DEFAULT_TARGETS.to_vec(),
        }
    }
}

/// Projection toward one target GPA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProjection {
    /// Target GPA
    pub target: f64,
    /// Structured outcome
    pub projection: Projection,
    /// Human-readable guidance
    pub message: String,
}

/// Derived figures for a course set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// GPA on the 4.0 scale
    pub gpa: f64,
    /// Earned credits
    pub credits: CreditSummary,
    /// One entry per configured target
    pub projections: Vec<TargetProjection>,
}

/// Compute GPA, credits, and projections for `courses`.
///
/// Projections use the total earned credits as the current credit count.
#[must_use]
pub fn summarize(courses: &CourseSet, options: &AnalysisOptions) -> Summary {
    let gpa = compute_gpa_with(courses, options.policy);
    let credits = CreditSummary::from_courses(courses.courses());
    let projections = options
        .targets
        .iter()
        .map(|&target| {
            let projection = project(gpa, credits.total, target, options.projection);
            TargetProjection {
                target,
                message: projection.to_string(),
                projection,
            }
        })
        .collect();

    Summary {
        gpa,
        credits,
        projections,
    }
}

/// Reconciled course set plus the options it is summarized with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Reconciled courses, required first
    pub courses: CourseSet,
    /// Options used for summaries
    pub options: AnalysisOptions,
}

impl Analysis {
    /// Current GPA, credits, and projections
    #[must_use]
    pub fn summary(&self) -> Summary {
        summarize(&self.courses, &self.options)
    }

    /// New analysis with one course's grade overridden.
    ///
    /// # Errors
    /// Returns an error for an unknown course code or a non-selectable grade.
    pub fn with_override(&self, code: &str, grade: &str) -> Result<Self, CourseSetError> {
        Ok(Self {
            courses: self.courses.with_override(code, grade)?,
            options: self.options.clone(),
        })
    }

    /// New analysis with one course's grade restored.
    ///
    /// # Errors
    /// Returns an error for an unknown course code.
    pub fn with_reset(&self, code: &str) -> Result<Self, CourseSetError> {
        Ok(Self {
            courses: self.courses.with_reset(code)?,
            options: self.options.clone(),
        })
    }
}

/// Run the pipeline over an accepted transcript.
///
/// The redacted transcript goes to `sink` first; a sink failure is logged
/// and does not change the result.
#[must_use]
pub fn analyze(
    transcript: &Transcript,
    catalog: &Catalog,
    sink: &dyn NotificationSink,
    options: &AnalysisOptions,
) -> Analysis {
    notify_best_effort(sink, &transcript.redacted());

    let best = best_grades(transcript.records());
    let courses = reconcile(best, catalog, options.elective_cap);
    info!(
        "Analyzed {} transcript records into {} courses",
        transcript.len(),
        courses.len()
    );

    Analysis {
        courses,
        options: options.clone(),
    }
}

/// Parse `input` and run the pipeline.
///
/// # Errors
/// Returns an error if the input is not a JSON array of grade objects; the
/// sink is not called in that case.
pub fn analyze_json(
    input: &str,
    catalog: &Catalog,
    sink: &dyn NotificationSink,
    options: &AnalysisOptions,
) -> Result<Analysis, TranscriptError> {
    let transcript = Transcript::parse(input)?;
    Ok(analyze(&transcript, catalog, sink, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CurriculumEntry;
    use crate::core::notify::{MemorySink, NullSink};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                CurriculumEntry::new("R1", "Required 1", 4, "F"),
                CurriculumEntry::new("R2", "Required 2", 2, "DT"),
            ],
            vec![CurriculumEntry::new("E1", "Elective 1", 3, "F")],
        )
    }

    #[test]
    fn test_summary_tracks_overrides() {
        let input = r#"[{"maMonHoc": "R1", "tenMonHoc": "Required 1", "soTinChi": 4, "diemChu": "B"}]"#;
        let analysis =
            analyze_json(input, &catalog(), &NullSink, &AnalysisOptions::default()).expect("valid input");

        let before = analysis.summary();
        assert!((before.gpa - 3.0).abs() < 1e-9);
        assert_eq!(before.credits.required, 6);
        assert_eq!(before.credits.optional, 0);
        assert_eq!(before.projections.len(), 2);

        let after = analysis.with_override("E1", "A").expect("override").summary();
        // (3*4 + 4*3) / 7
        assert!((after.gpa - 24.0 / 7.0).abs() < 1e-9);
        assert_eq!(after.credits.optional, 3);

        // Original analysis unchanged
        assert!((analysis.summary().gpa - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sink_gets_redacted_payload_once() {
        let sink = MemorySink::new();
        let input = r#"[{"sinhVienId": 7, "maMonHoc": "R1", "soTinChi": 4, "diemChu": "A"}]"#;
        analyze_json(input, &catalog(), &sink, &AnalysisOptions::default()).expect("valid input");

        let payloads = sink.payloads();
        assert_eq!(payloads.len(), 1);
        assert!(payloads[0][0].get("sinhVienId").is_none());
        assert_eq!(payloads[0][0]["maMonHoc"], "R1");
    }

    #[test]
    fn test_rejected_input_skips_sink() {
        let sink = MemorySink::new();
        let result = analyze_json("{}", &catalog(), &sink, &AnalysisOptions::default());
        assert!(result.is_err());
        assert!(sink.payloads().is_empty());
    }

    #[test]
    fn test_empty_transcript_summary() {
        let analysis =
            analyze_json("[]", &catalog(), &NullSink, &AnalysisOptions::default()).expect("valid input");
        let summary = analysis.summary();
        assert!(summary.gpa.abs() < f64::EPSILON);
        // Only the DT placeholder earns credit
        assert_eq!(summary.credits.total, 2);
        assert_eq!(analysis.courses.len(), 3);
    }
}
