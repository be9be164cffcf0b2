//! JSON report generator

use crate::core::analysis::Summary;
use crate::core::models::{ProgramInfo, ReconciledCourse};
use crate::core::report::{ReportContext, ReportGenerator};
use serde::Serialize;
use std::error::Error;

/// Serialized shape of a JSON report
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    source: &'a str,
    program: &'a ProgramInfo,
    summary: &'a Summary,
    courses: &'a [ReconciledCourse],
}

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let report = JsonReport {
            version: crate::shared::get_version(),
            source: ctx.source,
            program: ctx.program,
            summary: ctx.summary,
            courses: ctx.analysis.courses.courses(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::{analyze_json, AnalysisOptions};
    use crate::core::catalog::Catalog;
    use crate::core::models::CurriculumEntry;
    use crate::core::notify::NullSink;
    use serde_json::Value;

    #[test]
    fn test_render_is_valid_json() {
        let catalog = Catalog::new(vec![CurriculumEntry::new("MT1003", "Giải tích 1", 4, "F")], vec![]);
        let input = r#"[{"maMonHoc": "MT1003", "soTinChi": 4, "diemChu": "A"}]"#;
        let analysis =
            analyze_json(input, &catalog, &NullSink, &AnalysisOptions::default()).expect("valid input");
        let summary = analysis.summary();
        let program = ProgramInfo::default();
        let ctx = ReportContext::new("in.json", &program, &analysis, &summary);

        let rendered = JsonReporter::new().render(&ctx).expect("render");
        let value: Value = serde_json::from_str(&rendered).expect("valid JSON");

        assert_eq!(value["source"], "in.json");
        assert_eq!(value["courses"][0]["course_code"], "MT1003");
        assert_eq!(value["summary"]["credits"]["required"], 4);
        assert_eq!(value["summary"]["projections"][0]["projection"]["outcome"], "needed");
    }
}
