//! Markdown report generator
//!
//! Summary table, target guidance, and one course table per group.

use crate::core::grades::display_bucket;
use crate::core::models::ReconciledCourse;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();
        let credits = &ctx.summary.credits;

        // Header
        output = output.replace("{{program_name}}", &ctx.program.name);
        output = output.replace("{{source}}", ctx.source);
        output = output.replace("{{course_count}}", &ctx.course_count().to_string());
        output = output.replace("{{override_count}}", &ctx.override_count().to_string());

        // Summary
        output = output.replace("{{gpa}}", &format!("{:.2}", ctx.summary.gpa));
        output = output.replace("{{required_credits}}", &credits.required.to_string());
        output = output.replace(
            "{{required_target}}",
            &ctx.program.required_credits.to_string(),
        );
        output = output.replace("{{optional_credits}}", &credits.optional.to_string());
        output = output.replace(
            "{{optional_target}}",
            &ctx.program.elective_credits.to_string(),
        );
        output = output.replace("{{total_credits}}", &credits.total.to_string());
        output = output.replace("{{total_target}}", &ctx.program.total_credits.to_string());

        output = output.replace("{{targets}}", &Self::generate_targets(ctx));

        let required: Vec<_> = ctx.analysis.courses.required().collect();
        output = output.replace("{{required_table}}", &Self::generate_course_table(&required));
        let optional: Vec<_> = ctx.analysis.courses.optional().collect();
        output = output.replace("{{optional_table}}", &Self::generate_course_table(&optional));

        output = output.replace("{{version}}", crate::shared::get_version());

        output
    }

    /// Bullet list of target projections
    fn generate_targets(ctx: &ReportContext) -> String {
        if ctx.summary.projections.is_empty() {
            return "_No targets configured._\n".to_string();
        }

        let mut list = String::new();
        for entry in &ctx.summary.projections {
            let marker = if entry.projection.is_feasible() { "✓" } else { "✗" };
            let _ = writeln!(list, "- {marker} **{:.2}**: {}", entry.target, entry.message);
        }
        list
    }

    /// Course table with grade, origin, and override markers
    fn generate_course_table(courses: &[&ReconciledCourse]) -> String {
        if courses.is_empty() {
            return "_None._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Code | Name | Credits | Grade | Band | Source |\n");
        table.push_str("|---|---|---|---|---|---|\n");

        for course in courses {
            let source = match (course.is_predicted, course.is_overridden()) {
                (_, true) => format!("override (was {})", course.original_grade),
                (true, false) => "predicted".to_string(),
                (false, false) => course.term.clone().unwrap_or_else(|| "transcript".to_string()),
            };

            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {source} |",
                course.course_code,
                course.course_name,
                course.credit_count,
                course.current_grade,
                display_bucket(&course.current_grade),
            );
        }

        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::{analyze_json, AnalysisOptions};
    use crate::core::catalog::Catalog;
    use crate::core::models::{CurriculumEntry, ProgramInfo};
    use crate::core::notify::NullSink;

    #[test]
    fn test_render_fills_every_placeholder() {
        let catalog = Catalog::new(
            vec![CurriculumEntry::new("MT1003", "Giải tích 1", 4, "F")],
            vec![CurriculumEntry::new("CO3021", "Hệ quản trị CSDL", 3, "F")],
        );
        let input = r#"[{"maMonHoc": "MT1003", "tenMonHoc": "Giải tích 1", "soTinChi": 4, "diemChu": "B+"}]"#;
        let analysis = analyze_json(input, &catalog, &NullSink, &AnalysisOptions::default())
            .expect("valid input")
            .with_override("CO3021", "A")
            .expect("override");
        let summary = analysis.summary();
        let program = ProgramInfo::default();
        let ctx = ReportContext::new("grades.json", &program, &analysis, &summary);

        let report = MarkdownReporter::new().render(&ctx).expect("render");

        assert!(!report.contains("{{"), "unfilled placeholder in:\n{report}");
        assert!(report.contains("**Source:** grades.json"));
        assert!(report.contains("| MT1003 | Giải tích 1 | 4 | B+ | good | transcript |"));
        assert!(report.contains("override (was F)"));
        assert!(report.contains("1 overridden"));
    }
}
