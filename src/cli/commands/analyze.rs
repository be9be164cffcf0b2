//! Analyze command handler
//!
//! Reconciles a transcript export, applies manual overrides, prints the
//! summary, and optionally writes a report.

use crate::args::AnalyzeArgs;
use gpa_planner::config::Config;
use gpa_planner::core::{
    analysis::{analyze_json, Analysis, Summary},
    catalog::Catalog,
    notify::{FileSink, NotificationSink, NullSink},
    report::{ReportContext, ReportFormat, ReportGenerator},
};
use planner_logger::{error, info, verbose};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the analyze command. Returns `false` when it failed.
pub fn run(args: &AnalyzeArgs, config: &Config) -> bool {
    match analyze_file(args, config) {
        Ok(()) => true,
        Err(err) => {
            error!("Analysis failed for {}: {err}", args.input_file.display());
            eprintln!("{err}");
            false
        }
    }
}

fn analyze_file(args: &AnalyzeArgs, config: &Config) -> Result<(), String> {
    // Validate the format before doing any work
    let format = args
        .report
        .as_deref()
        .map(ReportFormat::from_str)
        .transpose()
        .map_err(|e| format!("✗ {e}. Use: md or json"))?;

    let catalog_path = config.catalog_path();
    let catalog = Catalog::load(catalog_path.as_deref())
        .map_err(|e| format!("✗ Failed to load catalog: {e}"))?;

    let input = std::fs::read_to_string(&args.input_file)
        .map_err(|e| format!("✗ Failed to read {}: {e}", args.input_file.display()))?;

    let sink: Box<dyn NotificationSink> = if args.no_notify || config.paths.outbox_dir.is_empty() {
        Box::new(NullSink)
    } else {
        Box::new(FileSink::new(&config.paths.outbox_dir))
    };

    let mut options = config.analysis_options(&catalog.program);
    if !args.targets.is_empty() {
        options.targets.clone_from(&args.targets);
    }
    if let Some(max_credits) = args.max_credits {
        options.projection.max_credits = max_credits;
    }

    let analysis = analyze_json(&input, &catalog, sink.as_ref(), &options)
        .map_err(|e| format!("✗ Invalid transcript {}: {e}", args.input_file.display()))?;
    info!("Transcript analyzed: {}", args.input_file.display());

    let analysis = apply_edits(analysis, &args.overrides, &args.resets)?;
    let summary = analysis.summary();

    print_courses(&analysis);
    print_summary(&summary, &catalog);

    if let Some(format) = format {
        let output_path = report_path(args, config, format)?;
        let source = args.input_file.to_string_lossy();
        let ctx = ReportContext::new(&source, &catalog.program, &analysis, &summary);
        format
            .generator()
            .generate(&ctx, &output_path)
            .map_err(|e| format!("✗ Failed to generate {format} report: {e}"))?;
        println!("✓ Report generated: {}", output_path.display());
        info!("Report exported to: {}", output_path.display());
    }

    Ok(())
}

/// Apply `--set` overrides in order, then `--reset` codes
fn apply_edits(
    analysis: Analysis,
    overrides: &[(String, String)],
    resets: &[String],
) -> Result<Analysis, String> {
    let analysis = overrides
        .iter()
        .try_fold(analysis, |acc, (code, grade)| {
            verbose!("Override {code} -> {grade}");
            acc.with_override(code, grade)
        })
        .map_err(|e| format!("✗ Override rejected: {e}"))?;

    resets
        .iter()
        .try_fold(analysis, |acc, code| {
            verbose!("Reset {code}");
            acc.with_reset(code)
        })
        .map_err(|e| format!("✗ Reset rejected: {e}"))
}

/// Output path from `-o` or `reports_dir`/<input>_report.<ext>
fn report_path(args: &AnalyzeArgs, config: &Config, format: ReportFormat) -> Result<PathBuf, String> {
    if let Some(output) = &args.output {
        return Ok(output.clone());
    }

    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "✗ Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;

    Ok(reports_dir.join(report_file_name(&args.input_file, format)))
}

fn report_file_name(input_file: &Path, format: ReportFormat) -> String {
    let stem = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("transcript");
    format!("{stem}_report.{}", format.extension())
}

/// Print the reconciled course list
fn print_courses(analysis: &Analysis) {
    println!("\n=== Courses ===");
    for course in &analysis.courses {
        let kind = if course.is_required { "R" } else { "E" };
        let mut marks = String::new();
        if course.is_predicted {
            marks.push_str(" (predicted)");
        }
        if course.is_overridden() {
            let _ = write!(marks, " (was {})", course.original_grade);
        }
        println!(
            "[{kind}] {:<8} {:<3} {:>2} cr  {}{marks}",
            course.course_code, course.current_grade, course.credit_count, course.course_name
        );
    }
}

/// Print GPA, credits, and target guidance
fn print_summary(summary: &Summary, catalog: &Catalog) {
    let program = &catalog.program;
    println!("\n=== Summary ===");
    println!("GPA: {:.2}", summary.gpa);
    println!(
        "Required credits: {}/{}",
        summary.credits.required, program.required_credits
    );
    println!(
        "Optional credits: {}/{}",
        summary.credits.optional, program.elective_credits
    );
    println!(
        "Total credits: {}/{}",
        summary.credits.total, program.total_credits
    );

    for entry in &summary.projections {
        println!("Target {:.2}: {}", entry.target, entry.message);
    }
}
