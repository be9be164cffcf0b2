//! Catalog command handler

use gpa_planner::config::Config;
use gpa_planner::core::catalog::Catalog;
use gpa_planner::core::models::CurriculumEntry;
use planner_logger::error;

/// Print the active catalog. Returns `false` if it could not be loaded.
pub fn run(electives: bool, config: &Config) -> bool {
    let catalog_path = config.catalog_path();
    let catalog = match Catalog::load(catalog_path.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Catalog load failed: {e}");
            eprintln!("✗ Failed to load catalog: {e}");
            return false;
        }
    };

    let source = catalog_path.map_or_else(
        || "built-in".to_string(),
        |p| p.display().to_string(),
    );
    println!("\n=== {} ({source}) ===", catalog.program.name);

    println!(
        "\nRequired courses: {} ({} credits)",
        catalog.required_courses.len(),
        catalog.required_credit_total()
    );
    print_entries(&catalog.required_courses);

    if electives {
        println!(
            "\nElective courses: {}",
            catalog.advanced_elective_courses.len()
        );
        print_entries(&catalog.advanced_elective_courses);
    }

    for problem in catalog.overlaps() {
        println!("⚠️  {problem}");
    }
    true
}

fn print_entries(entries: &[CurriculumEntry]) {
    for entry in entries {
        let hint = entry
            .predicted_grade
            .as_deref()
            .map_or_else(String::new, |g| format!(" (predicted {g})"));
        println!(
            "  {:<8} {:>2} cr  fallback {:<2}  {}{hint}",
            entry.course_code, entry.credit_count, entry.fallback_grade, entry.course_name
        );
    }
}
