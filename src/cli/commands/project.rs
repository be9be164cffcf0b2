//! Project command handler

use gpa_planner::config::Config;
use gpa_planner::core::catalog::Catalog;
use gpa_planner::core::projector::project;
use planner_logger::{debug, error};

/// Run the projector for each target. Returns `false` on invalid input.
pub fn run(
    gpa: f64,
    credits: u32,
    targets: &[f64],
    max_credits: Option<u32>,
    config: &Config,
) -> bool {
    let catalog = match Catalog::load(config.catalog_path().as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Catalog load failed: {e}");
            eprintln!("✗ Failed to load catalog: {e}");
            return false;
        }
    };

    let mut params = config.projection_params(&catalog.program);
    if let Some(max_credits) = max_credits {
        params.max_credits = max_credits;
    }
    debug!("Projecting against {} credits", params.max_credits);

    if !(0.0..=params.max_grade_point).contains(&gpa) {
        error!("Rejected GPA {gpa}");
        eprintln!(
            "✗ GPA must be between 0 and {:.1}, got {gpa}",
            params.max_grade_point
        );
        return false;
    }

    let targets = if targets.is_empty() {
        config.projection.targets.as_slice()
    } else {
        targets
    };
    if targets.is_empty() {
        eprintln!("✗ No targets given. Use --target or `gpaplanner config set targets 3.15,3.55`");
        return false;
    }

    for &target in targets {
        let projection = project(gpa, credits, target, params);
        println!("Target {target:.2}: {projection}");
    }
    true
}
