//! Re-export logger API from the internal `planner_logger` crate to
//! preserve the `gpa_planner::shared::logger` path.

pub use planner_logger::{
	close_file_logging,
	disable_debug,
	disable_verbose,
	enable_debug,
	enable_verbose,
	init_file_logging,
	is_debug_enabled,
	is_verbose_enabled,
	level,
	set_level,
	set_level_from_str,
	Level,
};
