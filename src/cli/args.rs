//! CLI argument definitions for `gpaplanner`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gpa_planner::config::ConfigOverrides;
use planner_logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to
/// `planner_logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Parse a `CODE=GRADE` override
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (code, grade) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=GRADE, got '{s}'"))?;
    let (code, grade) = (code.trim(), grade.trim());
    if code.is_empty() || grade.is_empty() {
        return Err(format!("expected CODE=GRADE, got '{s}'"));
    }
    Ok((code.to_string(), grade.to_string()))
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `reports_dir`, `targets`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Arguments of the `analyze` subcommand
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Transcript JSON export
    #[arg(value_name = "FILE")]
    pub input_file: PathBuf,

    /// Override a course grade (repeatable), e.g. `--set CO3021=A`
    #[arg(long = "set", value_name = "CODE=GRADE", value_parser = parse_assignment)]
    pub overrides: Vec<(String, String)>,

    /// Restore a course to its merge-time grade (repeatable, applied after --set)
    #[arg(long = "reset", value_name = "CODE")]
    pub resets: Vec<String>,

    /// Target GPA to project toward (repeatable; defaults to config targets)
    #[arg(long = "target", value_name = "GPA")]
    pub targets: Vec<f64>,

    /// Credits needed to graduate (defaults to config `max_credits`, then the
    /// catalog's `total_credits`)
    #[arg(long, value_name = "CREDITS", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_credits: Option<u32>,

    /// Write a report in the given format (md, json)
    #[arg(long, value_name = "FORMAT")]
    pub report: Option<String>,

    /// Report output path (defaults to `reports_dir`/<input>_report.<ext>)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Do not hand the redacted transcript to the outbox
    #[arg(long)]
    pub no_notify: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Reconcile a transcript against the catalog and report GPA and credits.
    Analyze(AnalyzeArgs),
    /// Average grade point needed on the remaining credits to reach a target.
    Project {
        /// Current GPA
        #[arg(long, value_name = "GPA")]
        gpa: f64,

        /// Credits earned so far
        #[arg(long, value_name = "CREDITS")]
        credits: u32,

        /// Target GPA (repeatable; defaults to config targets)
        #[arg(long = "target", value_name = "GPA")]
        targets: Vec<f64>,

        /// Credits needed to graduate (defaults to config `max_credits`, then
        /// the catalog's `total_credits`)
        #[arg(long, value_name = "CREDITS", value_parser = clap::value_parser!(u32).range(1..))]
        max_credits: Option<u32>,
    },
    /// List the active curriculum catalog.
    Catalog {
        /// Also list the elective courses
        #[arg(long)]
        electives: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gpaplanner",
    about = "Transcript reconciliation and GPA projection",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Use this catalog TOML instead of the configured one
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override config outbox directory
    #[arg(long = "outbox-dir", value_name = "DIR")]
    pub outbox_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override for that field.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &Option<PathBuf>| p.as_ref().map(|p| p.to_string_lossy().to_string());

        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: path_string(&self.config_log_file),
            verbose: self.config_verbose,
            catalog_file: path_string(&self.catalog),
            reports_dir: path_string(&self.reports_dir),
            outbox_dir: path_string(&self.outbox_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            catalog: None,
            reports_dir: None,
            outbox_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli(Command::Config { subcommand: None }).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.catalog_file.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.outbox_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut cli = bare_cli(Command::Catalog { electives: false });
        cli.config_level = Some(LogLevelArg::Debug);
        cli.config_log_file = Some(PathBuf::from("/tmp/test.log"));
        cli.config_verbose = Some(true);
        cli.catalog = Some(PathBuf::from("/data/cs.toml"));
        cli.reports_dir = Some(PathBuf::from("/out/reports"));
        cli.outbox_dir = Some(PathBuf::from("/out/outbox"));

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.catalog_file, Some("/data/cs.toml".to_string()));
        assert_eq!(overrides.reports_dir, Some("/out/reports".to_string()));
        assert_eq!(overrides.outbox_dir, Some("/out/outbox".to_string()));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("CO3021=A+"),
            Ok(("CO3021".to_string(), "A+".to_string()))
        );
        assert_eq!(
            parse_assignment(" MT1003 = B "),
            Ok(("MT1003".to_string(), "B".to_string()))
        );
        assert!(parse_assignment("MT1003").is_err());
        assert!(parse_assignment("=A").is_err());
        assert!(parse_assignment("MT1003=").is_err());
    }

    #[test]
    fn test_parse_analyze_command() {
        let cli = Cli::try_parse_from([
            "gpaplanner",
            "--outbox-dir",
            "/tmp/outbox",
            "analyze",
            "grades.json",
            "--set",
            "CO3021=A",
            "--set",
            "CO3023=B+",
            "--reset",
            "MT1003",
            "--target",
            "3.2",
            "--max-credits",
            "140",
            "--report",
            "md",
            "--no-notify",
        ])
        .expect("valid arguments");

        assert_eq!(cli.outbox_dir, Some(PathBuf::from("/tmp/outbox")));
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.input_file, PathBuf::from("grades.json"));
                assert_eq!(args.overrides.len(), 2);
                assert_eq!(args.overrides[1], ("CO3023".to_string(), "B+".to_string()));
                assert_eq!(args.resets, vec!["MT1003".to_string()]);
                assert_eq!(args.targets, vec![3.2]);
                assert_eq!(args.max_credits, Some(140));
                assert_eq!(args.report.as_deref(), Some("md"));
                assert!(args.no_notify);
            }
            other => panic!("expected analyze, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_project_command() {
        let cli = Cli::try_parse_from([
            "gpaplanner",
            "project",
            "--gpa",
            "3.0",
            "--credits",
            "64",
            "--target",
            "3.15",
        ])
        .expect("valid arguments");

        match cli.command {
            Command::Project {
                gpa,
                credits,
                targets,
                max_credits,
            } => {
                assert!((gpa - 3.0).abs() < f64::EPSILON);
                assert_eq!(credits, 64);
                assert_eq!(targets, vec![3.15]);
                assert!(max_credits.is_none());
            }
            other => panic!("expected project, got {other:?}"),
        }
    }
}
