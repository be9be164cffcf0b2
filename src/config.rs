//! Configuration module for `gpa-planner`

use crate::core::analysis::AnalysisOptions;
use crate::core::grades::GpaPolicy;
use crate::core::models::ProgramInfo;
use crate::core::projector::{ProjectionParams, DEFAULT_MAX_GRADE_POINT};
use crate::core::reconciler::DEFAULT_ELECTIVE_CAP;
use planner_logger::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory in path values
const DIR_VARIABLE: &str = "$GPA_PLANNER";

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Curriculum catalog TOML; empty uses the built-in catalog
    #[serde(default)]
    pub catalog_file: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
    /// Directory the redacted transcript is written to; empty disables it
    #[serde(default)]
    pub outbox_dir: String,
}

/// Target-GPA projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Credits needed to graduate; unset follows the catalog's `total_credits`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_credits: Option<u32>,
    /// Highest grade point on the scale
    #[serde(default = "default_max_grade_point")]
    pub max_grade_point: f64,
    /// Target GPAs reported by `analyze`
    #[serde(default)]
    pub targets: Vec<f64>,
}

const fn default_max_grade_point() -> f64 {
    DEFAULT_MAX_GRADE_POINT
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_credits: None,
            max_grade_point: DEFAULT_MAX_GRADE_POINT,
            targets: Vec::new(),
        }
    }
}

/// GPA policy settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Which courses form the GPA fraction
    #[serde(default)]
    pub gpa: GpaPolicy,
    /// Elective courses that keep their grade after ranking
    #[serde(default = "default_elective_cap")]
    pub elective_cap: usize,
}

const fn default_elective_cap() -> usize {
    DEFAULT_ELECTIVE_CAP
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            gpa: GpaPolicy::default(),
            elective_cap: DEFAULT_ELECTIVE_CAP,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Projection settings
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// GPA policy settings
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override catalog file
    pub catalog_file: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override notification outbox directory
    pub outbox_dir: Option<String>,
}

impl Config {
    /// Get the `$GPA_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gpaplanner`
    /// - macOS: `~/Library/Application Support/gpaplanner`
    /// - Windows: `%APPDATA%\gpaplanner`
    #[must_use]
    pub fn get_gpaplanner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gpaplanner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty in the current config and non-empty in
    /// defaults are updated, so new settings appear after an upgrade while
    /// user values stay put.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.catalog_file.is_empty() && !defaults.paths.catalog_file.is_empty() {
            self.paths
                .catalog_file
                .clone_from(&defaults.paths.catalog_file);
            changed = true;
        }
        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }
        if self.paths.outbox_dir.is_empty() && !defaults.paths.outbox_dir.is_empty() {
            self.paths.outbox_dir.clone_from(&defaults.paths.outbox_dir);
            changed = true;
        }

        if self.projection.targets.is_empty() && !defaults.projection.targets.is_empty() {
            self.projection
                .targets
                .clone_from(&defaults.projection.targets);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the config file is not
    /// touched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(catalog_file) = &overrides.catalog_file {
            self.paths.catalog_file.clone_from(catalog_file);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
        if let Some(outbox_dir) = &overrides.outbox_dir {
            self.paths.outbox_dir.clone_from(outbox_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, in
    /// the directory returned by [`get_gpaplanner_dir`].
    ///
    /// [`get_gpaplanner_dir`]: Self::get_gpaplanner_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gpaplanner_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$GPA_PLANNER` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_gpaplanner_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Path values have `$GPA_PLANNER` expanded. Missing fields use their
    /// serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.catalog_file = Self::expand_variables(&config.paths.catalog_file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);
        config.paths.outbox_dir = Self::expand_variables(&config.paths.outbox_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds use
    /// `DefaultCLIConfigRelease.toml`.
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file is merged with defaults and re-saved when new fields
    /// were added. On first run the defaults are written out. Any read or
    /// parse failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();

            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot
    /// be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `catalog_file`,
    /// `reports_dir`, `outbox_dir`, `max_credits`, `max_grade_point`,
    /// `targets` (comma-separated), `gpa_policy`, `elective_cap`. Dashes may
    /// stand in for underscores.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "catalog_file" => Some(self.paths.catalog_file.clone()),
            "reports_dir" => Some(self.paths.reports_dir.clone()),
            "outbox_dir" => Some(self.paths.outbox_dir.clone()),
            "max_credits" => Some(
                self.projection
                    .max_credits
                    .map_or_else(String::new, |n| n.to_string()),
            ),
            "max_grade_point" => Some(self.projection.max_grade_point.to_string()),
            "targets" => Some(
                self.projection
                    .targets
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "gpa_policy" => Some(self.policy.gpa.to_string()),
            "elective_cap" => Some(self.policy.elective_cap.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Values are validated and converted to the field's type. Call
    /// [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => {
                value.parse::<Level>()?;
                self.logging.level = value.to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "catalog_file" => self.paths.catalog_file = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "outbox_dir" => self.paths.outbox_dir = value.to_string(),
            "max_credits" => {
                let credits = value
                    .parse::<u32>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| format!("Invalid credit count for 'max_credits': '{value}'"))?;
                self.projection.max_credits = Some(credits);
            }
            "max_grade_point" => {
                self.projection.max_grade_point = value
                    .parse::<f64>()
                    .ok()
                    .filter(|&p| p > 0.0)
                    .ok_or_else(|| format!("Invalid grade point for 'max_grade_point': '{value}'"))?;
            }
            "targets" => self.projection.targets = parse_targets(value)?,
            "gpa_policy" => self.policy.gpa = value.parse()?,
            "elective_cap" => {
                self.policy.elective_cap = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid count for 'elective_cap': '{value}'"))?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "catalog_file" => self
                .paths
                .catalog_file
                .clone_from(&defaults.paths.catalog_file),
            "reports_dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "outbox_dir" => self.paths.outbox_dir.clone_from(&defaults.paths.outbox_dir),
            "max_credits" => self.projection.max_credits = defaults.projection.max_credits,
            "max_grade_point" => {
                self.projection.max_grade_point = defaults.projection.max_grade_point;
            }
            "targets" => self
                .projection
                .targets
                .clone_from(&defaults.projection.targets),
            "gpa_policy" => self.policy.gpa = defaults.policy.gpa,
            "elective_cap" => self.policy.elective_cap = defaults.policy.elective_cap,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds when there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Catalog file to load, if one is configured
    #[must_use]
    pub fn catalog_path(&self) -> Option<PathBuf> {
        if self.paths.catalog_file.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.paths.catalog_file))
        }
    }

    /// Graduation credit total for `program`: the configured `max_credits`
    /// when set, otherwise the program's `total_credits`
    #[must_use]
    pub fn max_credits_for(&self, program: &ProgramInfo) -> u32 {
        self.projection.max_credits.unwrap_or(program.total_credits)
    }

    /// Projector limits for `program`
    #[must_use]
    pub fn projection_params(&self, program: &ProgramInfo) -> ProjectionParams {
        ProjectionParams {
            max_credits: self.max_credits_for(program),
            max_grade_point: self.projection.max_grade_point,
        }
    }

    /// Engine options described by this config, projecting against `program`
    #[must_use]
    pub fn analysis_options(&self, program: &ProgramInfo) -> AnalysisOptions {
        AnalysisOptions {
            elective_cap: self.policy.elective_cap,
            policy: self.policy.gpa,
            projection: self.projection_params(program),
            targets: self.projection.targets.clone(),
        }
    }
}

/// Parse a comma-separated list of target GPAs
fn parse_targets(value: &str) -> Result<Vec<f64>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .ok()
                .filter(|t| (0.0..=DEFAULT_MAX_GRADE_POINT).contains(t))
                .ok_or_else(|| format!("Invalid target GPA: '{s}'"))
        })
        .collect()
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  catalog_file = \"{}\"", self.paths.catalog_file)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;
        writeln!(f, "  outbox_dir = \"{}\"", self.paths.outbox_dir)?;

        writeln!(f, "\n[projection]")?;
        match self.projection.max_credits {
            Some(credits) => writeln!(f, "  max_credits = {credits}")?,
            None => writeln!(f, "  max_credits = (catalog total_credits)")?,
        }
        writeln!(f, "  max_grade_point = {}", self.projection.max_grade_point)?;
        writeln!(f, "  targets = {:?}", self.projection.targets)?;

        writeln!(f, "\n[policy]")?;
        writeln!(f, "  gpa = \"{}\"", self.policy.gpa)?;
        writeln!(f, "  elective_cap = {}", self.policy.elective_cap)?;

        Ok(())
    }
}
