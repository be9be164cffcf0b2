//! Config command handler
//!
//! `get` shows the effective settings, including the catalog they resolve to.
//! `set` and `unset` validate, save, and echo the value as it was stored.

use crate::args::ConfigSubcommand;
use gpa_planner::config::Config;
use gpa_planner::core::catalog::Catalog;
use planner_logger::{error, info};
use std::io::{self, BufRead, Write};

/// Dispatch config subcommands. Returns `false` when it failed.
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> bool {
    let result = match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => show_key(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => {
            update(config, &key, |c| c.set(&key, &value)).map(|stored| {
                println!("✓ Set {key} = {}", display_value(&key, &stored));
            })
        }
        Some(ConfigSubcommand::Unset { key }) => {
            update(config, &key, |c| c.unset(&key, defaults)).map(|stored| {
                println!("✓ Reset {key} to default ({})", display_value(&key, &stored));
            })
        }
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            error!("Config command failed: {e}");
            eprintln!("✗ {e}");
            false
        }
    }
}

/// Print every setting plus the catalog and credit total they resolve to
fn show_all(config: &Config) {
    println!("\n=== Configuration ===\n");
    print!("{config}");
    println!("\n[effective]");
    println!("  {}", catalog_line(config));
}

fn show_key(config: &Config, key: &str) -> Result<(), String> {
    let value = config
        .get(key)
        .ok_or_else(|| format!("Unknown config key: '{key}'"))?;
    println!("{}", display_value(key, &value));
    Ok(())
}

/// Apply `change`, persist, and return the stored value of `key`
fn update(
    config: &mut Config,
    key: &str,
    change: impl FnOnce(&mut Config) -> Result<(), String>,
) -> Result<String, String> {
    change(config)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!("Config key '{key}' saved");
    config
        .get(key)
        .ok_or_else(|| format!("Unknown config key: '{key}'"))
}

/// Human form of a stored value; empty values name what they fall back to
fn display_value(key: &str, value: &str) -> String {
    if !value.is_empty() {
        return value.to_string();
    }
    match key.replace('-', "_").as_str() {
        "catalog_file" => "(built-in catalog)".to_string(),
        "max_credits" => "(catalog total_credits)".to_string(),
        "outbox_dir" => "(outbox disabled)".to_string(),
        "targets" => "(none)".to_string(),
        _ => "(empty)".to_string(),
    }
}

/// Describe the active catalog and the graduation total projections use
fn catalog_line(config: &Config) -> String {
    let source = config
        .catalog_path()
        .map_or_else(|| "built-in".to_string(), |p| p.display().to_string());
    match Catalog::load(config.catalog_path().as_deref()) {
        Ok(catalog) => format!(
            "catalog = \"{source}\" ({}), max_credits = {}",
            catalog.program.name,
            config.max_credits_for(&catalog.program)
        ),
        Err(e) => format!("catalog = \"{source}\" (unreadable: {e})"),
    }
}

/// Delete the config file after a y/yes answer read from `input`
fn reset(input: &mut impl BufRead) -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    input.read_line(&mut response).ok();
    if !confirmed(&response) {
        println!("✗ Reset cancelled");
        return Ok(());
    }

    Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
    println!("✓ Config reset to defaults");
    Ok(())
}

fn confirmed(response: &str) -> bool {
    let answer = response.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
