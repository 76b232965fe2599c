//! Default settings loader
//!
//! Loads the calendar default settings from environment variables or
//! files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Falls back to factory defaults when neither source exists
//!
//! Whatever the source, raw settings are opaque until
//! [`DefaultsConfig::parse`] re-validates them; stored settings are never
//! trusted to satisfy the scheduling invariants.
//!
//! ## Environment Variables
//! - `TIMEGRID_WORK_START`: default workday start (`HH:MM`)
//! - `TIMEGRID_WORK_END`: default workday end (`HH:MM`)
//! - `TIMEGRID_BREAK_START`: default break start (`HH:MM`)
//! - `TIMEGRID_BREAK_END`: default break end (`HH:MM`)
//! - `TIMEGRID_AUTO_BREAK`: attach the default break to full-workday
//!   proposals (true/false, default true)
//!
//! ## File Locations
//! The loader probes `config.{toml,json}` and `timegrid.{toml,json}` in
//! the current directory, its parents (2 levels), and next to the
//! executable.

use std::path::{Path, PathBuf};

use timegrid_domain::{CalendarDefaults, DefaultsConfig, Result, ScheduleError};

/// Load defaults with automatic fallback strategy
///
/// # Errors
/// Returns `ScheduleError::Config` when a source exists but does not
/// validate. A missing source is not an error; the factory defaults
/// apply.
pub fn load() -> Result<CalendarDefaults> {
    match load_from_env() {
        Ok(defaults) => {
            tracing::info!("calendar defaults loaded from environment variables");
            Ok(defaults)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "environment defaults unavailable, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("no defaults configured, using factory defaults");
                    DefaultsConfig::default().parse()
                }
            }
        }
    }
}

/// Load defaults from environment variables
///
/// All four time variables must be present; `TIMEGRID_AUTO_BREAK` is
/// optional and defaults to true.
///
/// # Errors
/// Returns `ScheduleError::Config` if a required variable is missing or
/// the resulting settings do not validate.
pub fn load_from_env() -> Result<CalendarDefaults> {
    let config = DefaultsConfig {
        default_work_start: env_var("TIMEGRID_WORK_START")?,
        default_work_end: env_var("TIMEGRID_WORK_END")?,
        default_break_start: env_var("TIMEGRID_BREAK_START")?,
        default_break_end: env_var("TIMEGRID_BREAK_END")?,
        auto_enable_break: env_bool("TIMEGRID_AUTO_BREAK", true),
    };
    config.parse()
}

/// Load defaults from a file
///
/// If `path` is `None`, probes the standard locations. Supports TOML and
/// JSON, detected by file extension.
///
/// # Errors
/// Returns `ScheduleError::Config` if the file is missing, malformed, or
/// fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<CalendarDefaults> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ScheduleError::Config(format!(
                    "settings file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ScheduleError::Config("no settings file found in any standard location".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading calendar defaults from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ScheduleError::Config(format!("failed to read settings file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse settings from string content; format detected by extension
fn parse_config(contents: &str, path: &Path) -> Result<CalendarDefaults> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    let config: DefaultsConfig = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ScheduleError::Config(format!("invalid TOML settings: {e}")))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| ScheduleError::Config(format!("invalid JSON settings: {e}")))?,
        _ => {
            return Err(ScheduleError::Config(format!(
                "unsupported settings format: {extension}"
            )))
        }
    };

    config.parse()
}

/// Probe the standard locations for a settings file
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for dir in [cwd.clone(), cwd.join(".."), cwd.join("../..")] {
            candidates.extend(candidate_files(&dir));
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.toml"),
        dir.join("config.json"),
        dir.join("timegrid.toml"),
        dir.join("timegrid.json"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| ScheduleError::Config(format!("missing environment variable: {key}")))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`
/// (case-insensitive). Returns `default` when unset.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
