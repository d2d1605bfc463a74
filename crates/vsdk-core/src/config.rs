//! Environment Configuration Loader
//!
//! Both SDK facades read their settings from process environment variables
//! (`VSD_*` for the controller session, `VRS_*` for the OVSDB connection).
//! Deployments usually keep those in one file, `/etc/vsdk/environment`, which
//! is merged into the environment on demand.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vsdk_core::config::{get_config, load_environment};
//!
//! load_environment();
//! let socket = get_config("VRS_OVSDB_SOCKET", "/var/run/openvswitch/db.sock");
//! ```

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Default path for the environment file
pub const DEFAULT_ENV_FILE: &str = "/etc/vsdk/environment";

/// Variable naming a custom environment file, checked first
pub const ENV_FILE_OVERRIDE: &str = "VSDK_ENV_FILE";

/// Paths checked in order of priority
pub const ENV_FILE_PATHS: &[&str] = &[DEFAULT_ENV_FILE, "/etc/vsdk.env", ".env"];

/// Load environment variables from the canonical configuration file.
///
/// Checks `$VSDK_ENV_FILE`, then each of [`ENV_FILE_PATHS`]. Variables that
/// are already set are never overridden.
///
/// Returns the path that was loaded, or None if no file was found.
pub fn load_environment() -> Option<String> {
    if let Ok(custom_path) = std::env::var(ENV_FILE_OVERRIDE) {
        if let Some(path) = load_environment_from(&custom_path) {
            return Some(path);
        }
    }

    for path in ENV_FILE_PATHS {
        if let Some(loaded_path) = load_environment_from(path) {
            return Some(loaded_path);
        }
    }

    debug!("No environment file found, using existing environment");
    None
}

/// Load a specific environment file. Returns the path when it was read.
pub fn load_environment_from(path: &str) -> Option<String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return None;
    }

    match fs::read_to_string(path_obj) {
        Ok(content) => {
            let mut loaded_count = 0;
            let mut skipped_count = 0;

            for line in content.lines() {
                let line = line.trim();

                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = parse_env_line(line) {
                    if std::env::var(&key).is_err() {
                        std::env::set_var(&key, &value);
                        loaded_count += 1;
                        debug!("Loaded: {}={}", key, redact(&key, &value));
                    } else {
                        skipped_count += 1;
                        debug!("Skipped (already set): {}", key);
                    }
                }
            }

            info!(
                "Loaded {} environment variables from {} ({} skipped - already set)",
                loaded_count, path, skipped_count
            );

            Some(path.to_string())
        }
        Err(e) => {
            warn!("Failed to read environment file {}: {}", path, e);
            None
        }
    }
}

fn redact<'a>(key: &str, value: &'a str) -> &'a str {
    if key.contains("PASSWORD") || key.contains("KEY") || key.contains("TOKEN") {
        "***"
    } else {
        value
    }
}

/// Parse a single `KEY=VALUE` line, stripping one layer of quotes.
fn parse_env_line(line: &str) -> Option<(String, String)> {
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() {
        return None;
    }

    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);

    Some((key.to_string(), value.to_string()))
}

/// Get a configuration value with a default.
pub fn get_config(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an optional configuration value. Empty values count as unset.
pub fn get_config_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get a boolean configuration value.
pub fn get_config_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
        .unwrap_or(default)
}

/// Get an integer configuration value.
pub fn get_config_int(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
