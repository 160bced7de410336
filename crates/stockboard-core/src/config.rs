use crate::app_config::{AppConfig, DecodeMode};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a plain
/// `HashMap` without touching process state.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_root = parse_api_root(&or_default(
        "STOCKBOARD_API_ROOT",
        "https://bad-api-assignment.reaktor.com",
    ))?;
    let categories = parse_categories(&or_default(
        "STOCKBOARD_CATEGORIES",
        "jackets,shirts,accessories",
    ))?;
    let decode_mode = or_default("STOCKBOARD_DECODE_MODE", "lenient")
        .parse::<DecodeMode>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "STOCKBOARD_DECODE_MODE".to_string(),
            reason,
        })?;
    let force_error_mode = or_default("STOCKBOARD_FORCE_ERROR_MODE", "none");

    let request_timeout_secs = parse_u64("STOCKBOARD_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOCKBOARD_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let user_agent = or_default("STOCKBOARD_USER_AGENT", "stockboard/0.1 (inventory-board)");
    let max_retries = parse_u32("STOCKBOARD_MAX_RETRIES", "10")?;
    let retry_backoff_base_ms = parse_u64("STOCKBOARD_RETRY_BACKOFF_BASE_MS", "250")?;

    let output_path = PathBuf::from(or_default("STOCKBOARD_OUTPUT_PATH", "./stockboard.html"));
    let log_level = or_default("STOCKBOARD_LOG_LEVEL", "info");

    Ok(AppConfig {
        api_root,
        categories,
        decode_mode,
        force_error_mode,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        output_path,
        log_level,
    })
}

/// Validates the API root and strips any trailing slash so paths can be
/// appended with a single `/`.
fn parse_api_root(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOCKBOARD_API_ROOT".to_string(),
            reason: format!("\"{raw}\" is not an http(s) URL"),
        });
    }
    Ok(trimmed.to_string())
}

/// Splits a comma-separated category list, dropping blanks.
fn parse_categories(raw: &str) -> Result<Vec<String>, ConfigError> {
    let categories: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
        .collect();
    if categories.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOCKBOARD_CATEGORIES".to_string(),
            reason: "at least one category is required".to_string(),
        });
    }
    Ok(categories)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
