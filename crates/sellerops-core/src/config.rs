use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Upper bound for `SELLEROPS_DISPLAY_DECIMALS`.
pub const MAX_DISPLAY_DECIMALS: u32 = 10;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
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
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so tests can pass a `HashMap` lookup instead of touching the process env.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SELLEROPS_ENV", "development"))?;
    let log_level = or_default("SELLEROPS_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "SELLEROPS_CATALOG_PATH",
        "./config/catalog.yaml",
    ));
    let margin_presets = parse_margin_presets(&or_default("SELLEROPS_MARGIN_PRESETS", "20,30,40"))?;

    let display_decimals = parse_u32("SELLEROPS_DISPLAY_DECIMALS", "2")?;
    if display_decimals > MAX_DISPLAY_DECIMALS {
        return Err(ConfigError::InvalidEnvVar {
            var: "SELLEROPS_DISPLAY_DECIMALS".to_string(),
            reason: format!("must be at most {MAX_DISPLAY_DECIMALS}, got {display_decimals}"),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        margin_presets,
        display_decimals,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SELLEROPS_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

/// Parse a comma-separated list of margin percentages, e.g. `"20,30,40"`.
///
/// Each entry must be a non-negative decimal below 100. The list must not be
/// empty.
fn parse_margin_presets(raw: &str) -> Result<Vec<Decimal>, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "SELLEROPS_MARGIN_PRESETS".to_string(),
        reason,
    };

    let presets = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let pct = s
                .parse::<Decimal>()
                .map_err(|e| invalid(format!("'{s}': {e}")))?;
            if pct < Decimal::ZERO || pct >= Decimal::ONE_HUNDRED {
                return Err(invalid(format!("'{s}' must be in [0, 100)")));
            }
            Ok(pct)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if presets.is_empty() {
        return Err(invalid("at least one margin preset is required".to_string()));
    }
    Ok(presets)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
