use crate::app_config::AppConfig;
use crate::severity::{SeverityThresholds, DEFAULT_RED_THRESHOLD, DEFAULT_YELLOW_THRESHOLD};
use crate::ConfigError;

pub const DEFAULT_LOCATOR_URL: &str = "https://locations.wafflehouse.com/";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://api.zippopotam.us/us/";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or the severity
/// thresholds are inconsistent.
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
/// Returns `ConfigError` if a value cannot be parsed or the severity
/// thresholds are inconsistent.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load only the severity thresholds from environment variables already in
/// the process. Other settings are not read, so a bad timeout or URL does not
/// affect commands that only classify.
///
/// # Errors
///
/// Returns `ConfigError` if a threshold cannot be parsed or the pair is
/// inconsistent.
pub fn load_thresholds_from_env() -> Result<SeverityThresholds, ConfigError> {
    build_thresholds(&|key: &str| std::env::var(key))
}

/// Parse and validate configuration through an env-var lookup function, so
/// tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let locator_url = or_default("WHI_LOCATOR_URL", DEFAULT_LOCATOR_URL);
    let log_level = or_default("WHI_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("WHI_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("WHI_USER_AGENT", DEFAULT_USER_AGENT);
    let geocode_base_url = or_default("WHI_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL);
    let thresholds = build_thresholds(&lookup)?;

    Ok(AppConfig {
        locator_url,
        log_level,
        request_timeout_secs,
        user_agent,
        thresholds,
        geocode_base_url,
    })
}

fn build_thresholds<F>(lookup: &F) -> Result<SeverityThresholds, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let parse_fraction = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    };

    let red = parse_fraction("WHI_RED_THRESHOLD", DEFAULT_RED_THRESHOLD)?;
    let yellow = parse_fraction("WHI_YELLOW_THRESHOLD", DEFAULT_YELLOW_THRESHOLD)?;
    SeverityThresholds::new(red, yellow)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
