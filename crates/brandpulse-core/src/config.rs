use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but malformed.
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
/// Returns `ConfigError` if any value is present but malformed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; parsing is decoupled from the real environment
/// so tests can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32_min1 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<u32>().map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize_min1 = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("BRANDPULSE_ENV", "development"));
    let log_level = or_default("BRANDPULSE_LOG_LEVEL", "info");

    let trend_window_days = parse_u32_min1("BRANDPULSE_TREND_WINDOW_DAYS", "30")?;
    let stats_window_days = parse_u32_min1("BRANDPULSE_STATS_WINDOW_DAYS", "90")?;

    let cluster_count = parse_usize_min1("BRANDPULSE_CLUSTER_COUNT", "5")?;
    let cluster_method = or_default("BRANDPULSE_CLUSTER_METHOD", "kmeans").to_lowercase();
    if !matches!(cluster_method.as_str(), "kmeans" | "hierarchical") {
        return Err(invalid(
            "BRANDPULSE_CLUSTER_METHOD",
            format!("expected 'kmeans' or 'hierarchical', got '{cluster_method}'"),
        ));
    }

    let kmeans_seed = parse_u64("BRANDPULSE_KMEANS_SEED", "42")?;
    let kmeans_restarts = parse_usize_min1("BRANDPULSE_KMEANS_RESTARTS", "10")?;
    let kmeans_max_iterations = parse_usize_min1("BRANDPULSE_KMEANS_MAX_ITERATIONS", "300")?;
    let max_features = parse_usize_min1("BRANDPULSE_MAX_FEATURES", "100")?;
    let similar_top_n = parse_usize_min1("BRANDPULSE_SIMILAR_TOP_N", "5")?;
    let phrase_top_n = parse_usize_min1("BRANDPULSE_PHRASE_TOP_N", "10")?;

    Ok(AppConfig {
        env,
        log_level,
        trend_window_days,
        stats_window_days,
        cluster_count,
        cluster_method,
        kmeans_seed,
        kmeans_restarts,
        kmeans_max_iterations,
        max_features,
        similar_top_n,
        phrase_top_n,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
