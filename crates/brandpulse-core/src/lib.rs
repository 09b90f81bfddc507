mod app_config;
mod config;
pub mod kpi;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use kpi::{KpiMetric, KpiObservation, TrendLabel};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown KPI metric: {0}")]
    UnknownMetric(String),
}
