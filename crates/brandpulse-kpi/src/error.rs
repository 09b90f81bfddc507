use thiserror::Error;

#[derive(Debug, Error)]
pub enum KpiError {
    #[error("KPI source error: {0}")]
    Source(String),

    #[error("invalid KPI observation: {0}")]
    InvalidObservation(String),
}
