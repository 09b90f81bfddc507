//! Popularity and trend analytics for brand KPIs.
//!
//! Derives a bounded popularity index from raw engagement signals, labels the
//! direction of a metric over a trailing window, and composes per-brand KPI
//! summaries from observations supplied by a [`KpiSource`].

pub mod error;
pub mod popularity;
pub mod source;
pub mod summary;
pub mod trend;
pub mod types;

pub use error::KpiError;
pub use popularity::{popularity_index, EngagementSignals};
pub use source::{InMemoryKpiSource, KpiSource};
pub use summary::KpiAnalyzer;
pub use trend::{classify_trend, classify_values, window_start, DEFAULT_TREND_WINDOW_DAYS};
pub use types::{
    AnalyzerSettings, BrandComparison, KpiSnapshot, KpiStatistics, KpiSummary, KpiTrends,
    NewKpiObservation,
};
