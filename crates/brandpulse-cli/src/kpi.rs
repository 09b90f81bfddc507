//! KPI command handlers for the CLI.
//!
//! Observation history is read from a JSON array of observations on disk and
//! served through the in-memory source, so the analyzer runs exactly as it
//! would against a live store.

use std::path::{Path, PathBuf};

use brandpulse_core::{AppConfig, KpiMetric, KpiObservation};
use brandpulse_kpi::{
    classify_trend, popularity_index, AnalyzerSettings, EngagementSignals, InMemoryKpiSource,
    KpiAnalyzer, NewKpiObservation,
};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use crate::print_json;

/// Sub-commands available under `kpi`.
#[derive(Debug, Subcommand)]
pub enum KpiCommands {
    /// Compute the popularity index for a set of engagement signals
    Popularity {
        #[command(flatten)]
        signals: SignalArgs,
    },
    /// Label the trend of one metric for a brand
    Trend {
        /// JSON file holding an array of observations
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        brand: i64,
        /// Metric to classify (e.g. `popularity_index`, `followers`)
        #[arg(long, default_value = "popularity_index")]
        metric: KpiMetric,
        /// Trailing window in days; defaults to the configured trend window
        #[arg(long)]
        window_days: Option<u32>,
        /// Reference instant (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Summarise current values, trends and statistics for a brand
    Summary {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        brand: i64,
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Summarise several brands side by side
    Compare {
        #[arg(long)]
        file: PathBuf,
        /// Comma-separated brand ids, reported in the given order
        #[arg(long, value_delimiter = ',', required = true)]
        brands: Vec<i64>,
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Append a new measurement to an observation file
    Record {
        /// Observation file; created when missing
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        brand: i64,
        #[command(flatten)]
        signals: SignalArgs,
        /// Where the numbers came from (defaults to `manual`)
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
}

/// Engagement signals accepted on the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct SignalArgs {
    #[arg(long)]
    pub followers: Option<i64>,
    /// Engagement rate as a fraction (0.05 = 5%)
    #[arg(long)]
    pub engagement_rate: Option<f64>,
    #[arg(long)]
    pub avg_views: Option<i64>,
    #[arg(long)]
    pub avg_likes: Option<i64>,
    #[arg(long)]
    pub avg_comments: Option<i64>,
}

impl From<SignalArgs> for EngagementSignals {
    fn from(args: SignalArgs) -> Self {
        Self {
            followers: args.followers,
            engagement_rate: args.engagement_rate,
            avg_views: args.avg_views,
            avg_likes: args.avg_likes,
            avg_comments: args.avg_comments,
        }
    }
}

/// Summary windows taken from the application config.
pub(crate) fn analyzer_settings(config: &AppConfig) -> AnalyzerSettings {
    AnalyzerSettings {
        trend_window_days: config.trend_window_days,
        stats_window_days: config.stats_window_days,
    }
}

/// Run a `kpi` sub-command.
///
/// # Errors
///
/// Returns an error if an observation file cannot be read, parsed or written,
/// or if the analyzer's source fails.
pub(crate) async fn run(config: &AppConfig, command: KpiCommands) -> anyhow::Result<()> {
    match command {
        KpiCommands::Popularity { signals } => {
            let index = popularity_index(&signals.into());
            print_json(&serde_json::json!({ "popularity_index": index }))
        }
        KpiCommands::Trend {
            file,
            brand,
            metric,
            window_days,
            now,
        } => {
            let observations: Vec<KpiObservation> = load_observations(&file)?
                .into_iter()
                .filter(|o| o.brand_id == brand)
                .collect();
            let window_days = window_days.unwrap_or(config.trend_window_days);
            let trend = classify_trend(
                &observations,
                metric,
                window_days,
                now.unwrap_or_else(Utc::now),
            );
            print_json(&serde_json::json!({
                "brand_id": brand,
                "metric": metric,
                "window_days": window_days,
                "trend": trend,
            }))
        }
        KpiCommands::Summary { file, brand, now } => {
            let analyzer = analyzer_for(config, &file)?;
            let summary = analyzer
                .summarize(brand, now.unwrap_or_else(Utc::now))
                .await?;
            print_json(&summary)
        }
        KpiCommands::Compare { file, brands, now } => {
            let analyzer = analyzer_for(config, &file)?;
            let comparison = analyzer
                .compare_brands(&brands, now.unwrap_or_else(Utc::now))
                .await;
            print_json(&comparison)
        }
        KpiCommands::Record {
            file,
            brand,
            signals,
            source,
            notes,
        } => {
            let mut observations = if file.exists() {
                load_observations(&file)?
            } else {
                Vec::new()
            };
            let recorded = record_observation(
                NewKpiObservation {
                    brand_id: brand,
                    signals: signals.into(),
                    source,
                    notes,
                },
                Utc::now(),
            )?;
            observations.push(recorded.clone());
            save_observations(&file, &observations)?;
            print_json(&recorded)
        }
    }
}

/// Validate a new measurement and materialise it at `measured_at`.
///
/// # Errors
///
/// Returns an error if any signal is out of range.
pub(crate) fn record_observation(
    new: NewKpiObservation,
    measured_at: DateTime<Utc>,
) -> anyhow::Result<KpiObservation> {
    let observation = new
        .try_into_observation(measured_at)
        .map_err(|e| anyhow::anyhow!("failed to record observation: {e}"))?;
    tracing::info!(
        brand_id = observation.brand_id,
        popularity_index = observation.popularity_index,
        source = observation.source.as_deref(),
        "recorded KPI observation"
    );
    Ok(observation)
}

fn analyzer_for(
    config: &AppConfig,
    file: &Path,
) -> anyhow::Result<KpiAnalyzer<InMemoryKpiSource>> {
    let source = InMemoryKpiSource::from_observations(load_observations(file)?);
    Ok(KpiAnalyzer::with_settings(source, analyzer_settings(config)))
}

/// Read a JSON array of observations.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid observation array.
pub(crate) fn load_observations(path: &Path) -> anyhow::Result<Vec<KpiObservation>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    parse_observations(&raw)
        .map_err(|e| anyhow::anyhow!("invalid observations in {}: {e}", path.display()))
}

pub(crate) fn parse_observations(raw: &str) -> serde_json::Result<Vec<KpiObservation>> {
    serde_json::from_str(raw)
}

fn save_observations(path: &Path, observations: &[KpiObservation]) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(observations)
        .map_err(|e| anyhow::anyhow!("failed to serialise observations: {e}"))?;
    std::fs::write(path, rendered)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), count = observations.len(), "saved observations");
    Ok(())
}
