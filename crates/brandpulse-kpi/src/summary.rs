//! Per-brand KPI summaries and multi-brand comparison.

use brandpulse_core::KpiMetric;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};

use crate::error::KpiError;
use crate::source::KpiSource;
use crate::trend::{classify_trend, window_start};
use crate::types::{
    AnalyzerSettings, BrandComparison, KpiSnapshot, KpiStatistics, KpiSummary, KpiTrends,
};

/// Upper bound on brand summaries in flight during a comparison.
const MAX_CONCURRENT_SUMMARIES: usize = 8;

/// Composes KPI summaries from a [`KpiSource`]. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct KpiAnalyzer<S> {
    source: S,
    settings: AnalyzerSettings,
}

impl<S: KpiSource> KpiAnalyzer<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_settings(source, AnalyzerSettings::default())
    }

    #[must_use]
    pub fn with_settings(source: S, settings: AnalyzerSettings) -> Self {
        Self { source, settings }
    }

    /// Summarise one brand as of `now`.
    ///
    /// Trends cover the trailing trend window; statistics cover the trailing
    /// statistics window. A brand with no observations yields
    /// [`KpiSummary::empty`].
    ///
    /// # Errors
    ///
    /// Returns [`KpiError::Source`] if the source cannot be read.
    pub async fn summarize(
        &self,
        brand_id: i64,
        now: DateTime<Utc>,
    ) -> Result<KpiSummary, KpiError> {
        let Some(latest) = self.source.latest_observation(brand_id).await? else {
            tracing::debug!(brand_id, "no KPI observations; returning empty summary");
            return Ok(KpiSummary::empty());
        };

        let trend_days = self.settings.trend_window_days;
        let stats_days = self.settings.stats_window_days;
        let fetch_days = trend_days.max(stats_days);
        let history = self
            .source
            .observations_since(brand_id, window_start(now, fetch_days))
            .await?;

        let trends = KpiTrends {
            popularity_index: classify_trend(&history, KpiMetric::PopularityIndex, trend_days, now),
            followers: classify_trend(&history, KpiMetric::Followers, trend_days, now),
            engagement_rate: classify_trend(&history, KpiMetric::EngagementRate, trend_days, now),
        };

        let stats_cutoff = window_start(now, stats_days);
        let stats_window: Vec<_> = history
            .into_iter()
            .filter(|o| o.timestamp >= stats_cutoff)
            .collect();
        let statistics = KpiStatistics::from_observations(&stats_window);

        tracing::debug!(
            brand_id,
            stats_points = stats_window.len(),
            popularity_trend = %trends.popularity_index,
            "summarized brand KPIs"
        );

        Ok(KpiSummary {
            current: Some(KpiSnapshot::from(&latest)),
            trends,
            statistics: Some(statistics),
        })
    }

    /// Summarise each brand in `brand_ids`, preserving order and duplicates.
    ///
    /// A brand whose summary fails is logged and reported with the empty
    /// summary so one unreachable brand does not abort the batch.
    pub async fn compare_brands(
        &self,
        brand_ids: &[i64],
        now: DateTime<Utc>,
    ) -> Vec<BrandComparison> {
        let summaries: Vec<_> = stream::iter(brand_ids.iter().map(|&id| self.summarize(id, now)))
            .buffered(MAX_CONCURRENT_SUMMARIES)
            .collect()
            .await;

        brand_ids
            .iter()
            .zip(summaries)
            .map(|(&brand_id, result)| {
                let summary = result.unwrap_or_else(|e| {
                    tracing::warn!(brand_id, error = %e, "KPI summary failed; using empty summary");
                    KpiSummary::empty()
                });
                BrandComparison { brand_id, summary }
            })
            .collect()
    }
}
