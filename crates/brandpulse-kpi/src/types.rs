use brandpulse_core::{KpiObservation, TrendLabel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::KpiError;
use crate::popularity::{popularity_index, EngagementSignals};
use crate::trend::DEFAULT_TREND_WINDOW_DAYS;

const DEFAULT_STATS_WINDOW_DAYS: u32 = 90;

/// Input for recording a fresh KPI measurement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewKpiObservation {
    pub brand_id: i64,
    #[serde(flatten)]
    pub signals: EngagementSignals,
    /// Defaults to `manual` when absent.
    pub source: Option<String>,
    pub notes: Option<String>,
}

impl NewKpiObservation {
    /// Materialise the observation at `measured_at`, computing its popularity index.
    ///
    /// The generic `value` carries the same popularity index under the
    /// `social_media` KPI type.
    ///
    /// # Errors
    ///
    /// Returns [`KpiError::InvalidObservation`] when the engagement rate is not
    /// a finite fraction in `[0, 1]` or a count is negative.
    pub fn try_into_observation(
        self,
        measured_at: DateTime<Utc>,
    ) -> Result<KpiObservation, KpiError> {
        self.validate()?;
        let index = popularity_index(&self.signals);
        Ok(KpiObservation {
            brand_id: self.brand_id,
            timestamp: measured_at,
            kpi_type: "social_media".to_string(),
            value: index,
            followers: self.signals.followers,
            engagement_rate: self.signals.engagement_rate,
            avg_views: self.signals.avg_views,
            avg_likes: self.signals.avg_likes,
            avg_comments: self.signals.avg_comments,
            popularity_index: Some(index),
            source: Some(self.source.unwrap_or_else(|| "manual".to_string())),
            notes: self.notes,
        })
    }

    fn validate(&self) -> Result<(), KpiError> {
        if let Some(rate) = self.signals.engagement_rate {
            if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
                return Err(KpiError::InvalidObservation(format!(
                    "engagement_rate must be a fraction in [0, 1], got {rate}"
                )));
            }
        }
        let counts = [
            ("followers", self.signals.followers),
            ("avg_views", self.signals.avg_views),
            ("avg_likes", self.signals.avg_likes),
            ("avg_comments", self.signals.avg_comments),
        ];
        for (field, value) in counts {
            if let Some(n) = value.filter(|n| *n < 0) {
                return Err(KpiError::InvalidObservation(format!(
                    "{field} must not be negative, got {n}"
                )));
            }
        }
        Ok(())
    }
}

/// The most recent observation for a brand, as presented in a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub popularity_index: Option<f64>,
    pub followers: Option<i64>,
    pub engagement_rate: Option<f64>,
    pub avg_views: Option<i64>,
    pub avg_likes: Option<i64>,
    pub avg_comments: Option<i64>,
    pub measurement_date: DateTime<Utc>,
}

impl From<&KpiObservation> for KpiSnapshot {
    fn from(obs: &KpiObservation) -> Self {
        Self {
            popularity_index: obs.popularity_index,
            followers: obs.followers,
            engagement_rate: obs.engagement_rate,
            avg_views: obs.avg_views,
            avg_likes: obs.avg_likes,
            avg_comments: obs.avg_comments,
            measurement_date: obs.timestamp,
        }
    }
}

/// Trend labels for the headline metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiTrends {
    pub popularity_index: TrendLabel,
    pub followers: TrendLabel,
    pub engagement_rate: TrendLabel,
}

/// Aggregates over the statistics window. Absent aggregates read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiStatistics {
    pub avg_popularity: f64,
    pub max_popularity: f64,
    pub min_popularity: f64,
    /// Mean follower count, truncated toward zero.
    pub avg_followers: i64,
    pub avg_engagement: f64,
}

impl KpiStatistics {
    /// Aggregate the observations of one window. Fields missing on an
    /// observation are skipped rather than counted as zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn from_observations(observations: &[KpiObservation]) -> Self {
        let popularity: Vec<f64> = observations
            .iter()
            .filter_map(|o| o.popularity_index)
            .collect();
        let followers: Vec<f64> = observations
            .iter()
            .filter_map(|o| o.followers.map(|f| f as f64))
            .collect();
        let engagement: Vec<f64> = observations
            .iter()
            .filter_map(|o| o.engagement_rate)
            .collect();

        let mean = |values: &[f64]| {
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        };

        Self {
            avg_popularity: mean(&popularity),
            max_popularity: popularity.iter().copied().reduce(f64::max).unwrap_or(0.0),
            min_popularity: popularity.iter().copied().reduce(f64::min).unwrap_or(0.0),
            avg_followers: mean(&followers).trunc() as i64,
            avg_engagement: mean(&engagement),
        }
    }
}

/// KPI overview for one brand.
///
/// A brand with no observations yields `current = None`, all trends
/// `Stable`, and `statistics = None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub current: Option<KpiSnapshot>,
    pub trends: KpiTrends,
    pub statistics: Option<KpiStatistics>,
}

impl KpiSummary {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandComparison {
    pub brand_id: i64,
    pub summary: KpiSummary,
}

/// Window lengths used when composing summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerSettings {
    pub trend_window_days: u32,
    pub stats_window_days: u32,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            trend_window_days: DEFAULT_TREND_WINDOW_DAYS,
            stats_window_days: DEFAULT_STATS_WINDOW_DAYS,
        }
    }
}
