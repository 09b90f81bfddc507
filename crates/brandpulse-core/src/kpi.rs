//! Brand KPI domain values shared by the analytics crates.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// One immutable KPI measurement for a brand at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiObservation {
    pub brand_id: i64,
    #[serde(alias = "measurement_date")]
    pub timestamp: DateTime<Utc>,
    /// Free-form KPI category, e.g. `social_media`.
    #[serde(default = "default_kpi_type")]
    pub kpi_type: String,
    /// Generic measurement value for the KPI category.
    #[serde(default)]
    pub value: f64,
    pub followers: Option<i64>,
    /// Fraction in `[0, 1]` when present.
    pub engagement_rate: Option<f64>,
    pub avg_views: Option<i64>,
    pub avg_likes: Option<i64>,
    pub avg_comments: Option<i64>,
    /// Derived score in `[0, 100]` once computed.
    pub popularity_index: Option<f64>,
    /// Where the measurement came from: `manual`, `youtube`, `tiktok`, `instagram`.
    pub source: Option<String>,
    pub notes: Option<String>,
}

fn default_kpi_type() -> String {
    "social_media".to_string()
}

impl KpiObservation {
    /// Read the selected metric, or `None` when the field is absent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn metric(&self, metric: KpiMetric) -> Option<f64> {
        match metric {
            KpiMetric::PopularityIndex => self.popularity_index,
            KpiMetric::Followers => self.followers.map(|v| v as f64),
            KpiMetric::EngagementRate => self.engagement_rate,
            KpiMetric::AvgViews => self.avg_views.map(|v| v as f64),
            KpiMetric::AvgLikes => self.avg_likes.map(|v| v as f64),
            KpiMetric::AvgComments => self.avg_comments.map(|v| v as f64),
            KpiMetric::Value => Some(self.value),
        }
    }
}

/// Which observation field a trend is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiMetric {
    PopularityIndex,
    Followers,
    EngagementRate,
    AvgViews,
    AvgLikes,
    AvgComments,
    /// The generic `value` column.
    Value,
}

impl KpiMetric {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            KpiMetric::PopularityIndex => "popularity_index",
            KpiMetric::Followers => "followers",
            KpiMetric::EngagementRate => "engagement_rate",
            KpiMetric::AvgViews => "avg_views",
            KpiMetric::AvgLikes => "avg_likes",
            KpiMetric::AvgComments => "avg_comments",
            KpiMetric::Value => "value",
        }
    }
}

impl std::fmt::Display for KpiMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KpiMetric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "popularity_index" => Ok(KpiMetric::PopularityIndex),
            "followers" => Ok(KpiMetric::Followers),
            "engagement_rate" => Ok(KpiMetric::EngagementRate),
            "avg_views" => Ok(KpiMetric::AvgViews),
            "avg_likes" => Ok(KpiMetric::AvgLikes),
            "avg_comments" => Ok(KpiMetric::AvgComments),
            "value" => Ok(KpiMetric::Value),
            other => Err(CoreError::UnknownMetric(other.to_string())),
        }
    }
}

/// Direction of change of a metric across a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Up,
    Down,
    #[default]
    Stable,
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendLabel::Up => write!(f, "up"),
            TrendLabel::Down => write!(f, "down"),
            TrendLabel::Stable => write!(f, "stable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation() -> KpiObservation {
        KpiObservation {
            brand_id: 7,
            timestamp: Utc::now(),
            kpi_type: "social_media".to_string(),
            value: 3.5,
            followers: Some(1200),
            engagement_rate: None,
            avg_views: Some(400),
            avg_likes: None,
            avg_comments: Some(12),
            popularity_index: Some(0.5),
            source: Some("manual".to_string()),
            notes: None,
        }
    }

    #[test]
    fn metric_reads_present_fields() {
        let obs = observation();
        assert_eq!(obs.metric(KpiMetric::Followers), Some(1200.0));
        assert_eq!(obs.metric(KpiMetric::PopularityIndex), Some(0.5));
        assert_eq!(obs.metric(KpiMetric::Value), Some(3.5));
    }

    #[test]
    fn metric_absent_field_is_none() {
        let obs = observation();
        assert_eq!(obs.metric(KpiMetric::EngagementRate), None);
        assert_eq!(obs.metric(KpiMetric::AvgLikes), None);
    }

    #[test]
    fn metric_round_trips_through_str() {
        for metric in [
            KpiMetric::PopularityIndex,
            KpiMetric::Followers,
            KpiMetric::EngagementRate,
            KpiMetric::AvgViews,
            KpiMetric::AvgLikes,
            KpiMetric::AvgComments,
            KpiMetric::Value,
        ] {
            assert_eq!(metric.as_str().parse::<KpiMetric>().unwrap(), metric);
        }
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let err = "reach".parse::<KpiMetric>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownMetric(ref m) if m == "reach"));
    }

    #[test]
    fn trend_label_serializes_lowercase() {
        let json = serde_json::to_string(&TrendLabel::Down).unwrap();
        assert_eq!(json, "\"down\"");
        assert_eq!(TrendLabel::default(), TrendLabel::Stable);
    }

    #[test]
    fn observation_deserializes_with_defaults() {
        let json = r#"{"brand_id": 3, "measurement_date": "2026-01-05T00:00:00Z", "followers": 10}"#;
        let obs: KpiObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.brand_id, 3);
        assert_eq!(obs.kpi_type, "social_media");
        assert_eq!(obs.followers, Some(10));
        assert!(obs.popularity_index.is_none());
        assert!((obs.value - 0.0).abs() < f64::EPSILON);
    }
}
