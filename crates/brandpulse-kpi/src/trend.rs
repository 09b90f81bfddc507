//! Trend labelling for a KPI series.
//!
//! The label compares the mean of the first half of the window with the mean of
//! the second half. It is a directional proxy, not a regression, and carries no
//! significance test.

use brandpulse_core::{KpiMetric, KpiObservation, TrendLabel};
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 30;

/// Percent change beyond which a series counts as moving.
const THRESHOLD_PCT: f64 = 5.0;

/// Label an ordered series of metric values.
///
/// Fewer than two values is `Stable`. The series is split at `len / 2` (the
/// extra element of an odd series goes to the second half). A zero first-half
/// mean is `Up` when the second-half mean is positive and `Stable` otherwise;
/// any other baseline is labelled by the percent change against `±5%`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn classify_values(values: &[f64]) -> TrendLabel {
    if values.len() < 2 {
        return TrendLabel::Stable;
    }

    let (first, second) = values.split_at(values.len() / 2);
    let mean = |half: &[f64]| half.iter().sum::<f64>() / half.len() as f64;
    let first_mean = mean(first);
    let second_mean = mean(second);

    if first_mean == 0.0 {
        return if second_mean > 0.0 {
            TrendLabel::Up
        } else {
            TrendLabel::Stable
        };
    }

    let percent_change = (second_mean - first_mean) / first_mean * 100.0;
    if percent_change > THRESHOLD_PCT {
        TrendLabel::Up
    } else if percent_change < -THRESHOLD_PCT {
        TrendLabel::Down
    } else {
        TrendLabel::Stable
    }
}

/// Start of the trailing window of `days` ending at `now`. Saturates at the
/// earliest representable instant when the window reaches past it.
#[must_use]
pub fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Label the trend of `metric` over the trailing `window_days` ending at `now`.
///
/// Observations before `now - window_days` are ignored; later ones, including
/// any dated after `now`, are ordered by timestamp, and observations missing
/// the metric are dropped.
#[must_use]
pub fn classify_trend(
    observations: &[KpiObservation],
    metric: KpiMetric,
    window_days: u32,
    now: DateTime<Utc>,
) -> TrendLabel {
    let cutoff = window_start(now, window_days);

    let mut in_window: Vec<&KpiObservation> = observations
        .iter()
        .filter(|o| o.timestamp >= cutoff)
        .collect();
    in_window.sort_by_key(|o| o.timestamp);

    let values: Vec<f64> = in_window
        .iter()
        .filter_map(|o| o.metric(metric))
        .collect();

    let label = classify_values(&values);
    tracing::debug!(
        %metric,
        window_days,
        points = values.len(),
        %label,
        "classified KPI trend"
    );
    label
}
