//! Popularity index: one bounded score from heterogeneous engagement signals.

use serde::{Deserialize, Serialize};

const FOLLOWERS_WEIGHT: f64 = 0.30;
const ENGAGEMENT_WEIGHT: f64 = 0.25;
const VIEWS_WEIGHT: f64 = 0.20;
const LIKES_WEIGHT: f64 = 0.15;
const COMMENTS_WEIGHT: f64 = 0.10;

/// Engagement rate is stored as a fraction but weighted in percentage points.
const ENGAGEMENT_SCALE: f64 = 100.0;
const DIVISOR: f64 = 1000.0;
const MAX_INDEX: f64 = 100.0;

/// Raw engagement inputs. Absent signals count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementSignals {
    pub followers: Option<i64>,
    pub engagement_rate: Option<f64>,
    pub avg_views: Option<i64>,
    pub avg_likes: Option<i64>,
    pub avg_comments: Option<i64>,
}

/// Compute the popularity index for a set of engagement signals.
///
/// ```text
/// (followers*0.30 + engagement_rate*100*0.25 + views*0.20 + likes*0.15 + comments*0.10) / 1000
/// ```
///
/// The result is clamped to `[0, 100]`. Non-finite inputs are treated as zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn popularity_index(signals: &EngagementSignals) -> f64 {
    let count = |v: Option<i64>| v.map_or(0.0, |n| n as f64);
    let engagement = signals
        .engagement_rate
        .filter(|r| r.is_finite())
        .unwrap_or(0.0);

    let total = count(signals.followers) * FOLLOWERS_WEIGHT
        + engagement * ENGAGEMENT_SCALE * ENGAGEMENT_WEIGHT
        + count(signals.avg_views) * VIEWS_WEIGHT
        + count(signals.avg_likes) * LIKES_WEIGHT
        + count(signals.avg_comments) * COMMENTS_WEIGHT;

    (total / DIVISOR).clamp(0.0, MAX_INDEX)
}
