//! Time-series collaborator the summary engine reads observations from.

use std::collections::HashMap;
use std::future::Future;

use brandpulse_core::KpiObservation;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::KpiError;
use crate::types::NewKpiObservation;

/// Read access to stored KPI observations.
///
/// Implementations own retries and connection handling; the engine calls each
/// method at most once per summary.
pub trait KpiSource: Send + Sync {
    /// Most recent observation for `brand_id`, regardless of age.
    fn latest_observation(
        &self,
        brand_id: i64,
    ) -> impl Future<Output = Result<Option<KpiObservation>, KpiError>> + Send;

    /// Observations for `brand_id` measured at or after `since`, oldest first.
    fn observations_since(
        &self,
        brand_id: i64,
        since: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<KpiObservation>, KpiError>> + Send;
}

/// Process-local observation store, keyed by brand.
#[derive(Debug, Default)]
pub struct InMemoryKpiSource {
    observations: RwLock<HashMap<i64, Vec<KpiObservation>>>,
}

impl InMemoryKpiSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `observations`.
    #[must_use]
    pub fn from_observations(observations: impl IntoIterator<Item = KpiObservation>) -> Self {
        let mut by_brand: HashMap<i64, Vec<KpiObservation>> = HashMap::new();
        for obs in observations {
            by_brand.entry(obs.brand_id).or_default().push(obs);
        }
        for series in by_brand.values_mut() {
            series.sort_by_key(|o| o.timestamp);
        }
        Self {
            observations: RwLock::new(by_brand),
        }
    }

    pub async fn insert(&self, observation: KpiObservation) {
        let mut guard = self.observations.write().await;
        let series = guard.entry(observation.brand_id).or_default();
        let pos = series.partition_point(|o| o.timestamp <= observation.timestamp);
        series.insert(pos, observation);
    }

    /// Record a new measurement at `measured_at`, computing its popularity index.
    ///
    /// # Errors
    ///
    /// Returns [`KpiError::InvalidObservation`] for out-of-range signals; the
    /// store is left untouched.
    pub async fn record(
        &self,
        new: NewKpiObservation,
        measured_at: DateTime<Utc>,
    ) -> Result<KpiObservation, KpiError> {
        let observation = new.try_into_observation(measured_at)?;
        tracing::info!(
            brand_id = observation.brand_id,
            popularity_index = observation.popularity_index,
            source = observation.source.as_deref(),
            "recorded KPI observation"
        );
        self.insert(observation.clone()).await;
        Ok(observation)
    }
}

impl KpiSource for InMemoryKpiSource {
    async fn latest_observation(&self, brand_id: i64) -> Result<Option<KpiObservation>, KpiError> {
        let guard = self.observations.read().await;
        Ok(guard
            .get(&brand_id)
            .and_then(|series| series.last().cloned()))
    }

    async fn observations_since(
        &self,
        brand_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<KpiObservation>, KpiError> {
        let guard = self.observations.read().await;
        Ok(guard
            .get(&brand_id)
            .map(|series| {
                series
                    .iter()
                    .filter(|o| o.timestamp >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::popularity::EngagementSignals;

    fn new_obs(brand_id: i64, followers: i64) -> NewKpiObservation {
        NewKpiObservation {
            brand_id,
            signals: EngagementSignals {
                followers: Some(followers),
                ..EngagementSignals::default()
            },
            source: Some("instagram".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn latest_is_newest_even_when_inserted_out_of_order() {
        let source = InMemoryKpiSource::new();
        let now = Utc::now();
        source.record(new_obs(1, 10), now).await.unwrap();
        source.record(new_obs(1, 20), now - Duration::days(3)).await.unwrap();

        let latest = source.latest_observation(1).await.unwrap().unwrap();
        assert_eq!(latest.followers, Some(10));
    }

    #[tokio::test]
    async fn observations_since_filters_and_orders() {
        let now = Utc::now();
        let source = InMemoryKpiSource::new();
        source.record(new_obs(1, 3), now).await.unwrap();
        source.record(new_obs(1, 1), now - Duration::days(40)).await.unwrap();
        source.record(new_obs(1, 2), now - Duration::days(10)).await.unwrap();
        source.record(new_obs(2, 99), now).await.unwrap();

        let window = source
            .observations_since(1, now - Duration::days(30))
            .await
            .unwrap();
        let followers: Vec<Option<i64>> = window.iter().map(|o| o.followers).collect();
        assert_eq!(followers, vec![Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn rejected_record_leaves_store_untouched() {
        let source = InMemoryKpiSource::new();
        let mut new = new_obs(1, 10);
        new.signals.engagement_rate = Some(7.5);

        assert!(matches!(
            source.record(new, Utc::now()).await,
            Err(KpiError::InvalidObservation(_))
        ));
        assert!(source.latest_observation(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_brand_has_no_observations() {
        let source = InMemoryKpiSource::new();
        assert!(source.latest_observation(404).await.unwrap().is_none());
        assert!(source
            .observations_since(404, Utc::now())
            .await
            .unwrap()
            .is_empty());
    }
}
