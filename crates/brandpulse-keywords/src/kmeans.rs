//! Seeded k-means over TF-IDF rows, fitted with `linfa-clustering`.

use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use ndarray::{Array1, Array2};
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use crate::error::KeywordError;
use crate::types::ClusteringConfig;
use crate::vector::{distinct_rows, squared_distance};

const TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone)]
pub(crate) struct KMeansFit {
    pub labels: Vec<usize>,
    pub inertia: f64,
}

/// Partition `points` into exactly `k` non-empty clusters.
///
/// k-means++ seeding from a generator seeded with `config.seed`, repeated
/// `config.restarts` times; the lowest-inertia run is kept, so identical input
/// always yields identical labels.
pub(crate) fn fit(
    points: &[Vec<f64>],
    k: usize,
    config: &ClusteringConfig,
) -> Result<KMeansFit, KeywordError> {
    if k == 0 || points.len() < k {
        return Err(KeywordError::InvalidClusterCount);
    }
    if distinct_rows(points) < k {
        return Err(KeywordError::Degenerate(format!(
            "fewer than {k} distinct keyword vectors"
        )));
    }

    let data = to_array(points);
    let dataset = DatasetBase::from(data.clone());
    let rng = Xoshiro256Plus::seed_from_u64(config.seed);
    let model = KMeans::params_with_rng(k, rng)
        .n_runs(config.restarts.max(1))
        .max_n_iterations(u64::try_from(config.max_iterations.max(1)).unwrap_or(u64::MAX))
        .tolerance(TOLERANCE)
        .fit(&dataset)
        .map_err(|e| KeywordError::Degenerate(format!("k-means fit failed: {e}")))?;

    let predicted: Array1<usize> = model.predict(&data);
    let mut labels = predicted.to_vec();
    let centroids: Vec<Vec<f64>> = model
        .centroids()
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();
    fill_empty_clusters(points, &centroids, &mut labels, k);

    tracing::trace!(k, inertia = model.inertia(), "k-means model fitted");
    Ok(KMeansFit {
        labels,
        inertia: model.inertia(),
    })
}

fn to_array(points: &[Vec<f64>]) -> Array2<f64> {
    let dim = points.first().map_or(0, Vec::len);
    Array2::from_shape_fn((points.len(), dim), |(i, j)| points[i][j])
}

/// Move the point farthest from its centre into each empty cluster, taking
/// only from clusters that keep at least one member.
fn fill_empty_clusters(points: &[Vec<f64>], centroids: &[Vec<f64>], labels: &mut [usize], k: usize) {
    let mut counts = vec![0usize; k];
    for &l in labels.iter() {
        counts[l] += 1;
    }

    for empty in 0..k {
        if counts[empty] > 0 {
            continue;
        }
        let donor = (0..points.len())
            .filter(|&i| counts[labels[i]] > 1)
            .max_by(|&a, &b| {
                let da = squared_distance(&points[a], &centroids[labels[a]]);
                let db = squared_distance(&points[b], &centroids[labels[b]]);
                da.total_cmp(&db)
            });
        if let Some(i) = donor {
            counts[labels[i]] -= 1;
            labels[i] = empty;
            counts[empty] += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![5.0, 5.1],
        ]
    }

    #[test]
    fn separates_two_blobs() {
        let fit = fit(&blobs(), 2, &ClusteringConfig::default()).unwrap();
        assert_eq!(fit.labels[0], fit.labels[1]);
        assert_eq!(fit.labels[0], fit.labels[2]);
        assert_eq!(fit.labels[3], fit.labels[4]);
        assert_eq!(fit.labels[3], fit.labels[5]);
        assert_ne!(fit.labels[0], fit.labels[3]);
    }

    #[test]
    fn same_seed_same_labels() {
        let config = ClusteringConfig::default();
        let a = fit(&blobs(), 3, &config).unwrap();
        let b = fit(&blobs(), 3, &config).unwrap();
        assert_eq!(a.labels, b.labels);
    }

    #[test]
    fn any_seed_with_single_run_separates_blobs() {
        for seed in [0, 1, 7, 1_234_567] {
            let config = ClusteringConfig {
                seed,
                restarts: 1,
                ..ClusteringConfig::default()
            };
            let fit = fit(&blobs(), 2, &config).unwrap();
            assert_ne!(fit.labels[0], fit.labels[3], "seed {seed}");
            assert!(fit.inertia >= 0.0);
        }
    }

    #[test]
    fn every_cluster_is_non_empty() {
        let points: Vec<Vec<f64>> = (0..5)
            .map(|i| {
                let mut v = vec![0.0; 5];
                v[i] = 1.0;
                v
            })
            .collect();
        let fit = fit(&points, 4, &ClusteringConfig::default()).unwrap();
        for c in 0..4 {
            assert!(fit.labels.contains(&c), "cluster {c} is empty");
        }
    }

    #[test]
    fn identical_points_are_degenerate() {
        let points = vec![vec![1.0, 0.0]; 3];
        let err = fit(&points, 2, &ClusteringConfig::default()).unwrap_err();
        assert!(matches!(err, KeywordError::Degenerate(_)));
    }

    #[test]
    fn more_clusters_than_points_is_rejected() {
        let err = fit(&blobs(), 7, &ClusteringConfig::default()).unwrap_err();
        assert_eq!(err, KeywordError::InvalidClusterCount);
    }
}
