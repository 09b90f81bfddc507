//! Keyword clustering entry point.

use crate::error::KeywordError;
use crate::types::{ClusterMethod, ClusterResult, ClusteringConfig, KeywordCluster};
use crate::vectorizer::TfidfVectorizer;
use crate::vector::{cosine_similarity, distinct_rows, mean_of};
use crate::{hierarchical, kmeans};

/// Groups keywords into clusters. Stateless between calls: every call builds
/// its own feature space and discards it on return.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClusterer {
    config: ClusteringConfig,
}

impl KeywordClusterer {
    #[must_use]
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    /// Cluster `keywords` using the strategy named by `method`
    /// (`kmeans` or `hierarchical`).
    ///
    /// Never fails: an unknown method, fewer than two keywords, or degenerate
    /// input produce a result with `success == false`, no clusters, and an
    /// `error` message.
    pub fn cluster<S: AsRef<str>>(
        &self,
        keywords: &[S],
        num_clusters: usize,
        method: &str,
    ) -> ClusterResult {
        if keywords.len() < 2 {
            let err = KeywordError::InsufficientKeywords {
                found: keywords.len(),
            };
            return failure(method, num_clusters, keywords.len(), &err);
        }
        if num_clusters == 0 {
            let err = KeywordError::InvalidClusterCount;
            return failure(method, num_clusters, keywords.len(), &err);
        }
        match method.parse::<ClusterMethod>() {
            Ok(m) => self.cluster_with(keywords, num_clusters, m),
            Err(err) => failure(
                method,
                adjusted_cluster_count(num_clusters, keywords.len()),
                keywords.len(),
                &err,
            ),
        }
    }

    /// Cluster `keywords` with an already-parsed strategy. Never fails; see
    /// [`KeywordClusterer::cluster`].
    pub fn cluster_with<S: AsRef<str>>(
        &self,
        keywords: &[S],
        num_clusters: usize,
        method: ClusterMethod,
    ) -> ClusterResult {
        let keywords: Vec<&str> = keywords.iter().map(AsRef::as_ref).collect();
        let k = adjusted_cluster_count(num_clusters, keywords.len());

        match self.try_cluster(&keywords, k, method) {
            Ok(result) => {
                tracing::info!(
                    %method,
                    keywords = keywords.len(),
                    clusters = result.clusters.len(),
                    "clustered keywords"
                );
                result
            }
            Err(err) => failure(method.as_str(), k, keywords.len(), &err),
        }
    }

    fn try_cluster(
        &self,
        keywords: &[&str],
        k: usize,
        method: ClusterMethod,
    ) -> Result<ClusterResult, KeywordError> {
        if keywords.len() < 2 {
            return Err(KeywordError::InsufficientKeywords {
                found: keywords.len(),
            });
        }
        if k == 0 {
            return Err(KeywordError::InvalidClusterCount);
        }

        // Join internal spaces so a multi-word keyword stays one feature.
        let documents: Vec<String> = keywords.iter().map(|kw| kw.replace(' ', "_")).collect();
        let matrix = TfidfVectorizer::unigrams_and_bigrams()
            .with_max_features(self.config.max_features)
            .fit_transform(&documents)?;

        let distinct = distinct_rows(&matrix.rows);
        if distinct < k {
            return Err(KeywordError::Degenerate(format!(
                "{distinct} distinct keyword vectors cannot form {k} clusters"
            )));
        }

        let (labels, linkage_matrix) = match method {
            ClusterMethod::KMeans => {
                let fit = kmeans::fit(&matrix.rows, k, &self.config)?;
                tracing::debug!(inertia = fit.inertia, k, "k-means fit selected");
                (fit.labels, None)
            }
            ClusterMethod::Hierarchical => {
                let steps = hierarchical::ward_linkage(&matrix.rows);
                let labels = hierarchical::cut_tree(keywords.len(), &steps, k);
                (labels, Some(steps))
            }
        };

        let mut clusters = build_clusters(keywords, &matrix.rows, &labels);
        if method == ClusterMethod::Hierarchical {
            for cluster in &mut clusters {
                cluster.linkage_method = Some("ward".to_string());
            }
        }
        clusters.sort_by(|a, b| b.size.cmp(&a.size));

        Ok(ClusterResult {
            method: method.as_str().to_string(),
            num_clusters: k,
            num_keywords: keywords.len(),
            clusters,
            linkage_matrix,
            success: true,
            error: None,
        })
    }
}

/// Requesting at least as many clusters as keywords would leave every cluster
/// a singleton, so the count drops to `max(2, n / 2)`.
fn adjusted_cluster_count(requested: usize, keyword_count: usize) -> usize {
    if requested >= keyword_count {
        (keyword_count / 2).max(2)
    } else {
        requested
    }
}

/// Group keywords by label, in order of each label's first keyword, and score
/// every group against its mean vector.
fn build_clusters(keywords: &[&str], rows: &[Vec<f64>], labels: &[usize]) -> Vec<KeywordCluster> {
    let mut order: Vec<usize> = Vec::new();
    for &label in labels {
        if !order.contains(&label) {
            order.push(label);
        }
    }

    order
        .into_iter()
        .map(|label| {
            let members: Vec<usize> = (0..labels.len()).filter(|&i| labels[i] == label).collect();
            let centroid = mean_of(rows, &members);
            let similarities: Vec<f64> = members
                .iter()
                .map(|&i| cosine_similarity(&rows[i], &centroid))
                .collect();

            let mut representative = members[0];
            let mut best = f64::NEG_INFINITY;
            for (&i, &s) in members.iter().zip(&similarities) {
                if s > best {
                    best = s;
                    representative = i;
                }
            }

            #[allow(clippy::cast_precision_loss)]
            let coherence = similarities.iter().sum::<f64>() / similarities.len() as f64;

            KeywordCluster {
                cluster_id: label,
                representative_keyword: keywords[representative].to_string(),
                keywords: members.iter().map(|&i| keywords[i].to_string()).collect(),
                coherence_score: round3(coherence),
                size: members.len(),
                linkage_method: None,
            }
        })
        .collect()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn failure(method: &str, num_clusters: usize, num_keywords: usize, err: &KeywordError) -> ClusterResult {
    tracing::warn!(method, num_keywords, error = %err, "keyword clustering failed");
    ClusterResult::failure(method, num_clusters, num_keywords, err)
}

#[cfg(test)]
#[path = "clusterer_test.rs"]
mod tests;
