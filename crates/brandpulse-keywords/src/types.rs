use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeywordError;

/// Clustering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterMethod {
    /// Flat partition minimising within-cluster variance.
    #[default]
    KMeans,
    /// Agglomerative Ward linkage over cosine distance.
    Hierarchical,
}

impl ClusterMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ClusterMethod::KMeans => "kmeans",
            ClusterMethod::Hierarchical => "hierarchical",
        }
    }
}

impl std::fmt::Display for ClusterMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusterMethod {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kmeans" => Ok(ClusterMethod::KMeans),
            "hierarchical" => Ok(ClusterMethod::Hierarchical),
            other => Err(KeywordError::InvalidMethod(other.to_string())),
        }
    }
}

/// Tuning knobs for [`crate::KeywordClusterer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusteringConfig {
    /// Seed for k-means initialisation. Fixed for reproducible assignments.
    pub seed: u64,
    /// Independent k-means runs; the lowest-inertia run wins.
    pub restarts: usize,
    pub max_iterations: usize,
    /// Vocabulary cap for the clustering feature space.
    pub max_features: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            max_features: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCluster {
    /// Opaque within one clustering call.
    pub cluster_id: usize,
    pub representative_keyword: String,
    pub keywords: Vec<String>,
    /// Mean cosine similarity of members to the cluster centroid, 3 decimals.
    pub coherence_score: f64,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkage_method: Option<String>,
}

/// One merge of the agglomerative tree, in `SciPy` linkage layout.
///
/// Ids below the keyword count are keywords; id `n + i` is the cluster formed
/// by step `i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkageStep {
    pub left: usize,
    pub right: usize,
    pub distance: f64,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult {
    pub method: String,
    pub num_clusters: usize,
    pub num_keywords: usize,
    /// Ordered by descending size.
    pub clusters: Vec<KeywordCluster>,
    /// Dendrogram data; hierarchical runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkage_matrix: Option<Vec<LinkageStep>>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClusterResult {
    pub(crate) fn failure(
        method: &str,
        num_clusters: usize,
        num_keywords: usize,
        error: &KeywordError,
    ) -> Self {
        Self {
            method: method.to_string(),
            num_clusters,
            num_keywords,
            clusters: Vec::new(),
            linkage_matrix: None,
            success: false,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarKeyword {
    pub keyword: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarKeywords {
    pub target: String,
    /// Descending similarity; ties keep pool order.
    pub matches: Vec<SimilarKeyword>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPhrase {
    pub phrase: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPhrases {
    pub phrases: Vec<KeyPhrase>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
