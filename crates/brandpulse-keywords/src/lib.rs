//! Keyword clustering for brand insight generation.
//!
//! Vectorises keywords with TF-IDF over unigrams and bigrams, groups them with
//! seeded k-means or Ward agglomerative clustering, and reports a coherence score
//! and representative keyword per cluster. Also provides nearest-neighbour
//! keyword search and key-phrase extraction.
//!
//! Every public entry point returns a structured result; malformed or
//! degenerate input is reported through its `success`/`error` fields.

pub mod clusterer;
pub mod error;
pub mod phrases;
pub mod similarity;
pub mod types;
pub mod vectorizer;

mod hierarchical;
mod kmeans;
mod vector;

pub use clusterer::KeywordClusterer;
pub use error::KeywordError;
pub use phrases::extract_key_phrases;
pub use similarity::find_similar_keywords;
pub use types::{
    ClusterMethod, ClusterResult, ClusteringConfig, KeyPhrase, KeyPhrases, KeywordCluster,
    LinkageStep, SimilarKeyword, SimilarKeywords,
};
pub use vectorizer::{TfidfMatrix, TfidfVectorizer};
