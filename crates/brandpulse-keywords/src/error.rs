use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeywordError {
    #[error("at least 2 keywords required (got {found})")]
    InsufficientKeywords { found: usize },

    #[error("unknown clustering method: {0}")]
    InvalidMethod(String),

    #[error("number of clusters must be at least 1")]
    InvalidClusterCount,

    #[error("empty vocabulary: input contains no terms of two or more characters")]
    EmptyVocabulary,

    #[error("degenerate input: {0}")]
    Degenerate(String),
}
