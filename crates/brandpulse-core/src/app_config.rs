#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Trailing window, in days, used for trend labels.
    pub trend_window_days: u32,
    /// Trailing window, in days, used for aggregate KPI statistics.
    pub stats_window_days: u32,
    pub cluster_count: usize,
    /// Validated clustering strategy name (`kmeans` or `hierarchical`).
    pub cluster_method: String,
    pub kmeans_seed: u64,
    pub kmeans_restarts: usize,
    pub kmeans_max_iterations: usize,
    pub max_features: usize,
    pub similar_top_n: usize,
    pub phrase_top_n: usize,
}
