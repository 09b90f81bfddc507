//! Keyword engine command handlers for the CLI.

use std::path::{Path, PathBuf};

use brandpulse_core::AppConfig;
use brandpulse_keywords::{
    extract_key_phrases, find_similar_keywords, ClusteringConfig, KeywordClusterer,
};
use clap::Subcommand;

use crate::print_json;

/// Sub-commands available under `keywords`.
#[derive(Debug, Subcommand)]
pub enum KeywordCommands {
    /// Group keywords into clusters
    Cluster {
        /// Keywords to cluster; combined with `--file` when both are given
        keywords: Vec<String>,
        /// File with one keyword per line
        #[arg(long)]
        file: Option<PathBuf>,
        /// Requested number of clusters; defaults to the configured count
        #[arg(long)]
        clusters: Option<usize>,
        /// `kmeans` or `hierarchical`; defaults to the configured method
        #[arg(long)]
        method: Option<String>,
    },
    /// Rank pool keywords by similarity to a target keyword
    Similar {
        target: String,
        #[arg(required = true)]
        pool: Vec<String>,
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Extract key phrases from free text
    Phrases {
        text: String,
        #[arg(long)]
        top_n: Option<usize>,
    },
}

/// Clustering knobs taken from the application config.
pub(crate) fn clustering_config(config: &AppConfig) -> ClusteringConfig {
    ClusteringConfig {
        seed: config.kmeans_seed,
        restarts: config.kmeans_restarts,
        max_iterations: config.kmeans_max_iterations,
        max_features: config.max_features,
    }
}

/// Run a `keywords` sub-command. Engine failures are printed as part of the
/// result rather than returned.
///
/// # Errors
///
/// Returns an error if a keyword file cannot be read or output cannot be rendered.
pub(crate) fn run(config: &AppConfig, command: KeywordCommands) -> anyhow::Result<()> {
    match command {
        KeywordCommands::Cluster {
            mut keywords,
            file,
            clusters,
            method,
        } => {
            if let Some(path) = file {
                keywords.extend(read_keyword_file(&path)?);
            }
            let clusterer = KeywordClusterer::new(clustering_config(config));
            let result = clusterer.cluster(
                &keywords,
                clusters.unwrap_or(config.cluster_count),
                method.as_deref().unwrap_or(&config.cluster_method),
            );
            print_json(&result)
        }
        KeywordCommands::Similar {
            target,
            pool,
            top_n,
        } => {
            let result =
                find_similar_keywords(&target, &pool, top_n.unwrap_or(config.similar_top_n));
            print_json(&result)
        }
        KeywordCommands::Phrases { text, top_n } => {
            let result = extract_key_phrases(&text, top_n.unwrap_or(config.phrase_top_n));
            print_json(&result)
        }
    }
}

fn read_keyword_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    Ok(parse_keyword_lines(&raw))
}

/// One keyword per line; blank lines are skipped and surrounding whitespace trimmed.
pub(crate) fn parse_keyword_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
