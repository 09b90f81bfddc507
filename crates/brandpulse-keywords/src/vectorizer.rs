//! TF-IDF vectoriser over word n-grams.
//!
//! Documents are lowercased and tokenised into runs of two or more word
//! characters. Weights use smoothed IDF, `ln((1 + n) / (1 + df)) + 1`, and each
//! row is L2-normalised. The vocabulary is sorted; when capped, the terms with
//! the highest corpus frequency are kept, ties going to the earlier term.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::KeywordError;
use crate::vector::normalize;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfVectorizer {
    min_n: usize,
    max_n: usize,
    max_features: Option<usize>,
}

/// Dense document-term matrix produced by [`TfidfVectorizer::fit_transform`].
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfMatrix {
    /// Sorted feature names; column `j` of every row is `vocabulary[j]`.
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::unigrams()
    }
}

impl TfidfVectorizer {
    #[must_use]
    pub fn unigrams() -> Self {
        Self {
            min_n: 1,
            max_n: 1,
            max_features: None,
        }
    }

    /// Unigrams and bigrams.
    #[must_use]
    pub fn unigrams_and_bigrams() -> Self {
        Self {
            min_n: 1,
            max_n: 2,
            max_features: None,
        }
    }

    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Learn the vocabulary of `documents` and return their TF-IDF rows.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordError::EmptyVocabulary`] when no document yields a term.
    #[allow(clippy::cast_precision_loss)]
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<TfidfMatrix, KeywordError> {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| self.term_counts(doc.as_ref()))
            .collect();

        // term -> (corpus frequency, document frequency), sorted by term.
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for doc in &counts {
            for (term, &n) in doc {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += n;
                entry.1 += 1;
            }
        }

        if stats.is_empty() {
            return Err(KeywordError::EmptyVocabulary);
        }

        let mut kept: Vec<(&str, usize, usize)> =
            stats.into_iter().map(|(t, (tf, df))| (t, tf, df)).collect();
        if let Some(limit) = self.max_features {
            if kept.len() > limit {
                let mut by_freq: Vec<usize> = (0..kept.len()).collect();
                by_freq.sort_by(|&a, &b| kept[b].1.cmp(&kept[a].1));
                let keep: HashSet<usize> = by_freq.into_iter().take(limit).collect();
                kept = kept
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| keep.contains(i))
                    .map(|(_, entry)| entry)
                    .collect();
            }
        }

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = kept
            .iter()
            .map(|&(_, _, df)| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: Vec<f64> = kept
                    .iter()
                    .zip(&idf)
                    .map(|(&(term, _, _), &w)| doc.get(term).map_or(0.0, |&n| n as f64 * w))
                    .collect();
                normalize(&mut row);
                row
            })
            .collect();

        Ok(TfidfMatrix {
            vocabulary: kept.into_iter().map(|(t, _, _)| t.to_string()).collect(),
            rows,
        })
    }

    fn term_counts(&self, document: &str) -> HashMap<String, usize> {
        let lower = document.to_lowercase();
        let tokens: Vec<&str> = TOKEN_RE.find_iter(&lower).map(|m| m.as_str()).collect();

        let mut counts = HashMap::new();
        for n in self.min_n..=self.max_n {
            if n == 0 || tokens.len() < n {
                continue;
            }
            for gram in tokens.windows(n) {
                *counts.entry(gram.join(" ")).or_insert(0) += 1;
            }
        }
        counts
    }
}
