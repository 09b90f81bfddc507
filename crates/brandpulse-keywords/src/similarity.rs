//! Nearest-neighbour search over a keyword pool.

use crate::error::KeywordError;
use crate::types::{SimilarKeyword, SimilarKeywords};
use crate::vector::cosine_similarity;
use crate::vectorizer::TfidfVectorizer;

/// Rank the members of `pool` by cosine similarity to `target`.
///
/// The target and pool share one unigram feature space; the target is added to
/// the corpus when the pool does not already contain it. Pool entries equal to
/// the target never appear in the result. At most `top_n` matches are returned,
/// highest first, equal scores keeping pool order.
#[must_use]
pub fn find_similar_keywords<S: AsRef<str>>(
    target: &str,
    pool: &[S],
    top_n: usize,
) -> SimilarKeywords {
    match rank(target, pool, top_n) {
        Ok(matches) => {
            tracing::debug!(
                keyword = target,
                pool = pool.len(),
                matches = matches.len(),
                "ranked similar keywords"
            );
            SimilarKeywords {
                target: target.to_string(),
                matches,
                success: true,
                error: None,
            }
        }
        Err(err) => {
            tracing::warn!(keyword = target, error = %err, "similar keyword search failed");
            SimilarKeywords {
                target: target.to_string(),
                matches: Vec::new(),
                success: false,
                error: Some(err.to_string()),
            }
        }
    }
}

fn rank<S: AsRef<str>>(
    target: &str,
    pool: &[S],
    top_n: usize,
) -> Result<Vec<SimilarKeyword>, KeywordError> {
    let mut corpus: Vec<&str> = pool.iter().map(AsRef::as_ref).collect();
    let target_idx = match corpus.iter().position(|kw| *kw == target) {
        Some(i) => i,
        None => {
            corpus.insert(0, target);
            0
        }
    };

    let matrix = TfidfVectorizer::unigrams().fit_transform(&corpus)?;
    let target_row = &matrix.rows[target_idx];

    let mut scored: Vec<SimilarKeyword> = corpus
        .iter()
        .zip(&matrix.rows)
        .filter(|(kw, _)| **kw != target)
        .map(|(kw, row)| SimilarKeyword {
            keyword: (*kw).to_string(),
            similarity: cosine_similarity(row, target_row),
        })
        .collect();

    scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    scored.truncate(top_n);
    Ok(scored)
}
