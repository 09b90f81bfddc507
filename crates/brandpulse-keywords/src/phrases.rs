//! Key-phrase extraction from a single text.

use crate::error::KeywordError;
use crate::types::{KeyPhrase, KeyPhrases};
use crate::vectorizer::TfidfVectorizer;

/// Extract up to `top_n` key phrases (unigrams and bigrams) from `text`.
///
/// The vocabulary is capped at `2 * top_n` of the most frequent terms before
/// scoring. Phrases come back by descending score; equal scores keep
/// alphabetical order. Zero-scored phrases are dropped.
#[must_use]
pub fn extract_key_phrases(text: &str, top_n: usize) -> KeyPhrases {
    match score_phrases(text, top_n) {
        Ok(phrases) => KeyPhrases {
            phrases,
            success: true,
            error: None,
        },
        Err(err) => {
            tracing::warn!(error = %err, chars = text.len(), "key phrase extraction failed");
            KeyPhrases {
                phrases: Vec::new(),
                success: false,
                error: Some(err.to_string()),
            }
        }
    }
}

fn score_phrases(text: &str, top_n: usize) -> Result<Vec<KeyPhrase>, KeywordError> {
    if top_n == 0 {
        return Ok(Vec::new());
    }

    let matrix = TfidfVectorizer::unigrams_and_bigrams()
        .with_max_features(top_n.saturating_mul(2))
        .fit_transform(&[text])?;

    let mut phrases: Vec<KeyPhrase> = matrix
        .vocabulary
        .into_iter()
        .zip(&matrix.rows[0])
        .filter(|&(_, &score)| score > 0.0)
        .map(|(phrase, &score)| KeyPhrase { phrase, score })
        .collect();

    phrases.sort_by(|a, b| b.score.total_cmp(&a.score));
    phrases.truncate(top_n);
    Ok(phrases)
}
