//! Extractive summarization via Latent Semantic Analysis.
//!
//! Algorithm:
//! 1. Split into sentences; split each sentence into lowercase words that start with a letter.
//! 2. Build a term × sentence count matrix over the unique words.
//! 3. Smooth each column: 0.4 + 0.6 × count / column_max.
//! 4. Thin SVD; rank sentence j by sqrt(Σ σᵢ² · vᵢⱼ²).
//! 5. Keep the top N by rank, emitted in document order.

use std::collections::HashMap;

use nalgebra::DMatrix;
use thiserror::Error;
use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_SUMMARY_SENTENCES: usize = 2;

const SMOOTHING: f64 = 0.4;
const MIN_DIMENSIONS: usize = 3;
pub const SVD_MAX_ITERATIONS: usize = 10_000;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("singular value decomposition of the {rows}x{cols} term matrix did not converge")]
    Decomposition { rows: usize, cols: usize },

    #[error("decomposition produced no right singular vectors")]
    MissingVectors,
}

/// Summarizes `text` into at most `num_sentences` sentences joined by single spaces.
///
/// Empty (or whitespace-only) input yields an empty string. Failures are
/// reported inline as a readable message rather than an error.
pub fn summarize_text(text: &str, num_sentences: usize) -> String {
    summarize_text_with_limit(text, num_sentences, SVD_MAX_ITERATIONS)
}

/// `summarize_text` with an explicit cap on SVD iterations.
pub fn summarize_text_with_limit(text: &str, num_sentences: usize, max_iterations: usize) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    match lsa_summarize(text, num_sentences, max_iterations) {
        Ok(sentences) => sentences.join(" "),
        Err(e) => {
            warn!("Summarization failed: {e}");
            fallback_message(&e)
        }
    }
}

/// Placeholder returned in place of a summary when summarization fails.
pub fn fallback_message(err: &SummarizeError) -> String {
    format!("Could not summarize (Text might be too short). Error: {err}")
}

/// Returns the selected sentences in document order.
pub fn lsa_summarize(
    text: &str,
    num_sentences: usize,
    max_iterations: usize,
) -> Result<Vec<String>, SummarizeError> {
    let sentences: Vec<&str> = text
        .unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let sentence_words: Vec<Vec<String>> = sentences.iter().map(|s| words(s)).collect();

    let mut dictionary: HashMap<&str, usize> = HashMap::new();
    for word in sentence_words.iter().flatten() {
        let next = dictionary.len();
        dictionary.entry(word.as_str()).or_insert(next);
    }

    if dictionary.is_empty() || num_sentences == 0 {
        return Ok(Vec::new());
    }

    if dictionary.len() < sentences.len() {
        debug!(
            "Fewer unique words ({}) than sentences ({}); LSA ranking may be weak",
            dictionary.len(),
            sentences.len()
        );
    }

    let matrix = term_frequency_matrix(&sentence_words, &dictionary);
    let ranks = compute_ranks(matrix, max_iterations)?;

    let mut order: Vec<usize> = (0..sentences.len()).collect();
    // Stable: equal ranks keep document order.
    order.sort_by(|&a, &b| ranks[b].total_cmp(&ranks[a]));
    order.truncate(num_sentences);
    order.sort_unstable();

    Ok(order.into_iter().map(|i| sentences[i].to_string()).collect())
}

fn words(sentence: &str) -> Vec<String> {
    sentence
        .unicode_words()
        .filter(|w| w.chars().next().is_some_and(char::is_alphabetic))
        .map(str::to_lowercase)
        .collect()
}

fn term_frequency_matrix(
    sentence_words: &[Vec<String>],
    dictionary: &HashMap<&str, usize>,
) -> DMatrix<f64> {
    let mut matrix = DMatrix::<f64>::zeros(dictionary.len(), sentence_words.len());

    for (col, words) in sentence_words.iter().enumerate() {
        for word in words {
            if let Some(&row) = dictionary.get(word.as_str()) {
                matrix[(row, col)] += 1.0;
            }
        }
    }

    for mut column in matrix.column_iter_mut() {
        let max = column.max();
        if max != 0.0 {
            column.apply(|v| *v = SMOOTHING + (1.0 - SMOOTHING) * (*v / max));
        }
    }

    matrix
}

fn compute_ranks(matrix: DMatrix<f64>, max_iterations: usize) -> Result<Vec<f64>, SummarizeError> {
    let (rows, cols) = matrix.shape();
    let svd = matrix
        .try_svd(false, true, f64::EPSILON * 5.0, max_iterations)
        .ok_or(SummarizeError::Decomposition { rows, cols })?;

    let v_t = svd.v_t.ok_or(SummarizeError::MissingVectors)?;
    let sigma = svd.singular_values;

    // Every singular value is kept: reduction ratio is 1 and the floor is MIN_DIMENSIONS.
    let dimensions = MIN_DIMENSIONS.max(sigma.len());
    let powered: Vec<f64> = sigma
        .iter()
        .enumerate()
        .map(|(i, s)| if i < dimensions { s * s } else { 0.0 })
        .collect();

    let ranks = (0..v_t.ncols())
        .map(|j| {
            powered
                .iter()
                .enumerate()
                .map(|(i, s2)| s2 * v_t[(i, j)].powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect();

    Ok(ranks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSAGE: &str = "Rust is a systems programming language focused on safety. \
        The borrow checker enforces memory safety without a garbage collector. \
        Many teams adopt Rust for networking services and command line tools. \
        Cargo makes building and sharing Rust libraries straightforward. \
        The weather in the valley was pleasant last weekend.";

    #[test]
    fn test_empty_input_returns_empty_string() {
        assert_eq!(summarize_text("", 2), "");
        assert_eq!(summarize_text("   ", 2), "");
        assert_eq!(summarize_text("\n\t ", 2), "");
    }

    #[test]
    fn test_summary_has_at_most_n_sentences_from_source() {
        let summary = lsa_summarize(PASSAGE, 2, SVD_MAX_ITERATIONS).unwrap();
        assert_eq!(summary.len(), 2);
        for sentence in &summary {
            assert!(PASSAGE.contains(sentence.as_str()), "not from source: {sentence}");
        }
    }

    #[test]
    fn test_summary_sentences_in_document_order() {
        let summary = lsa_summarize(PASSAGE, 3, SVD_MAX_ITERATIONS).unwrap();
        let positions: Vec<usize> = summary
            .iter()
            .map(|s| PASSAGE.find(s.as_str()).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_request_more_sentences_than_available() {
        let text = "First sentence here. Second sentence there.";
        let summary = lsa_summarize(text, 5, SVD_MAX_ITERATIONS).unwrap();
        assert_eq!(
            summary,
            vec!["First sentence here.".to_string(), "Second sentence there.".to_string()]
        );
    }

    #[test]
    fn test_summarize_text_joins_with_single_space() {
        let text = "First sentence here. Second sentence there.";
        assert_eq!(
            summarize_text(text, 2),
            "First sentence here. Second sentence there."
        );
    }

    #[test]
    fn test_text_without_words_summarizes_to_nothing() {
        assert_eq!(summarize_text("123 456 !!! ...", 2), "");
    }

    #[test]
    fn test_single_sentence_is_returned() {
        assert_eq!(summarize_text("Only one sentence.", 2), "Only one sentence.");
    }

    #[test]
    fn test_smoothing_floors_nonzero_columns() {
        let sentence_words = vec![
            vec!["a".to_string(), "a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ];
        let dictionary: HashMap<&str, usize> = [("a", 0), ("b", 1), ("c", 2)].into_iter().collect();
        let m = term_frequency_matrix(&sentence_words, &dictionary);

        assert!((m[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((m[(1, 0)] - 0.7).abs() < 1e-12);
        assert!((m[(2, 0)] - 0.4).abs() < 1e-12);
        assert!((m[(2, 1)] - 1.0).abs() < 1e-12);
        assert!((m[(0, 1)] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_decomposition_error_message_is_readable() {
        let err = SummarizeError::Decomposition { rows: 2, cols: 3 };
        assert!(err.to_string().contains("2x3"));
    }

    #[test]
    fn test_non_converging_decomposition_is_an_error() {
        // A single SVD sweep cannot finish on a dense 5-sentence matrix.
        let err = lsa_summarize(PASSAGE, 2, 1).unwrap_err();
        assert!(matches!(err, SummarizeError::Decomposition { cols: 5, .. }));
    }

    #[test]
    fn test_failed_summary_falls_back_to_message() {
        let summary = summarize_text_with_limit(PASSAGE, 2, 1);
        assert!(
            summary.starts_with("Could not summarize (Text might be too short). Error: "),
            "{summary}"
        );
        assert!(summary.contains("did not converge"));
    }

    #[test]
    fn test_fallback_message_embeds_error() {
        assert_eq!(
            fallback_message(&SummarizeError::MissingVectors),
            "Could not summarize (Text might be too short). Error: \
             decomposition produced no right singular vectors"
        );
    }
}
