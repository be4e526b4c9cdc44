//! Weighted keyword matching against a submitted answer.
//!
//! Each keyword contributes its weight when it appears verbatim in the
//! normalized answer, or a weight-scaled fraction when a token of the
//! answer is a near miss by edit distance. The total is capped at 1.0.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

use crate::text::normalize;

/// Minimum edit-distance ratio for a token to count as a fuzzy hit.
const FUZZY_THRESHOLD: f64 = 0.8;

/// Score how well `answer` covers `keywords`, in [0, 1].
///
/// Weights default to uniform; supplied weights are renormalized to sum
/// to 1 (a zero-sum list scores 0). A weights list longer than the
/// keyword list normalizes over every entry but only the zipped pairs
/// score. For each keyword, a verbatim substring hit on the normalized
/// answer adds the full weight; otherwise the best edit-distance ratio
/// over the answer's distinct tokens adds `weight * ratio` when it
/// reaches [`FUZZY_THRESHOLD`]. Taking the best ratio over tokens in
/// lexical order keeps the result independent of iteration order.
pub fn keyword_match(answer: &str, keywords: &[String], weights: Option<&[f64]>) -> f64 {
    if keywords.is_empty() || answer.trim().is_empty() {
        return 0.0;
    }

    let answer_text = normalize(answer, true);
    let answer_tokens: BTreeSet<&str> = answer_text.split_whitespace().collect();

    let uniform;
    let weights: &[f64] = match weights {
        Some(w) => w,
        None => {
            uniform = vec![1.0 / keywords.len() as f64; keywords.len()];
            &uniform
        }
    };

    let total_weight: f64 = weights.iter().sum();
    if total_weight == 0.0 {
        return 0.0;
    }

    let mut score = 0.0;
    for (keyword, weight) in keywords.iter().zip(weights) {
        let weight = weight / total_weight;
        let keyword_clean = normalize(keyword, true);

        if answer_text.contains(&keyword_clean) {
            score += weight;
        } else {
            let best = answer_tokens
                .iter()
                .map(|&token| normalized_levenshtein(&keyword_clean, token))
                .fold(0.0f64, f64::max);
            if best >= FUZZY_THRESHOLD {
                score += weight * best;
            }
        }
    }

    score.clamp(0.0, 1.0)
}
