//! TF-IDF cosine similarity between two texts.
//!
//! Each call builds a fresh vector space over exactly the two documents
//! being compared. Nothing is shared or persisted between calls, so
//! every comparison is self-contained and independent of prior ones.

use std::collections::BTreeMap;

use crate::text::normalize;

/// Cosine similarity of the TF-IDF vectors of `text_a` and `text_b`,
/// in [0, 1].
///
/// Both texts are normalized (stopwords removed) first; if either ends
/// up empty the result is 0.0. Term weights use the smoothed inverse
/// document frequency `ln((1 + n) / (1 + df)) + 1` over the
/// two-document corpus, and the vectors are L2-normalized before the
/// dot product. Degenerate numerics map to 0.0 rather than an error.
pub fn cosine_similarity(text_a: &str, text_b: &str) -> f64 {
    if text_a.is_empty() || text_b.is_empty() {
        return 0.0;
    }

    let doc_a = normalize(text_a, true);
    let doc_b = normalize(text_b, true);
    if doc_a.is_empty() || doc_b.is_empty() {
        return 0.0;
    }

    let tf_a = term_frequencies(&doc_a);
    let tf_b = term_frequencies(&doc_b);

    // Union vocabulary in lexical order keeps the computation deterministic.
    let mut vocabulary: BTreeMap<&str, f64> = BTreeMap::new();
    for &term in tf_a.keys().chain(tf_b.keys()) {
        vocabulary.entry(term).or_insert_with(|| {
            let df = tf_a.contains_key(term) as u32 + tf_b.contains_key(term) as u32;
            // Smoothed idf over the two-document corpus (n = 2).
            ((1.0 + 2.0) / (1.0 + df as f64)).ln() + 1.0
        });
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (term, idf) in &vocabulary {
        let wa = tf_a.get(*term).copied().unwrap_or(0) as f64 * idf;
        let wb = tf_b.get(*term).copied().unwrap_or(0) as f64 * idf;
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}

fn term_frequencies(doc: &str) -> BTreeMap<&str, u32> {
    let mut counts = BTreeMap::new();
    for token in doc.split_whitespace() {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_score_one() {
        for text in [
            "The cat sat on the mat",
            "Photosynthesis converts sunlight into chemical energy",
            "x",
        ] {
            let score = cosine_similarity(text, text);
            assert!((score - 1.0).abs() < 1e-9, "{text:?} scored {score}");
        }
    }

    #[test]
    fn disjoint_vocabulary_scores_zero() {
        let score = cosine_similarity("The cat sat on the mat", "quantum chromodynamics lattice");
        assert!(score.abs() < 1e-9, "got {score}");
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(cosine_similarity("", "anything"), 0.0);
        assert_eq!(cosine_similarity("anything", ""), 0.0);
        // Normalizes to empty: stopwords only
        assert_eq!(cosine_similarity("the of and", "anything else here"), 0.0);
        assert_eq!(cosine_similarity("!!!", "anything"), 0.0);
    }

    #[test]
    fn overlapping_texts_score_between_zero_and_one() {
        let score = cosine_similarity(
            "Python is a high-level programming language.",
            "Python is a great programming language.",
        );
        assert!(score > 0.5, "got {score}");
        assert!(score < 1.0 + 1e-9, "got {score}");
    }

    #[test]
    fn similarity_is_symmetric() {
        let a = "Plants use sunlight to make glucose";
        let b = "Glucose is produced by plants";
        let ab = cosine_similarity(a, b);
        let ba = cosine_similarity(b, a);
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn calls_are_independent() {
        let a = "one shared corpus would skew this";
        let b = "each call builds its own space";
        let first = cosine_similarity(a, b);
        cosine_similarity("unrelated interleaved", "comparison entirely");
        let second = cosine_similarity(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn case_and_punctuation_do_not_matter() {
        let score = cosine_similarity("Sunlight, energy & glucose!", "sunlight energy glucose");
        assert!((score - 1.0).abs() < 1e-9, "got {score}");
    }
}
