//! Confidence fusion for free-text scores.
//!
//! Combines the keyword and similarity scores into one confidence
//! value. The "Bayesian" form is historically labelled: the evidence
//! term is a fixed 0.6/0.4 weighted average, and at the default prior
//! of 0.5 the posterior reduces algebraically to the evidence itself.
//! The arithmetic is preserved as-is because stored confidences and the
//! banding thresholds were calibrated against it.

/// Weight of the keyword score in the evidence term.
const KEYWORD_WEIGHT: f64 = 0.6;
/// Weight of the similarity score in the evidence term.
const SIMILARITY_WEIGHT: f64 = 0.4;

/// Default prior probability that an answer is correct.
pub const DEFAULT_PRIOR: f64 = 0.5;

/// Fuse the two scores into a posterior-style confidence in [0, 1].
///
/// evidence = 0.6·keyword + 0.4·similarity, treated as
/// P(Evidence | Correct) with P(Evidence | Incorrect) = 1 − evidence.
/// A zero denominator yields 0. The prior = 0.5 case returns the
/// evidence directly so the identity `fuse(s, s, 0.5) == s` holds
/// exactly in floating point, not just algebraically.
pub fn bayesian_fuse(keyword_score: f64, similarity_score: f64, prior: f64) -> f64 {
    let keyword = keyword_score.clamp(0.0, 1.0);
    let similarity = similarity_score.clamp(0.0, 1.0);
    let evidence = KEYWORD_WEIGHT * keyword + SIMILARITY_WEIGHT * similarity;

    if prior == DEFAULT_PRIOR {
        return evidence.clamp(0.0, 1.0);
    }

    let prior = prior.clamp(0.0, 1.0);
    let denominator = evidence * prior + (1.0 - evidence) * (1.0 - prior);
    if denominator == 0.0 {
        return 0.0;
    }

    ((evidence * prior) / denominator).clamp(0.0, 1.0)
}

/// Plain average of the two scores, used when fusion is toggled off.
pub fn average_fuse(keyword_score: f64, similarity_score: f64) -> f64 {
    ((keyword_score.clamp(0.0, 1.0) + similarity_score.clamp(0.0, 1.0)) / 2.0).clamp(0.0, 1.0)
}
