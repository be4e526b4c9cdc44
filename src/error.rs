//! Grading error types.
//!
//! Validation failures raised at the crate's boundaries (question type
//! parsing, config and scale validation). Typed so callers can classify
//! failures without string matching. The scoring path itself is total
//! and never returns these: malformed answer-key payloads degrade to
//! zero scores instead of erroring.

use thiserror::Error;

/// Errors raised when validating grading inputs.
#[derive(Debug, Error)]
pub enum GradingError {
    /// A question type string did not name a known variant.
    #[error("unknown question type: {0}")]
    UnknownQuestionType(String),

    /// A config threshold fell outside [0, 1].
    #[error("{name} out of range: {value} (expected 0.0..=1.0)")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    /// A keyword weight list did not match the keyword list length.
    #[error("answer key has {keywords} keywords but {weights} weights")]
    WeightCountMismatch { keywords: usize, weights: usize },

    /// A grading scale with no bands cannot classify anything.
    #[error("grading scale '{0}' has no bands")]
    EmptyScale(String),
}
