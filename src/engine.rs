//! The grading engine: per-question routing and sheet aggregation.
//!
//! Exact-choice questions grade deterministically; free-text questions
//! run the probabilistic pipeline (keyword match, TF-IDF similarity,
//! confidence fusion) and band the confidence into full, partial, or no
//! marks. Grading is total: every question yields an outcome, and one
//! question's outcome never affects another's.

use tracing::debug;

use crate::error::GradingError;
use crate::fusion::{average_fuse, bayesian_fuse, DEFAULT_PRIOR};
use crate::lexical::keyword_match;
use crate::model::{
    AnswerKey, FreeTextKey, MarksCategory, Question, QuestionOutcome, SheetGradingResult,
    Submission,
};
use crate::scale::GradingScale;
use crate::similarity::cosine_similarity;

/// Thresholds and feature toggles for probabilistic grading.
///
/// Immutable per grading call. Callers pass it explicitly; there is no
/// implicit lookup or creation on the scoring path.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GradingConfig {
    pub name: String,
    /// Confidence at or above this awards full marks.
    pub full_marks_threshold: f64,
    /// Confidence at or above this (but below full) awards partial marks.
    pub partial_marks_threshold: f64,
    /// Fraction of the question's marks awarded for a partial match.
    pub partial_marks_fraction: f64,
    pub use_keyword_matching: bool,
    pub use_similarity_scoring: bool,
    pub use_bayesian_fusion: bool,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            full_marks_threshold: 0.70,
            partial_marks_threshold: 0.40,
            partial_marks_fraction: 0.70,
            use_keyword_matching: true,
            use_similarity_scoring: true,
            use_bayesian_fusion: true,
        }
    }
}

impl GradingConfig {
    /// Checks that every threshold lies in [0, 1].
    pub fn validate(&self) -> Result<(), GradingError> {
        let checks = [
            ("full_marks_threshold", self.full_marks_threshold),
            ("partial_marks_threshold", self.partial_marks_threshold),
            ("partial_marks_fraction", self.partial_marks_fraction),
        ];
        for (name, value) in checks {
            if !(0.0..=1.0).contains(&value) {
                return Err(GradingError::ThresholdOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Grade a single question.
///
/// Never fails: malformed or empty answer-key fields degrade to the
/// natural zero score instead of erroring.
pub fn grade_question(
    question: &Question,
    submitted_answer: &str,
    config: &GradingConfig,
) -> QuestionOutcome {
    match &question.answer_key {
        AnswerKey::ExactChoice { correct_answer } => {
            grade_exact_choice(question, submitted_answer, correct_answer)
        }
        AnswerKey::ShortAnswer(key) | AnswerKey::LongAnswer(key) => {
            grade_free_text(question, submitted_answer, key, config)
        }
    }
}

fn grade_exact_choice(
    question: &Question,
    submitted_answer: &str,
    correct_answer: &str,
) -> QuestionOutcome {
    let is_correct =
        submitted_answer.trim().to_uppercase() == correct_answer.trim().to_uppercase();

    let (marks_obtained, category) = if is_correct {
        (question.marks as f64, MarksCategory::Correct)
    } else {
        (0.0, MarksCategory::Incorrect)
    };

    QuestionOutcome {
        question_id: question.id.clone(),
        question_number: question.number,
        question_type: question.answer_key.question_type(),
        marks_obtained,
        marks_possible: question.marks,
        category,
        confidence: None,
        keyword_score: None,
        similarity_score: None,
        submitted_answer: submitted_answer.to_string(),
        expected_answer: correct_answer.to_string(),
        keywords: Vec::new(),
    }
}

fn grade_free_text(
    question: &Question,
    submitted_answer: &str,
    key: &FreeTextKey,
    config: &GradingConfig,
) -> QuestionOutcome {
    let mut outcome = QuestionOutcome {
        question_id: question.id.clone(),
        question_number: question.number,
        question_type: question.answer_key.question_type(),
        marks_obtained: 0.0,
        marks_possible: question.marks,
        category: MarksCategory::NoAnswer,
        confidence: None,
        keyword_score: None,
        similarity_score: None,
        submitted_answer: submitted_answer.to_string(),
        expected_answer: key.expected_answer.clone(),
        keywords: key.keywords.clone(),
    };

    if submitted_answer.trim().is_empty() {
        outcome.confidence = Some(0.0);
        return outcome;
    }

    let mut keyword_score = 0.0;
    if config.use_keyword_matching && !key.keywords.is_empty() {
        keyword_score = keyword_match(submitted_answer, &key.keywords, key.weights.as_deref());
        outcome.keyword_score = Some(keyword_score);
    }

    let mut similarity_score = 0.0;
    if config.use_similarity_scoring && !key.expected_answer.is_empty() {
        similarity_score = cosine_similarity(submitted_answer, &key.expected_answer);
        outcome.similarity_score = Some(similarity_score);
    }

    let confidence = if config.use_bayesian_fusion {
        bayesian_fuse(keyword_score, similarity_score, DEFAULT_PRIOR)
    } else {
        average_fuse(keyword_score, similarity_score)
    };
    outcome.confidence = Some(confidence);

    debug!(
        question_id = %question.id,
        keyword_score,
        similarity_score,
        confidence,
        "scored free-text answer"
    );

    if confidence >= config.full_marks_threshold {
        outcome.marks_obtained = question.marks as f64;
        outcome.category = MarksCategory::FullMarks;
    } else if confidence >= config.partial_marks_threshold {
        outcome.marks_obtained = question.marks as f64 * config.partial_marks_fraction;
        outcome.category = MarksCategory::PartialMarks;
    } else {
        outcome.marks_obtained = 0.0;
        outcome.category = MarksCategory::NoMarks;
    }

    // Marks stay within the question's range whatever the fraction was.
    outcome.marks_obtained = outcome.marks_obtained.clamp(0.0, question.marks as f64);
    outcome
}

/// Grade every question of one submission and aggregate the totals.
///
/// Questions are graded in ascending question-number order and the
/// outcomes keep that order. A missing submission entry grades as an
/// empty answer. The aggregate percentage is classified against
/// `scale`; an unmatched percentage leaves the sheet ungraded.
pub fn grade_sheet(
    submission: &Submission,
    questions: &[Question],
    config: &GradingConfig,
    scale: &GradingScale,
) -> SheetGradingResult {
    let mut ordered: Vec<&Question> = questions.iter().collect();
    ordered.sort_by_key(|q| q.number);

    let mut total_marks_obtained = 0.0;
    let mut full_marks_possible = 0u32;
    let mut outcomes = Vec::with_capacity(ordered.len());

    for question in ordered {
        let answer = submission.answer_for(&question.id);
        let outcome = grade_question(question, answer, config);
        total_marks_obtained += outcome.marks_obtained;
        full_marks_possible += question.marks;
        outcomes.push(outcome);
    }

    let percentage = if full_marks_possible > 0 {
        total_marks_obtained / full_marks_possible as f64 * 100.0
    } else {
        0.0
    };

    let grade = scale.classify(percentage);

    debug!(
        total_marks_obtained,
        full_marks_possible,
        percentage,
        grade = grade.as_ref().map(|g| g.label.as_str()).unwrap_or("-"),
        "graded sheet"
    );

    SheetGradingResult {
        total_marks_obtained,
        full_marks_possible,
        percentage,
        outcomes,
        grade,
    }
}
