//! Core data model types for examgrade.
//!
//! These are the fundamental types the grading engine operates on:
//! questions with typed answer keys, submissions, and the per-question
//! and per-sheet outcome records the engine produces.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GradingError;
use crate::scale::GradeAssignment;

/// The closed set of question types the engine grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Multiple choice / single expected string; graded exactly.
    ExactChoice,
    /// Free text, graded probabilistically.
    ShortAnswer,
    /// Free text, graded with the same algorithm as short answers.
    LongAnswer,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::ExactChoice => write!(f, "exact_choice"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
            QuestionType::LongAnswer => write!(f, "long_answer"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = GradingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact_choice" | "mcq" => Ok(QuestionType::ExactChoice),
            "short_answer" | "short" => Ok(QuestionType::ShortAnswer),
            "long_answer" | "long" => Ok(QuestionType::LongAnswer),
            other => Err(GradingError::UnknownQuestionType(other.to_string())),
        }
    }
}

/// Answer key for a free-text (short or long) question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FreeTextKey {
    /// Keywords expected in a correct answer, in key order.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Optional per-keyword weights; renormalized to sum 1 before use.
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
    /// A model answer the submission is compared against.
    #[serde(default)]
    pub expected_answer: String,
}

impl FreeTextKey {
    /// Checks that a supplied weight list matches the keyword list.
    pub fn validate(&self) -> Result<(), GradingError> {
        if let Some(weights) = &self.weights {
            if weights.len() != self.keywords.len() {
                return Err(GradingError::WeightCountMismatch {
                    keywords: self.keywords.len(),
                    weights: weights.len(),
                });
            }
        }
        Ok(())
    }
}

/// The answer key, tagged by question type so dispatch is exhaustive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerKey {
    ExactChoice {
        /// The single accepted answer; compared trimmed, case-insensitively.
        #[serde(default)]
        correct_answer: String,
    },
    ShortAnswer(FreeTextKey),
    LongAnswer(FreeTextKey),
}

impl AnswerKey {
    pub fn question_type(&self) -> QuestionType {
        match self {
            AnswerKey::ExactChoice { .. } => QuestionType::ExactChoice,
            AnswerKey::ShortAnswer(_) => QuestionType::ShortAnswer,
            AnswerKey::LongAnswer(_) => QuestionType::LongAnswer,
        }
    }
}

/// A single exam question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier; submissions are keyed by it.
    pub id: String,
    /// Position on the paper; sheets grade in ascending number order.
    pub number: u32,
    /// The question text shown to the learner.
    #[serde(default)]
    pub text: String,
    /// Marks awarded for a fully correct answer.
    pub marks: u32,
    /// How the question is graded.
    pub answer_key: AnswerKey,
}

/// A learner's submitted answers, keyed by question id.
///
/// A missing entry reads as an empty answer rather than an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// The submitted answer for a question, or "" if none was recorded.
    pub fn answer_for(&self, question_id: &str) -> &str {
        self.answers
            .get(question_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn insert(&mut self, question_id: impl Into<String>, answer: impl Into<String>) {
        self.answers.insert(question_id.into(), answer.into());
    }
}

/// A set of questions graded together: one exam paper for one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamPaper {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl ExamPaper {
    /// Sum of marks over all questions.
    pub fn full_marks(&self) -> u32 {
        self.questions.iter().map(|q| q.marks).sum()
    }
}

/// How a question's marks were decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarksCategory {
    /// Exact-choice answer matched.
    Correct,
    /// Exact-choice answer did not match.
    Incorrect,
    /// Confidence cleared the full-marks threshold.
    FullMarks,
    /// Confidence cleared only the partial-marks threshold.
    PartialMarks,
    /// Confidence cleared neither threshold.
    NoMarks,
    /// The submission was blank.
    NoAnswer,
    /// Retained so outcome records written before question types became
    /// a closed enum still deserialize; the engine never produces it.
    UnknownType,
}

impl fmt::Display for MarksCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarksCategory::Correct => "correct",
            MarksCategory::Incorrect => "incorrect",
            MarksCategory::FullMarks => "full_marks",
            MarksCategory::PartialMarks => "partial_marks",
            MarksCategory::NoMarks => "no_marks",
            MarksCategory::NoAnswer => "no_answer",
            MarksCategory::UnknownType => "unknown_type",
        };
        write!(f, "{s}")
    }
}

/// The graded outcome of one question, with the raw scores that led to
/// it so graders can audit the decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub question_number: u32,
    pub question_type: QuestionType,
    /// Marks awarded; always within [0, marks_possible].
    pub marks_obtained: f64,
    pub marks_possible: u32,
    pub category: MarksCategory,
    /// Fused confidence in [0, 1]; only set for free-text questions.
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Raw keyword-match score, when keyword matching ran.
    #[serde(default)]
    pub keyword_score: Option<f64>,
    /// Raw TF-IDF cosine score, when similarity scoring ran.
    #[serde(default)]
    pub similarity_score: Option<f64>,
    /// The answer as submitted, echoed for audit.
    pub submitted_answer: String,
    /// The expected answer or correct choice, echoed for audit.
    #[serde(default)]
    pub expected_answer: String,
    /// The answer-key keywords, echoed for audit.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// The aggregated result of grading one answer sheet.
///
/// A pure value: safe to recompute and re-apply idempotently. The
/// (learner, exam, subject) upsert that stores it belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetGradingResult {
    pub total_marks_obtained: f64,
    pub full_marks_possible: u32,
    /// total/full × 100, or 0 when the sheet carries no marks.
    pub percentage: f64,
    /// Per-question outcomes, in ascending question-number order.
    pub outcomes: Vec<QuestionOutcome>,
    /// Letter grade and GPA, or None when no scale band matched.
    #[serde(default)]
    pub grade: Option<GradeAssignment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_display_and_parse() {
        assert_eq!(QuestionType::ExactChoice.to_string(), "exact_choice");
        assert_eq!(QuestionType::ShortAnswer.to_string(), "short_answer");
        assert_eq!(
            "exact_choice".parse::<QuestionType>().unwrap(),
            QuestionType::ExactChoice
        );
        assert_eq!(
            "MCQ".parse::<QuestionType>().unwrap(),
            QuestionType::ExactChoice
        );
        assert_eq!(
            "short".parse::<QuestionType>().unwrap(),
            QuestionType::ShortAnswer
        );
        assert_eq!(
            "long_answer".parse::<QuestionType>().unwrap(),
            QuestionType::LongAnswer
        );
        assert!(matches!(
            "essay".parse::<QuestionType>(),
            Err(GradingError::UnknownQuestionType(_))
        ));
    }

    #[test]
    fn submission_missing_answer_is_empty() {
        let mut sub = Submission::new();
        sub.insert("q1", "Paris");
        assert_eq!(sub.answer_for("q1"), "Paris");
        assert_eq!(sub.answer_for("q2"), "");
    }

    #[test]
    fn free_text_key_weight_validation() {
        let key = FreeTextKey {
            keywords: vec!["a".into(), "b".into()],
            weights: Some(vec![0.5]),
            expected_answer: String::new(),
        };
        assert!(matches!(
            key.validate(),
            Err(GradingError::WeightCountMismatch {
                keywords: 2,
                weights: 1
            })
        ));

        let key = FreeTextKey {
            keywords: vec!["a".into(), "b".into()],
            weights: Some(vec![0.5, 0.5]),
            expected_answer: String::new(),
        };
        assert!(key.validate().is_ok());
    }

    #[test]
    fn answer_key_serde_roundtrip() {
        let q = Question {
            id: "q1".into(),
            number: 1,
            text: "What is Python?".into(),
            marks: 10,
            answer_key: AnswerKey::ShortAnswer(FreeTextKey {
                keywords: vec!["python".into(), "language".into()],
                weights: None,
                expected_answer: "Python is a programming language.".into(),
            }),
        };
        let json = serde_json::to_string(&q).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back.answer_key.question_type(), QuestionType::ShortAnswer);
        assert_eq!(back.marks, 10);
    }

    #[test]
    fn legacy_unknown_type_category_deserializes() {
        let cat: MarksCategory = serde_json::from_str("\"unknown_type\"").unwrap();
        assert_eq!(cat, MarksCategory::UnknownType);
    }
}
