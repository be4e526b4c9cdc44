//! TOML exam-paper parser.
//!
//! Loads an exam paper (questions plus optional grading config and
//! scale) from a TOML file and validates it into the typed model.
//! Unknown question types are rejected; malformed answer-key payloads
//! are recovered leniently so one bad field does not lose a paper.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::engine::GradingConfig;
use crate::model::{AnswerKey, ExamPaper, FreeTextKey, Question, QuestionType};
use crate::scale::{GradeBand, GradingScale};

/// A parsed exam file: the paper plus any inline grading settings.
#[derive(Debug, Clone)]
pub struct ExamFile {
    pub paper: ExamPaper,
    /// Inline `[config]` table, when present.
    pub config: Option<GradingConfig>,
    /// Inline `[scale]` table, when present.
    pub scale: Option<GradingScale>,
}

/// Intermediate TOML structure for parsing exam files.
#[derive(Debug, Deserialize)]
struct TomlExamFile {
    exam: TomlExamHeader,
    #[serde(default)]
    config: Option<TomlConfig>,
    #[serde(default)]
    scale: Option<TomlScale>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlExamHeader {
    id: String,
    name: String,
    #[serde(default)]
    subject: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    /// Defaults to "q{number}" when omitted.
    #[serde(default)]
    id: Option<String>,
    number: u32,
    #[serde(rename = "type")]
    question_type: String,
    #[serde(default)]
    text: String,
    marks: u32,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    weights: Option<Vec<f64>>,
    #[serde(default)]
    expected_answer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlConfig {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    full_marks_threshold: Option<f64>,
    #[serde(default)]
    partial_marks_threshold: Option<f64>,
    #[serde(default)]
    partial_marks_fraction: Option<f64>,
    #[serde(default)]
    use_keyword_matching: Option<bool>,
    #[serde(default)]
    use_similarity_scoring: Option<bool>,
    #[serde(default)]
    use_bayesian_fusion: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct TomlScale {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    bands: Vec<TomlBand>,
}

#[derive(Debug, Deserialize)]
struct TomlBand {
    label: String,
    min_percent: f64,
    max_percent: f64,
    gpa: f64,
    #[serde(default)]
    description: String,
}

/// Parse a single TOML file into an `ExamFile`.
pub fn parse_exam_file(path: &Path) -> Result<ExamFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exam file: {}", path.display()))?;

    parse_exam_file_str(&content, path)
}

/// Parse a TOML string into an `ExamFile` (useful for testing).
pub fn parse_exam_file_str(content: &str, source_path: &Path) -> Result<ExamFile> {
    let parsed: TomlExamFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(convert_question)
        .collect::<Result<Vec<_>>>()?;

    let paper = ExamPaper {
        id: parsed.exam.id,
        name: parsed.exam.name,
        subject: parsed.exam.subject,
        questions,
    };

    let config = parsed.config.map(convert_config).transpose()?;
    let scale = parsed.scale.map(convert_scale).transpose()?;

    Ok(ExamFile {
        paper,
        config,
        scale,
    })
}

fn convert_question(raw: TomlQuestion) -> Result<Question> {
    let question_type: QuestionType = raw
        .question_type
        .parse()
        .with_context(|| format!("question {}", raw.number))?;

    let id = raw.id.unwrap_or_else(|| format!("q{}", raw.number));

    // Missing payload fields default to empty rather than failing: an
    // incomplete answer key grades to the natural zero score.
    let answer_key = match question_type {
        QuestionType::ExactChoice => AnswerKey::ExactChoice {
            correct_answer: raw.correct_answer.unwrap_or_default(),
        },
        QuestionType::ShortAnswer | QuestionType::LongAnswer => {
            let mut key = FreeTextKey {
                keywords: raw.keywords,
                weights: raw.weights,
                expected_answer: raw.expected_answer.unwrap_or_default(),
            };
            if let Err(e) = key.validate() {
                warn!(question_id = %id, "dropping weights: {e}");
                key.weights = None;
            }
            if question_type == QuestionType::LongAnswer {
                AnswerKey::LongAnswer(key)
            } else {
                AnswerKey::ShortAnswer(key)
            }
        }
    };

    Ok(Question {
        id,
        number: raw.number,
        text: raw.text,
        marks: raw.marks,
        answer_key,
    })
}

fn convert_config(raw: TomlConfig) -> Result<GradingConfig> {
    let defaults = GradingConfig::default();
    let config = GradingConfig {
        name: raw.name.unwrap_or(defaults.name),
        full_marks_threshold: raw.full_marks_threshold.unwrap_or(defaults.full_marks_threshold),
        partial_marks_threshold: raw
            .partial_marks_threshold
            .unwrap_or(defaults.partial_marks_threshold),
        partial_marks_fraction: raw
            .partial_marks_fraction
            .unwrap_or(defaults.partial_marks_fraction),
        use_keyword_matching: raw.use_keyword_matching.unwrap_or(defaults.use_keyword_matching),
        use_similarity_scoring: raw
            .use_similarity_scoring
            .unwrap_or(defaults.use_similarity_scoring),
        use_bayesian_fusion: raw.use_bayesian_fusion.unwrap_or(defaults.use_bayesian_fusion),
    };
    config.validate()?;
    Ok(config)
}

fn convert_scale(raw: TomlScale) -> Result<GradingScale> {
    let scale = GradingScale::new(
        raw.name.unwrap_or_else(|| "custom".to_string()),
        raw.bands
            .into_iter()
            .map(|b| GradeBand {
                label: b.label,
                min_percent: b.min_percent,
                max_percent: b.max_percent,
                gpa: b.gpa,
                description: b.description,
            })
            .collect(),
    );
    scale.validate()?;
    Ok(scale)
}
