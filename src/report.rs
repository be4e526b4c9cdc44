//! Sheet report with JSON persistence.
//!
//! Wraps a [`SheetGradingResult`] with the identifiers a persistence
//! collaborator needs to upsert it. Storage keeps at most one report
//! per (learner, exam, subject); re-grading produces a fresh report for
//! the same key and overwrites the stored one. The result inside is a
//! pure value, so applying the same report twice is harmless.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::SheetGradingResult;

/// A graded sheet, keyed and timestamped for storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetReport {
    /// Unique report identifier; a re-grade gets a new one.
    pub id: Uuid,
    /// When grading finished.
    pub graded_at: DateTime<Utc>,
    pub learner_id: String,
    pub exam_id: String,
    pub subject: String,
    pub result: SheetGradingResult,
}

impl SheetReport {
    pub fn new(
        learner_id: impl Into<String>,
        exam_id: impl Into<String>,
        subject: impl Into<String>,
        result: SheetGradingResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            graded_at: Utc::now(),
            learner_id: learner_id.into(),
            exam_id: exam_id.into(),
            subject: subject.into(),
            result,
        }
    }

    /// The upsert key a persistence collaborator stores one report per.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.learner_id, &self.exam_id, &self.subject)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SheetReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
