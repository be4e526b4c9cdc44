//! Percentage-to-grade classification.
//!
//! A grading scale is an ordered table of percentage bands, each mapped
//! to a letter grade and GPA. Classification scans bands in descending
//! `min_percent` order and takes the first band containing the
//! percentage, so overlapping bands resolve to the higher one.

use serde::{Deserialize, Serialize};

use crate::error::GradingError;

/// One band of a grading scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeBand {
    /// Letter grade, e.g. "A+".
    pub label: String,
    pub min_percent: f64,
    pub max_percent: f64,
    pub gpa: f64,
    #[serde(default)]
    pub description: String,
}

/// The grade a percentage classified into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeAssignment {
    pub label: String,
    pub gpa: f64,
}

/// An ordered set of grade bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingScale {
    pub name: String,
    pub bands: Vec<GradeBand>,
}

impl GradingScale {
    pub fn new(name: impl Into<String>, bands: Vec<GradeBand>) -> Self {
        Self {
            name: name.into(),
            bands,
        }
    }

    /// A scale must have at least one band to classify anything.
    pub fn validate(&self) -> Result<(), GradingError> {
        if self.bands.is_empty() {
            return Err(GradingError::EmptyScale(self.name.clone()));
        }
        Ok(())
    }

    /// Map a percentage to its grade, or None when no band contains it.
    ///
    /// Callers treat None as "ungraded" rather than inventing a band.
    pub fn classify(&self, percentage: f64) -> Option<GradeAssignment> {
        let mut ordered: Vec<&GradeBand> = self.bands.iter().collect();
        ordered.sort_by(|a, b| {
            b.min_percent
                .partial_cmp(&a.min_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ordered
            .into_iter()
            .find(|band| percentage >= band.min_percent && percentage <= band.max_percent)
            .map(|band| GradeAssignment {
                label: band.label.clone(),
                gpa: band.gpa,
            })
    }
}

impl Default for GradingScale {
    /// The Nepal national grading scale: nine bands tiling [0, 100].
    fn default() -> Self {
        let band = |label: &str, min: f64, max: f64, gpa: f64, description: &str| GradeBand {
            label: label.into(),
            min_percent: min,
            max_percent: max,
            gpa,
            description: description.into(),
        };
        GradingScale::new(
            "Nepal",
            vec![
                band("A+", 90.0, 100.0, 4.00, "Outstanding"),
                band("A", 80.0, 89.99, 3.60, "Excellent"),
                band("B+", 70.0, 79.99, 3.20, "Very Good"),
                band("B", 60.0, 69.99, 2.80, "Good"),
                band("C+", 50.0, 59.99, 2.40, "Satisfactory"),
                band("C", 40.0, 49.99, 2.00, "Acceptable"),
                band("D", 32.0, 39.99, 1.60, "Partially Acceptable"),
                band("E", 20.0, 31.99, 0.80, "Insufficient"),
                band("NG", 0.0, 19.99, 0.00, "Not Graded"),
            ],
        )
    }
}

/// Whether the obtained marks clear the subject's pass mark.
///
/// Independent of grade banding: a subject can set its pass mark
/// anywhere regardless of where the letter grades fall.
pub fn is_pass(marks_obtained: f64, pass_marks: f64) -> bool {
    marks_obtained >= pass_marks
}
