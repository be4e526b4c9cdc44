//! examgrade — exam answer grading engine.
//!
//! Deterministic grading for multiple-choice questions and probabilistic
//! grading for free-text answers (keyword matching, TF-IDF cosine
//! similarity, confidence fusion), aggregated into sheet-level results
//! with letter grades and GPA.
//!
//! Grading is a pure, synchronous computation: no I/O, no shared state,
//! no network. Persistence and presentation belong to callers.

pub mod engine;
pub mod error;
pub mod fusion;
pub mod lexical;
pub mod model;
pub mod parser;
pub mod report;
pub mod scale;
pub mod similarity;
pub mod text;
