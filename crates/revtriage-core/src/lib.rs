//! Core pipeline for triaging text-revision datasets: batch "good"/"bad"
//! labeling through a locally served LLM, plus the multi-model consensus
//! merge that collapses per-model verdicts into one quality label.

pub mod consensus;
pub mod dataset;
pub mod errors;
pub mod labeler;
pub mod models;
pub mod prompt;
pub mod providers;

pub use errors::{Result, TriageError};
