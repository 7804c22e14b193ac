//! Result record and error definitions for the summarization pipeline.

use crate::llm::CompletionError;
use std::collections::HashMap;
use thiserror::Error;

/// Errors emitted by the summarization pipeline.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Input text was too short to summarize; rejected before any model call.
    #[error("Insufficient text for summarization: {chars} characters (minimum {minimum})")]
    InsufficientText {
        /// Characters present in the trimmed input.
        chars: usize,
        /// Minimum characters required by the pipeline.
        minimum: usize,
    },
    /// Target duration must be a positive number of minutes.
    #[error("Invalid target duration: {minutes} minutes")]
    InvalidDuration {
        /// Duration supplied by the caller.
        minutes: u32,
    },
    /// A completion request failed; the run is abandoned without retry.
    #[error("Summarization request failed: {0}")]
    Completion(#[from] CompletionError),
}

/// Heading detected in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text, trimmed.
    pub title: String,
    /// Byte offset of the heading in the source text.
    pub position: usize,
}

/// Aggregate output of one summarization run.
///
/// Created once per pipeline invocation and immutable thereafter; downstream
/// consumers (report writer, CLI, voice pipeline) only read its fields.
#[derive(Debug, Clone)]
pub struct SummaryResult {
    /// Final narration-ready summary text.
    pub summary: String,
    /// Up to five presentation-ready sentences, in summary order.
    pub key_points: Vec<String>,
    /// Up to ten `(topic, frequency)` pairs, most frequent first.
    pub key_topics: Vec<(String, usize)>,
    /// Up to ten detected headings, in document order.
    pub sections: Vec<Section>,
    /// Whitespace-delimited word count of `summary`.
    pub word_count: usize,
    /// Word budget derived from the requested duration.
    pub target_word_count: usize,
    /// Spoken duration estimate in minutes, rounded to one decimal.
    pub estimated_duration_minutes: f64,
    /// Readability indices; empty when scoring was not possible.
    pub reading_metrics: HashMap<String, f64>,
    /// Word count of the raw input text.
    pub original_word_count: usize,
}
