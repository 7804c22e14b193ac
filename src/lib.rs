#![deny(missing_docs)]

//! Core library for the videobrief PDF summarization pipeline.

/// Environment-driven configuration management.
pub mod config;
/// Chat-completion client abstraction and the OpenAI adapter.
pub mod llm;
/// Structured logging and tracing setup.
pub mod logging;
/// PDF validation and text extraction.
pub mod pdf;
/// Summary text-file rendering and output-path helpers.
pub mod report;
/// Summarization pipeline: chunking, budgeting, orchestration, post-processing.
pub mod summarize;
/// Text-to-speech generation for finished summaries.
pub mod voice;
