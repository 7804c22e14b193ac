//! Summarization pipeline: chunking, budgeting, orchestration, and
//! post-processing of the finished summary.
//!
//! The single entry point is [`Summarizer::summarize`], which turns raw
//! extracted text plus a target spoken duration into a [`SummaryResult`].
//! Everything the orchestrator depends on — the completion client and the
//! outline strategy — is injected, so the whole pipeline runs against test
//! doubles.

pub mod budget;
pub mod chunking;
pub mod keypoints;
pub mod outline;
mod prompts;
pub mod readability;
mod service;
pub mod types;

pub use outline::{HeuristicOutline, Outline, OutlineStrategy};
pub use service::{Summarizer, SummarizerOptions};
pub use types::{Section, SummarizeError, SummaryResult};
