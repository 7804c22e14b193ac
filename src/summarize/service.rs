//! Summarization orchestrator: chunk, summarize, combine, shorten.

use super::budget::{self, DEFAULT_WORDS_PER_MINUTE};
use super::chunking::split_into_chunks;
use super::keypoints::select_key_points;
use super::outline::{HeuristicOutline, OutlineStrategy};
use super::prompts;
use super::readability;
use super::types::{SummarizeError, SummaryResult};
use crate::llm::{ChatRequest, CompletionClient};
use regex::Regex;

/// Tunables for one summarizer instance.
///
/// The defaults reproduce the behavior the pipeline was tuned with: a 12000
/// character chunk budget (conservative for the chat model's input window), a
/// 100 character minimum before anything is sent to the model, and a 1000
/// token per-request response ceiling.
#[derive(Debug, Clone)]
pub struct SummarizerOptions {
    /// Speaking rate used for word budgeting and duration estimates.
    pub words_per_minute: usize,
    /// Maximum characters packed into one model request.
    pub max_chunk_chars: usize,
    /// Minimum input characters required before chunking begins.
    pub min_text_chars: usize,
    /// Hard ceiling on the per-chunk response length in tokens.
    pub max_completion_tokens: u32,
    /// Sampling temperature for all requests.
    pub temperature: f32,
    /// Nucleus sampling parameter for per-chunk requests.
    pub top_p: f32,
}

impl Default for SummarizerOptions {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            max_chunk_chars: 12_000,
            min_text_chars: 100,
            max_completion_tokens: 1_000,
            temperature: 0.3,
            top_p: 0.9,
        }
    }
}

/// Drives the chunk-summarize-combine-shorten sequence against a completion
/// client.
///
/// The sequence is deliberately bounded: each chunk is summarized exactly
/// once, in source order, and at most one shorten pass runs afterwards. There
/// is no convergence loop, so a run issues at most `chunks + 1` requests.
/// Instances hold no mutable state, so independent summarizers can run
/// concurrently, each with its own client and options.
pub struct Summarizer {
    client: Box<dyn CompletionClient>,
    outline: Box<dyn OutlineStrategy>,
    options: SummarizerOptions,
    cleaner: TextCleaner,
}

impl Summarizer {
    /// Build a summarizer with default options and the heuristic outline
    /// extractor.
    pub fn new(client: Box<dyn CompletionClient>) -> Self {
        Self::with_options(client, SummarizerOptions::default())
    }

    /// Build a summarizer with explicit options.
    pub fn with_options(client: Box<dyn CompletionClient>, options: SummarizerOptions) -> Self {
        Self {
            client,
            outline: Box::new(HeuristicOutline::new()),
            options,
            cleaner: TextCleaner::new(),
        }
    }

    /// Replace the outline extraction strategy.
    pub fn with_outline_strategy(mut self, outline: Box<dyn OutlineStrategy>) -> Self {
        self.outline = outline;
        self
    }

    /// Summarize raw text into a video-ready result for the given duration.
    ///
    /// Input shorter than the configured minimum and zero durations are
    /// rejected before any model request is issued. Completion failures
    /// propagate immediately; no partial result is returned.
    pub async fn summarize(
        &self,
        text: &str,
        target_duration_minutes: u32,
    ) -> Result<SummaryResult, SummarizeError> {
        let trimmed = text.trim();
        if trimmed.len() < self.options.min_text_chars {
            return Err(SummarizeError::InsufficientText {
                chars: trimmed.len(),
                minimum: self.options.min_text_chars,
            });
        }

        let target_word_count =
            budget::target_word_count(target_duration_minutes, self.options.words_per_minute)?;
        let original_word_count = text.split_whitespace().count();

        // Outline heuristics read the raw text; cleaning collapses the
        // newlines the section patterns depend on.
        let outline = self.outline.extract(text);
        let cleaned = self.cleaner.clean(text);

        tracing::info!(
            original_words = original_word_count,
            target_words = target_word_count,
            duration_minutes = target_duration_minutes,
            "Starting summarization"
        );

        let summary = self
            .run_summary_rounds(&cleaned, target_word_count, target_duration_minutes)
            .await?;

        let word_count = summary.split_whitespace().count();
        let estimated_duration_minutes =
            budget::estimate_duration_minutes(word_count, self.options.words_per_minute);
        let key_points = select_key_points(&summary);
        let reading_metrics = readability::score(&summary);

        tracing::info!(
            summary_words = word_count,
            estimated_minutes = estimated_duration_minutes,
            key_points = key_points.len(),
            "Summarization complete"
        );

        Ok(SummaryResult {
            summary,
            key_points,
            key_topics: outline.key_topics,
            sections: outline.sections,
            word_count,
            target_word_count,
            estimated_duration_minutes,
            reading_metrics,
            original_word_count,
        })
    }

    /// First pass over every chunk, then at most one shorten pass.
    async fn run_summary_rounds(
        &self,
        text: &str,
        target_word_count: usize,
        duration_minutes: u32,
    ) -> Result<String, SummarizeError> {
        let chunks = split_into_chunks(text, self.options.max_chunk_chars);
        let chunk_total = chunks.len();
        let chunk_max_tokens = self
            .options
            .max_completion_tokens
            .min((target_word_count as u32).saturating_mul(3) / 2);

        // Chunks are summarized sequentially so the concatenation preserves
        // the source narrative order.
        let mut chunk_summaries = Vec::with_capacity(chunk_total);
        for (index, chunk) in chunks.iter().enumerate() {
            tracing::info!(
                chunk = index + 1,
                total = chunk_total,
                "Summarizing chunk"
            );
            let response = self
                .client
                .complete(ChatRequest {
                    system_prompt: prompts::CHUNK_SYSTEM_PROMPT.to_string(),
                    user_prompt: prompts::chunk_prompt(chunk, target_word_count, duration_minutes),
                    max_tokens: chunk_max_tokens,
                    temperature: self.options.temperature,
                    top_p: self.options.top_p,
                })
                .await?;
            chunk_summaries.push(response);
        }

        let combined = chunk_summaries.join(" ");
        let combined_words = combined.split_whitespace().count();

        // One shorten round when the first pass overshoots the budget by more
        // than 20%; never a second.
        if combined_words as f64 <= target_word_count as f64 * 1.2 {
            return Ok(combined);
        }

        tracing::info!(
            combined_words,
            target_word_count,
            "Summary over budget, requesting shorter version"
        );
        let shortened = self
            .client
            .complete(ChatRequest {
                system_prompt: prompts::SHORTEN_SYSTEM_PROMPT.to_string(),
                user_prompt: prompts::shorten_prompt(
                    &combined,
                    target_word_count,
                    duration_minutes,
                ),
                max_tokens: target_word_count as u32 + 200,
                temperature: self.options.temperature,
                top_p: 1.0,
            })
            .await?;

        Ok(shortened)
    }
}

/// Normalizes extracted PDF text before it is chunked.
struct TextCleaner {
    page_number: Regex,
    artifact: Regex,
    whitespace: Regex,
}

impl TextCleaner {
    fn new() -> Self {
        Self {
            page_number: Regex::new(r"(?m)\b\d+\b\s*$").expect("valid page-number pattern"),
            artifact: Regex::new(r#"[^\w\s.,!?;:\-()\[\]"']"#).expect("valid artifact pattern"),
            whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
        }
    }

    /// Whitespace is collapsed before the page-number pass runs, so the
    /// trailing-number pattern only ever matches at the end of the whole
    /// document. Numbers at the end of wrapped lines (years, figures,
    /// amounts) are content and must survive.
    fn clean(&self, text: &str) -> String {
        let text = self.whitespace.replace_all(text, " ");
        let text = self.artifact.replace_all(&text, "");
        let text = self.page_number.replace_all(&text, "");
        text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::CompletionError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub completion client that replays queued responses and counts calls.
    struct StubClient {
        calls: AtomicUsize,
        responses: Mutex<VecDeque<Result<String, CompletionError>>>,
        fallback: String,
    }

    impl StubClient {
        fn new(responses: Vec<Result<String, CompletionError>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                responses: Mutex::new(responses.into_iter().collect()),
                fallback: "stub summary".to_string(),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionClient for StubClient {
        async fn complete(&self, _request: ChatRequest) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .expect("stub responses lock")
                .pop_front()
                .unwrap_or_else(|| Ok(self.fallback.clone()))
        }
    }

    fn words(count: usize) -> String {
        vec!["word"; count].join(" ")
    }

    /// Short tokens so a few thousand words still fit one 12000-char chunk.
    fn short_words(count: usize) -> String {
        vec!["ab"; count].join(" ")
    }

    fn summarizer_with(stub: &std::sync::Arc<StubClient>) -> Summarizer {
        Summarizer::new(Box::new(SharedStub(stub.clone())))
    }

    /// Wrapper so tests can keep a handle to the stub after moving it in.
    struct SharedStub(std::sync::Arc<StubClient>);

    #[async_trait]
    impl CompletionClient for SharedStub {
        async fn complete(&self, request: ChatRequest) -> Result<String, CompletionError> {
            self.0.complete(request).await
        }
    }

    #[tokio::test]
    async fn rejects_short_input_before_any_model_call() {
        let stub = std::sync::Arc::new(StubClient::new(vec![]));
        let summarizer = summarizer_with(&stub);

        let error = summarizer
            .summarize("only fifty characters of text, not nearly enough", 15)
            .await
            .expect_err("short input");

        assert!(matches!(error, SummarizeError::InsufficientText { .. }));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn rejects_zero_duration_before_any_model_call() {
        let stub = std::sync::Arc::new(StubClient::new(vec![]));
        let summarizer = summarizer_with(&stub);

        let error = summarizer
            .summarize(&words(3000), 0)
            .await
            .expect_err("zero duration");

        assert!(matches!(error, SummarizeError::InvalidDuration { .. }));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn within_budget_summary_skips_the_shorten_pass() {
        // 3000 input words fit one 12000-char chunk; the 2000-word response is
        // under the 2790-word threshold for a 15-minute target.
        let stub = std::sync::Arc::new(StubClient::new(vec![Ok(words(2000))]));
        let summarizer = summarizer_with(&stub);

        let result = summarizer
            .summarize(&short_words(3000), 15)
            .await
            .expect("summary");

        assert_eq!(stub.call_count(), 1);
        assert_eq!(result.target_word_count, 2325);
        assert_eq!(result.word_count, 2000);
        assert_eq!(result.original_word_count, 3000);
        assert_eq!(result.estimated_duration_minutes, 12.9);
    }

    #[tokio::test]
    async fn over_budget_summary_triggers_exactly_one_shorten_pass() {
        // A 1-minute target budgets 155 words; a 400-word first pass exceeds
        // the 186-word threshold, so exactly one shorten request follows.
        let stub = std::sync::Arc::new(StubClient::new(vec![
            Ok(words(400)),
            Ok("A tight final summary.".to_string()),
        ]));
        let summarizer = summarizer_with(&stub);

        let result = summarizer.summarize(&words(200), 1).await.expect("summary");

        assert_eq!(stub.call_count(), 2);
        assert_eq!(result.summary, "A tight final summary.");
        assert_eq!(result.word_count, 4);
    }

    #[tokio::test]
    async fn each_chunk_is_summarized_in_order() {
        // Force several chunks with a tiny chunk budget and check order.
        let stub = std::sync::Arc::new(StubClient::new(vec![
            Ok("first".to_string()),
            Ok("second".to_string()),
            Ok("third".to_string()),
        ]));
        let summarizer = Summarizer::with_options(
            Box::new(SharedStub(stub.clone())),
            SummarizerOptions {
                max_chunk_chars: 60,
                min_text_chars: 10,
                ..SummarizerOptions::default()
            },
        );

        let result = summarizer.summarize(&words(30), 15).await.expect("summary");

        assert_eq!(stub.call_count(), 3);
        assert_eq!(result.summary, "first second third");
    }

    #[tokio::test]
    async fn completion_failure_propagates_with_cause() {
        let stub = std::sync::Arc::new(StubClient::new(vec![Err(
            CompletionError::RateLimited,
        )]));
        let summarizer = summarizer_with(&stub);

        let error = summarizer
            .summarize(&short_words(3000), 15)
            .await
            .expect_err("rate limited");

        assert!(matches!(
            error,
            SummarizeError::Completion(CompletionError::RateLimited)
        ));
        assert_eq!(stub.call_count(), 1);
    }

    #[test]
    fn cleaner_strips_artifacts_and_collapses_whitespace() {
        let cleaner = TextCleaner::new();
        let cleaned = cleaner.clean("Heading\n\nBody   text™ with junk\x07 chars.\n42\n");
        assert_eq!(cleaned, "Heading Body text with junk chars.");
    }

    #[test]
    fn cleaner_keeps_numbers_at_the_end_of_wrapped_lines() {
        let cleaner = TextCleaner::new();
        let cleaned = cleaner.clean("revenue grew to 500\nacross all regions.");
        assert_eq!(cleaned, "revenue grew to 500 across all regions.");
    }
}
