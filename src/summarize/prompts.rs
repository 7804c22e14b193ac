//! Prompt construction for the summarization orchestrator.

/// System prompt for per-chunk summarization requests.
pub(crate) const CHUNK_SYSTEM_PROMPT: &str = "You are an expert content creator who specializes \
in creating video-ready summaries. Your summaries are engaging, clear, and optimized for spoken \
presentation.";

/// System prompt for the single shorten pass.
pub(crate) const SHORTEN_SYSTEM_PROMPT: &str =
    "You are an expert at creating concise, video-ready summaries.";

/// Build the user prompt for summarizing one chunk.
pub(crate) fn chunk_prompt(text: &str, target_word_count: usize, duration_minutes: u32) -> String {
    format!(
        "Please create a comprehensive summary of the following text that is optimized for a \
{duration_minutes}-minute video presentation. The summary should be approximately \
{target_word_count} words and should:

1. Capture all main concepts and key findings
2. Be engaging and suitable for spoken presentation
3. Include important details while remaining concise
4. Flow naturally for video narration
5. Highlight the most significant points

Text to summarize:
{text}

Please provide a well-structured summary that would work perfectly for a \
{duration_minutes}-minute video script."
    )
}

/// Build the user prompt asking the model to condense an over-length summary.
pub(crate) fn shorten_prompt(
    combined_summary: &str,
    target_word_count: usize,
    duration_minutes: u32,
) -> String {
    format!(
        "Please shorten this summary to approximately {target_word_count} words while \
maintaining all key information and making it suitable for a {duration_minutes}-minute video \
presentation:

{combined_summary}"
    )
}
