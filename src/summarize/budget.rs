//! Spoken-duration budgeting.
//!
//! Narration length is planned around an average speaking rate; the default of
//! 155 words per minute sits in the middle of the common 150-160 range.

use super::types::SummarizeError;

/// Default speaking rate in words per minute.
pub const DEFAULT_WORDS_PER_MINUTE: usize = 155;

/// Convert a target spoken duration into a word budget.
///
/// Fails when the duration is zero; there is no meaningful budget for an
/// empty video.
pub fn target_word_count(
    duration_minutes: u32,
    words_per_minute: usize,
) -> Result<usize, SummarizeError> {
    if duration_minutes == 0 {
        return Err(SummarizeError::InvalidDuration {
            minutes: duration_minutes,
        });
    }
    Ok(duration_minutes as usize * words_per_minute)
}

/// Estimate the spoken duration of a text in minutes, rounded to one decimal.
pub fn estimate_duration_minutes(word_count: usize, words_per_minute: usize) -> f64 {
    if words_per_minute == 0 {
        return 0.0;
    }
    let minutes = word_count as f64 / words_per_minute as f64;
    (minutes * 10.0).round() / 10.0
}
