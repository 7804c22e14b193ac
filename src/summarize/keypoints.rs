//! Key-point selection for on-screen presentation.

/// Maximum number of key points surfaced per summary.
const MAX_KEY_POINTS: usize = 5;

/// Sentence length bounds (exclusive) for a usable on-screen key point.
const MIN_SENTENCE_CHARS: usize = 20;
const MAX_SENTENCE_CHARS: usize = 100;

const IMPORTANCE_KEYWORDS: &[&str] = &[
    "important",
    "key",
    "main",
    "primary",
    "essential",
    "critical",
    "significant",
    "major",
    "core",
    "fundamental",
];

/// Pick up to five presentation-ready sentences from the summary.
///
/// Sentences are split on `.`, `!` and `?`. A candidate must be strictly
/// between 20 and 100 characters after trimming. Sentences containing an
/// importance keyword are taken first, in summary order; remaining slots are
/// filled with the other candidates, also in summary order. Deterministic for
/// identical input.
pub fn select_key_points(summary: &str) -> Vec<String> {
    let mut preferred = Vec::new();
    let mut fallback = Vec::new();

    for sentence in summary.split(['.', '!', '?']) {
        let sentence = sentence.trim();
        let length = sentence.len();
        if length <= MIN_SENTENCE_CHARS || length >= MAX_SENTENCE_CHARS {
            continue;
        }

        let lowered = sentence.to_lowercase();
        if IMPORTANCE_KEYWORDS
            .iter()
            .any(|keyword| lowered.contains(keyword))
        {
            preferred.push(sentence.to_string());
        } else {
            fallback.push(sentence.to_string());
        }
    }

    preferred.extend(fallback);
    preferred.truncate(MAX_KEY_POINTS);
    preferred
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_sentences_are_selected_first() {
        let summary = "The weather was mild throughout the study. \
                       This is a key finding about AI. \
                       Some other qualifying sentence follows here.";
        let points = select_key_points(summary);
        assert_eq!(points[0], "This is a key finding about AI");
    }

    #[test]
    fn output_never_exceeds_five_points() {
        let summary = "A sentence that is long enough to qualify here. ".repeat(12);
        let points = select_key_points(&summary);
        assert!(points.len() <= 5);
    }

    #[test]
    fn short_and_long_sentences_are_skipped() {
        let long_sentence = format!("This sentence {} is definitely too long", "word ".repeat(20));
        let summary = format!("Too short. {long_sentence}. A reasonable mid-length sentence sits here.");
        let points = select_key_points(&summary);
        assert_eq!(points, vec!["A reasonable mid-length sentence sits here"]);
    }

    #[test]
    fn remaining_slots_preserve_sentence_order() {
        let summary = "First ordinary sentence that is long enough. \
                       Second ordinary sentence that is long enough. \
                       Third important sentence that is long enough.";
        let points = select_key_points(summary);
        assert_eq!(points[0], "Third important sentence that is long enough");
        assert_eq!(points[1], "First ordinary sentence that is long enough");
        assert_eq!(points[2], "Second ordinary sentence that is long enough");
    }

    #[test]
    fn empty_summary_yields_no_points() {
        assert!(select_key_points("").is_empty());
    }
}
