//! Readability indices for the finished summary.
//!
//! Scores are advisory: they help judge whether a narration script will read
//! comfortably, but a scoring failure must never sink the pipeline. Degenerate
//! input (no words, no sentences) therefore yields an empty map instead of an
//! error.

use std::collections::HashMap;

/// Compute the standard readability indices for a text.
///
/// Returns `flesch_reading_ease`, `flesch_kincaid_grade`,
/// `automated_readability_index` and `coleman_liau_index`, or an empty map
/// when the text has no scoreable words or sentences.
pub fn score(text: &str) -> HashMap<String, f64> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();
    let sentence_count = text
        .split(['.', '!', '?'])
        .filter(|segment| !segment.trim().is_empty())
        .count();

    if word_count == 0 || sentence_count == 0 {
        return HashMap::new();
    }

    let syllable_count: usize = words.iter().map(|word| count_syllables(word)).sum();
    let letter_count = text.chars().filter(|c| c.is_ascii_alphanumeric()).count();

    let words_per_sentence = word_count as f64 / sentence_count as f64;
    let syllables_per_word = syllable_count as f64 / word_count as f64;
    let letters_per_word = letter_count as f64 / word_count as f64;

    let flesch_reading_ease = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    let flesch_kincaid_grade = 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59;
    let automated_readability_index =
        4.71 * letters_per_word + 0.5 * words_per_sentence - 21.43;
    let letters_per_100 = letters_per_word * 100.0;
    let sentences_per_100 = 100.0 * sentence_count as f64 / word_count as f64;
    let coleman_liau_index = 0.0588 * letters_per_100 - 0.296 * sentences_per_100 - 15.8;

    HashMap::from([
        ("flesch_reading_ease".to_string(), flesch_reading_ease),
        ("flesch_kincaid_grade".to_string(), flesch_kincaid_grade),
        (
            "automated_readability_index".to_string(),
            automated_readability_index,
        ),
        ("coleman_liau_index".to_string(), coleman_liau_index),
    ])
}

/// Vowel-group syllable estimate with a silent-e adjustment; floor of one.
fn count_syllables(word: &str) -> usize {
    let lowered: Vec<char> = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if lowered.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0usize;
    let mut previous_was_vowel = false;
    for &c in &lowered {
        let vowel = is_vowel(c);
        if vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = vowel;
    }

    // Trailing silent 'e', except in "-le" endings like "table".
    let len = lowered.len();
    if len > 2
        && lowered[len - 1] == 'e'
        && lowered[len - 2] != 'l'
        && !is_vowel(lowered[len - 2])
        && count > 1
    {
        count -= 1;
    }

    count.max(1)
}
