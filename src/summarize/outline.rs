//! Topic and section extraction heuristics.
//!
//! Both extractors are best-effort: they scan the raw document with regular
//! expressions and frequency counts, and a document that defeats the
//! heuristics simply produces a short or empty outline, never an error. The
//! strategy trait keeps the orchestrator independent of the heuristics so an
//! NLP-backed implementation can be swapped in.

use super::types::Section;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Maximum number of topics reported per document.
const MAX_KEY_TOPICS: usize = 10;
/// Maximum number of sections reported per document.
const MAX_SECTIONS: usize = 10;

const STOP_WORDS: &[&str] = &[
    "this", "that", "with", "have", "will", "from", "they", "been", "were", "said", "each",
    "which", "their", "time", "would", "there", "could", "other", "after", "first", "well",
    "also", "want", "because", "these", "give", "most", "being", "does", "should", "might",
    "must", "shall", "into", "about", "than", "then", "them", "when", "where", "what", "your",
    "some", "more", "very", "such", "only", "over", "many", "made", "make", "between",
];

/// Topics and sections detected in a document.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    /// `(word, frequency)` pairs, most frequent first, ties in first-occurrence order.
    pub key_topics: Vec<(String, usize)>,
    /// Detected headings in document order.
    pub sections: Vec<Section>,
}

/// Strategy for deriving an [`Outline`] from raw document text.
pub trait OutlineStrategy: Send + Sync {
    /// Scan the text and return the detected topics and sections.
    fn extract(&self, text: &str) -> Outline;
}

/// Default frequency-and-regex outline extractor.
pub struct HeuristicOutline {
    topic_word: Regex,
    numbered_heading: Regex,
    caps_heading: Regex,
    title_heading: Regex,
    stop_words: HashSet<&'static str>,
}

impl HeuristicOutline {
    /// Build the extractor, compiling its heading patterns.
    pub fn new() -> Self {
        Self {
            topic_word: Regex::new(r"\b[a-z]{4,}\b").expect("valid topic-word pattern"),
            numbered_heading: Regex::new(r"\n\s*\d+\.\s+[A-Z][^.\n]*")
                .expect("valid numbered-heading pattern"),
            caps_heading: Regex::new(r"\n\s*[A-Z][A-Z\s]+:").expect("valid caps-heading pattern"),
            // Lookahead for the following capitalized line is checked manually.
            title_heading: Regex::new(r"\n\s*[A-Z][^.\n]*\n")
                .expect("valid title-heading pattern"),
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    fn extract_topics(&self, text: &str) -> Vec<(String, usize)> {
        let lowered = text.to_lowercase();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();

        for word in self.topic_word.find_iter(&lowered) {
            let word = word.as_str();
            if self.stop_words.contains(word) {
                continue;
            }
            let entry = counts.entry(word).or_insert(0);
            if *entry == 0 {
                first_seen.push(word);
            }
            *entry += 1;
        }

        // first_seen already carries the tie-break order; a stable sort by
        // descending count keeps equal-count words in first-occurrence order.
        let mut ranked: Vec<(String, usize)> = first_seen
            .into_iter()
            .map(|word| (word.to_string(), counts[word]))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(MAX_KEY_TOPICS);
        ranked
    }

    fn extract_sections(&self, text: &str) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();

        for pattern in [&self.numbered_heading, &self.caps_heading] {
            for found in pattern.find_iter(text) {
                sections.push(Section {
                    title: found.as_str().trim().to_string(),
                    position: found.start(),
                });
            }
        }

        // Title-case headers qualify only when the next line starts capitalized.
        for found in self.title_heading.find_iter(text) {
            let next = text[found.end()..].chars().next();
            if next.is_some_and(|c| c.is_ascii_uppercase()) {
                sections.push(Section {
                    title: found.as_str().trim().to_string(),
                    position: found.start(),
                });
            }
        }

        sections.sort_by_key(|section| section.position);
        sections.dedup();
        sections.truncate(MAX_SECTIONS);
        sections
    }
}

impl Default for HeuristicOutline {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineStrategy for HeuristicOutline {
    fn extract(&self, text: &str) -> Outline {
        Outline {
            key_topics: self.extract_topics(text),
            sections: self.extract_sections(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_rank_by_frequency() {
        let outline = HeuristicOutline::new().extract("machine learning machine learning deep learning");
        assert_eq!(outline.key_topics[0], ("learning".to_string(), 3));
        assert_eq!(outline.key_topics[1], ("machine".to_string(), 2));
        assert_eq!(outline.key_topics[2], ("deep".to_string(), 1));
    }

    #[test]
    fn equal_counts_keep_first_occurrence_order() {
        let outline = HeuristicOutline::new().extract("gamma delta gamma delta beta");
        assert_eq!(
            outline.key_topics,
            vec![
                ("gamma".to_string(), 2),
                ("delta".to_string(), 2),
                ("beta".to_string(), 1),
            ]
        );
    }

    #[test]
    fn short_and_stop_words_are_ignored() {
        let outline = HeuristicOutline::new().extract("this that with api ai ml neural neural");
        let words: Vec<&str> = outline
            .key_topics
            .iter()
            .map(|(word, _)| word.as_str())
            .collect();
        assert_eq!(words, vec!["neural"]);
    }

    #[test]
    fn numbered_and_caps_headings_are_detected() {
        let text = "intro\n1. Background Material\nbody text\nMETHODS OVERVIEW:\nmore body";
        let outline = HeuristicOutline::new().extract(text);
        let titles: Vec<&str> = outline
            .sections
            .iter()
            .map(|section| section.title.as_str())
            .collect();
        assert!(titles.iter().any(|title| title.contains("Background Material")));
        assert!(titles.iter().any(|title| title.contains("METHODS OVERVIEW:")));
    }

    #[test]
    fn sections_come_back_in_document_order() {
        let text = "x\nZEBRA SECTION:\ny\n1. Alpha Heading\nz";
        let outline = HeuristicOutline::new().extract(text);
        assert!(outline.sections.len() >= 2);
        let positions: Vec<usize> = outline.sections.iter().map(|s| s.position).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn title_case_heading_requires_capitalized_follower() {
        let text = "para\nResults And Findings\nThe data shows growth.\n";
        let outline = HeuristicOutline::new().extract(text);
        assert!(
            outline
                .sections
                .iter()
                .any(|section| section.title.contains("Results And Findings"))
        );
    }

    #[test]
    fn plain_prose_produces_empty_sections() {
        let outline = HeuristicOutline::new().extract("just one flat line of prose with no headings");
        assert!(outline.sections.is_empty());
    }
}
