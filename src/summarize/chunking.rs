//! Word-boundary chunking for model input limits.
//!
//! The chat API bounds how much text fits in one request, so long documents are
//! split into greedy, order-preserving chunks. Splits only ever occur between
//! whitespace-delimited tokens; rejoining the chunks with single spaces
//! reproduces the original token sequence.

/// Split text into chunks no longer than `max_chunk_chars` characters.
///
/// Tokens are packed greedily: a chunk is closed as soon as appending the next
/// token (plus one separator) would exceed the budget. A single token longer
/// than the budget is emitted alone in its own chunk rather than being split
/// or dropped. Empty or all-whitespace input yields no chunks.
pub fn split_into_chunks(text: &str, max_chunk_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        if current_len + word.len() + 1 > max_chunk_chars && !current.is_empty() {
            chunks.push(current.join(" "));
            current = vec![word];
            current_len = word.len();
        } else {
            current.push(word);
            current_len += word.len() + 1;
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}
