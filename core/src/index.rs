use crate::tokenizer::{normalize, tokenize, Input};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Joins a document id and a word into an index entry id. U+001F is
/// whitespace, so it never appears inside a token.
pub const ID_SEPARATOR: char = '\u{1f}';

/// Below this many tokens per rayon job normalization stays on one thread.
const MIN_PARALLEL_CHUNK: usize = 512;

/// One crawled resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub source: String,
    pub title: String,
    pub author: String,
    pub content: String,
}

impl Document {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self { id: id.into(), source: source.into(), ..Default::default() }
    }
}

/// "`word` occurs `count` times in `document_id`".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: String,
    pub word: String,
    pub count: u64,
    pub document_id: String,
}

impl IndexEntry {
    pub fn new(word: impl Into<String>, document_id: impl Into<String>) -> Self {
        let word = word.into();
        let document_id = document_id.into();
        Self { id: entry_id(&document_id, &word), word, count: 1, document_id }
    }
}

/// Deterministic id of the (document, word) pair.
pub fn entry_id(document_id: &str, word: &str) -> String {
    let mut id = String::with_capacity(document_id.len() + word.len() + 1);
    id.push_str(document_id);
    id.push(ID_SEPARATOR);
    id.push_str(word);
    id
}

/// Build one entry per distinct qualifying word of `content`, in order of
/// first occurrence, with `count` holding the post-filter frequency.
pub fn build_index<'a>(content: impl Into<Input<'a>>, document_id: &str) -> Vec<IndexEntry> {
    let tokens = tokenize(content);

    // Indexed parallel collect keeps scan order, so the merge below sees the
    // same sequence no matter how the jobs were scheduled.
    let normalized: Vec<Option<String>> = tokens
        .par_iter()
        .with_min_len(MIN_PARALLEL_CHUNK)
        .map(|token| normalize(token))
        .collect();

    let mut entries: Vec<IndexEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for word in normalized.into_iter().flatten() {
        match positions.get(&word) {
            Some(&i) => entries[i].count += 1,
            None => {
                positions.insert(word.clone(), entries.len());
                entries.push(IndexEntry::new(word, document_id));
            }
        }
    }
    tracing::trace!(document_id, words = entries.len(), "built index");
    entries
}
