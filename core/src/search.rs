use crate::error::Result;
use crate::index::{Document, IndexEntry};
use crate::pagination::Paginator;
use crate::store::IndexReader;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// One matching entry joined with the document it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub document: Document,
    pub entry: IndexEntry,
}

/// A page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Results {
    /// Matches before pagination.
    pub count: usize,
    pub results: Vec<Hit>,
    /// Seconds spent answering the query.
    pub time: f64,
}

/// Split a query into distinct lookup keys, keeping first-seen order.
///
/// Keys are matched verbatim: no lowercasing or stopword filtering, so a
/// capitalized key never matches the lowercase words in the index.
pub fn query_keys(query: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    query.split_whitespace().filter(|key| seen.insert(*key)).collect()
}

/// Find every entry whose word is one of the query keys, join it with its
/// document, rank by count (highest first) and return the requested page.
pub fn search<R: IndexReader + ?Sized>(reader: &R, query: &str, page: i64, paginator: &Paginator) -> Result<Results> {
    let start = Instant::now();
    let keys = query_keys(query);
    let page = Paginator::normalize_page(page);

    let entries = if keys.is_empty() { Vec::new() } else { reader.entries_by_words(&keys)? };

    let mut hits = Vec::with_capacity(entries.len());
    for entry in entries {
        match reader.get_document(&entry.document_id)? {
            Some(document) => hits.push(Hit { document, entry }),
            None => tracing::debug!(document_id = %entry.document_id, "entry without document dropped from join"),
        }
    }
    hits.sort_by(|a, b| b.entry.count.cmp(&a.entry.count));

    let count = hits.len();
    let (lower, upper) = paginator.bounds(page);
    let results: Vec<Hit> = hits.into_iter().skip(lower).take(upper.saturating_sub(lower)).collect();

    let time = start.elapsed().as_secs_f64();
    tracing::debug!(query, page, count, returned = results.len(), took_s = time, "search");
    Ok(Results { count, results, time })
}
