use crate::extract::extract;
use crate::source::Source;
use sha1::{Digest, Sha1};
use sift_core::{build_index, Document, IndexWriter, Result};
use std::time::Instant;

/// Separator between resources in a crawl list.
pub const DEFAULT_DELIMITER: char = '|';

/// Documents are keyed by the SHA-1 of their source, so crawling the same
/// resource twice collides on the primary key.
pub fn document_id(source: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fetch one resource, store it as a document and write its index entries.
///
/// The document is stored before indexing and its content is backfilled
/// once the entries are written. The first failure aborts the crawl. A
/// failed index write leaves the document row with empty content and no
/// entries; the resource can only be crawled again after a rebuild.
pub async fn crawl<S, W>(source: &S, writer: &W, resource: &str) -> Result<Document>
where
    S: Source,
    W: IndexWriter + ?Sized,
{
    let start = Instant::now();
    tracing::info!(resource, "grabbing");
    let data = source.fetch(resource).await?;
    let page = extract(&String::from_utf8_lossy(&data));

    let mut doc = Document {
        id: document_id(resource),
        source: resource.to_string(),
        title: page.title,
        author: page.author,
        content: String::new(),
    };
    writer.put_document(&doc)?;
    tracing::info!(document_id = %doc.id, words = page.text.split_whitespace().count(), "created document");

    let entries = build_index(&page.text, &doc.id);
    writer.batch_put_index(&entries)?;
    writer.backfill_content(&doc.id, &page.text)?;
    doc.content = page.text;

    tracing::info!(
        document_id = %doc.id,
        entries = entries.len(),
        took_s = start.elapsed().as_secs_f64(),
        "indexing complete"
    );
    Ok(doc)
}

/// Crawl every resource in a `delimiter`-separated list, in order.
pub async fn crawl_all<S, W>(source: &S, writer: &W, resources: &str, delimiter: char) -> Result<Vec<Document>>
where
    S: Source,
    W: IndexWriter + ?Sized,
{
    let mut docs = Vec::new();
    for resource in resources.split(delimiter).map(str::trim).filter(|r| !r.is_empty()) {
        docs.push(crawl(source, writer, resource).await?);
    }
    Ok(docs)
}
