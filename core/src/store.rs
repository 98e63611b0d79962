use crate::error::Result;
use crate::index::{Document, IndexEntry};

/// Write side of the document and index tables.
///
/// Every `put_*` is insert-only: a key that already exists fails with
/// [`Error::DuplicateKey`](crate::Error::DuplicateKey) and the stored row is
/// left untouched.
pub trait IndexWriter {
    fn put_document(&self, doc: &Document) -> Result<()>;

    /// Set the content of a document that was stored before extraction
    /// finished.
    fn backfill_content(&self, document_id: &str, content: &str) -> Result<()>;

    fn put_index(&self, entry: &IndexEntry) -> Result<()>;

    /// All-or-nothing: if any entry collides nothing is written and the
    /// first colliding id is reported.
    fn batch_put_index(&self, entries: &[IndexEntry]) -> Result<()>;
}

/// Read side used by the search planner.
pub trait IndexReader {
    fn get_document(&self, id: &str) -> Result<Option<Document>>;

    /// Every entry whose word is exactly one of `words`, in storage order.
    fn entries_by_words(&self, words: &[&str]) -> Result<Vec<IndexEntry>>;
}
