mod common;

use common::{document, temp_store};
use sift_core::{build_index, Error, IndexEntry, IndexReader, IndexWriter};

#[test]
fn it_round_trips_documents() {
    let (_dir, store) = temp_store();
    let doc = document("1", "http://example.com", "Examples", "some example content");
    store.put_document(&doc).unwrap();
    assert_eq!(store.get_document("1").unwrap(), Some(doc));
    assert_eq!(store.get_document("2").unwrap(), None);
}

#[test]
fn it_rejects_duplicate_documents() {
    let (_dir, store) = temp_store();
    store.put_document(&document("1", "http://a", "A", "first")).unwrap();
    let err = store.put_document(&document("1", "http://b", "B", "second")).unwrap_err();
    assert!(matches!(err, Error::DuplicateKey(id) if id == "1"));
    assert_eq!(store.get_document("1").unwrap().unwrap().title, "A");
}

#[test]
fn it_rejects_invalid_document_ids() {
    let (_dir, store) = temp_store();
    assert!(matches!(store.put_document(&document("", "s", "", "")), Err(Error::InvalidDocumentId(_))));
    assert!(matches!(store.put_document(&document("a\u{1f}b", "s", "", "")), Err(Error::InvalidDocumentId(_))));
}

#[test]
fn it_backfills_content() {
    let (_dir, store) = temp_store();
    store.put_document(&document("1", "http://a", "A", "")).unwrap();
    store.backfill_content("1", "late content").unwrap();
    assert_eq!(store.get_document("1").unwrap().unwrap().content, "late content");
    assert!(matches!(store.backfill_content("missing", "x"), Err(Error::NotFound(_))));
}

#[test]
fn it_rejects_duplicate_index_entries() {
    let (_dir, store) = temp_store();
    let entry = IndexEntry::new("example", "D1");
    store.put_index(&entry).unwrap();

    let mut again = IndexEntry::new("example", "D1");
    again.count = 9;
    let err = store.put_index(&again).unwrap_err();
    assert!(matches!(err, Error::DuplicateKey(id) if id == entry.id));

    let stored = store.entries_by_words(&["example"]).unwrap();
    assert_eq!(stored, vec![entry]);
}

#[test]
fn it_writes_batches_all_or_nothing() {
    let (_dir, store) = temp_store();
    let entries = build_index("rust systems programming rust", "D1");
    store.batch_put_index(&entries).unwrap();
    assert_eq!(store.entry_count().unwrap(), 3);

    // One fresh entry plus one collision: nothing from this batch lands.
    let batch = vec![IndexEntry::new("fresh", "D1"), IndexEntry::new("rust", "D1")];
    assert!(matches!(store.batch_put_index(&batch), Err(Error::DuplicateKey(_))));
    assert_eq!(store.entry_count().unwrap(), 3);
    assert!(store.entries_by_words(&["fresh"]).unwrap().is_empty());
}

#[test]
fn it_detects_collisions_inside_a_batch() {
    let (_dir, store) = temp_store();
    let batch = vec![IndexEntry::new("twice", "D1"), IndexEntry::new("twice", "D1")];
    assert!(matches!(store.batch_put_index(&batch), Err(Error::DuplicateKey(_))));
    assert_eq!(store.entry_count().unwrap(), 0);
}

#[test]
fn it_reindexes_with_identical_ids() {
    let (_dir, store) = temp_store();
    let text = "deterministic identifiers make reindexing idempotent";
    store.batch_put_index(&build_index(text, "D1")).unwrap();
    let err = store.batch_put_index(&build_index(text, "D1")).unwrap_err();
    assert!(matches!(err, Error::DuplicateKey(_)));
    // A different document may use the same words.
    store.batch_put_index(&build_index(text, "D2")).unwrap();
    assert_eq!(store.entries_by_words(&["identifiers"]).unwrap().len(), 2);
}

#[test]
fn it_looks_up_exact_words_only() {
    let (_dir, store) = temp_store();
    store.batch_put_index(&build_index("example examples counterexample", "D1")).unwrap();
    let found = store.entries_by_words(&["example"]).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].word, "example");
}

#[test]
fn it_rebuilds_empty_tables() {
    let (_dir, store) = temp_store();
    store.put_document(&document("1", "http://a", "A", "rust")).unwrap();
    store.batch_put_index(&build_index("rust", "1")).unwrap();

    store.rebuild().unwrap();
    assert_eq!(store.tables(), vec!["documents", "indexes", "indexes.word"]);
    assert_eq!(store.document_count().unwrap(), 0);
    assert_eq!(store.entry_count().unwrap(), 0);
    store.put_document(&document("1", "http://a", "A", "rust")).unwrap();
}

#[test]
fn it_fails_lookups_without_word_index() {
    let (_dir, store) = temp_store();
    assert!(store.drop_word_index().unwrap());
    assert!(matches!(store.entries_by_words(&["hello"]), Err(Error::Query(_))));
    store.rebuild().unwrap();
    assert!(store.entries_by_words(&["hello"]).unwrap().is_empty());
}
