#![allow(dead_code)]

use sift_core::{Config, Document, SledStore};
use tempfile::TempDir;

pub fn temp_store() -> (TempDir, SledStore) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.database.host = dir.path().to_path_buf();
    config.database.name = "testing".into();
    let store = SledStore::open(&config).unwrap();
    (dir, store)
}

pub fn document(id: &str, source: &str, title: &str, content: &str) -> Document {
    Document {
        id: id.into(),
        source: source.into(),
        title: title.into(),
        author: String::new(),
        content: content.into(),
    }
}
