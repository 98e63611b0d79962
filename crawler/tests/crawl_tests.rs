use sift_core::{search, Config, Error, IndexEntry, IndexReader, IndexWriter, Paginator, SledStore};
use sift_crawler::{crawl, crawl_all, document_id, Source, StaticSource, WebSource};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn temp_store() -> (TempDir, SledStore) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.database.host = dir.path().to_path_buf();
    (dir, SledStore::open(&config).unwrap())
}

/// Serve one canned HTTP response on a local port and return its URL.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let resp = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(resp.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });
    format!("http://{addr}/page.html")
}

#[tokio::test]
async fn static_source_returns_canned_data() {
    let source = StaticSource::new("Hello, World");
    assert_eq!(source.fetch("mydoc.html").await.unwrap(), b"Hello, World".to_vec());
    let failing = StaticSource::failing("Failed to get resource");
    assert!(matches!(failing.fetch("mydoc.html").await, Err(Error::Fetch { .. })));
}

#[tokio::test]
async fn web_source_fetches_bytes() {
    let url = serve_once("200 OK", "Hello, World").await;
    let source = WebSource::new("sift-test", Duration::from_secs(5)).unwrap();
    assert_eq!(source.fetch(&url).await.unwrap(), b"Hello, World".to_vec());
}

#[tokio::test]
async fn web_source_reports_failures() {
    let source = WebSource::new("sift-test", Duration::from_secs(5)).unwrap();
    assert!(matches!(source.fetch("").await, Err(Error::Fetch { .. })));

    let url = serve_once("404 Not Found", "gone").await;
    assert!(matches!(source.fetch(&url).await, Err(Error::Fetch { .. })));
}

#[tokio::test]
async fn crawl_stores_and_indexes() {
    let (_dir, store) = temp_store();
    let page = r#"<html><head><title>Cool</title><meta name="author" content="Ana"></head>
        <body>really cool stuff, really</body></html>"#;
    let source = StaticSource::new(page);

    let doc = crawl(&source, &store, "hello.html").await.unwrap();
    assert_eq!(doc.id, document_id("hello.html"));

    let stored = store.get_document(&doc.id).unwrap().unwrap();
    assert_eq!(stored.title, "Cool");
    assert_eq!(stored.author, "Ana");
    assert_eq!(stored.source, "hello.html");
    assert_eq!(stored.content, "really cool stuff, really");

    let results = search(&store, "really", 1, &Paginator::new(10)).unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.results[0].entry.count, 2);
}

#[tokio::test]
async fn crawl_surfaces_fetch_errors() {
    let (_dir, store) = temp_store();
    let source = StaticSource::failing("Failed to get resource");
    let err = crawl(&source, &store, "hello.html").await.unwrap_err();
    assert!(matches!(err, Error::Fetch { .. }));
    assert_eq!(store.document_count().unwrap(), 0);
}

#[tokio::test]
async fn crawl_rejects_repeated_resources() {
    let (_dir, store) = temp_store();
    let source = StaticSource::new("really cool stuff");
    crawl(&source, &store, "hello.html").await.unwrap();
    let err = crawl(&source, &store, "hello.html").await.unwrap_err();
    assert!(matches!(err, Error::DuplicateKey(_)));
}

#[tokio::test]
async fn crawl_all_splits_on_delimiter() {
    let (_dir, store) = temp_store();
    let source = StaticSource::new("shared words everywhere");
    let docs = crawl_all(&source, &store, "a.html| b.html||c.html", '|').await.unwrap();
    let sources: Vec<&str> = docs.iter().map(|d| d.source.as_str()).collect();
    assert_eq!(sources, vec!["a.html", "b.html", "c.html"]);
    assert_eq!(store.entries_by_words(&["shared"]).unwrap().len(), 3);
}

#[tokio::test]
async fn crawl_aborts_when_index_write_collides() {
    let (_dir, store) = temp_store();
    let id = document_id("hello.html");
    store.put_index(&IndexEntry::new("cool", &id)).unwrap();

    let source = StaticSource::new("really cool stuff");
    let err = crawl(&source, &store, "hello.html").await.unwrap_err();
    assert!(matches!(err, Error::DuplicateKey(key) if key == sift_core::entry_id(&id, "cool")));

    // The document row stays behind without content and without its other
    // entries, since the batch is all-or-nothing.
    let stored = store.get_document(&id).unwrap().unwrap();
    assert_eq!(stored.source, "hello.html");
    assert_eq!(stored.content, "");
    assert_eq!(store.entry_count().unwrap(), 1);
    assert!(store.entries_by_words(&["really"]).unwrap().is_empty());

    // Retrying collides on the document key until the tables are rebuilt.
    let retry = crawl(&source, &store, "hello.html").await.unwrap_err();
    assert!(matches!(retry, Error::DuplicateKey(key) if key == id));
    store.rebuild().unwrap();
    let doc = crawl(&source, &store, "hello.html").await.unwrap();
    assert_eq!(doc.content, "really cool stuff");
}
