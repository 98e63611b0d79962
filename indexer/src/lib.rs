use anyhow::{Context, Result};
use serde::Deserialize;
use sift_core::{build_index, util::truncate_text, Document, IndexWriter, Paginator, Results};
use sift_crawler::document_id;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Characters of content shown per search hit.
pub const PREVIEW_LEN: usize = 150;

/// A pre-crawled document in a `.json` or `.jsonl` dump. Field aliases
/// accept the `{id, title, body, url}` records written by crawl exports.
#[derive(Debug, Deserialize)]
pub struct InputDoc {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "url")]
    pub source: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(alias = "body")]
    pub content: String,
}

impl From<InputDoc> for Document {
    fn from(doc: InputDoc) -> Self {
        let id = doc.id.filter(|id| !id.is_empty()).unwrap_or_else(|| document_id(&doc.source));
        Document { id, source: doc.source, title: doc.title, author: doc.author, content: doc.content }
    }
}

/// `.json` and `.jsonl` files under `input`, or `input` itself if it is a file.
pub fn input_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

/// Read every document of one dump file.
pub fn read_documents(file: &Path) -> Result<Vec<Document>> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    let mut docs = Vec::new();
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let doc: InputDoc = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}", file.display(), n + 1))?;
            docs.push(doc.into());
        }
    } else {
        let json: serde_json::Value = serde_json::from_reader(reader)?;
        match json {
            serde_json::Value::Array(arr) => {
                for v in arr {
                    docs.push(serde_json::from_value::<InputDoc>(v)?.into());
                }
            }
            serde_json::Value::Object(_) => docs.push(serde_json::from_value::<InputDoc>(json)?.into()),
            _ => tracing::warn!(file = %file.display(), "skipping file without documents"),
        }
    }
    Ok(docs)
}

/// Store one document and its index entries.
pub fn index_document<W: IndexWriter + ?Sized>(writer: &W, doc: &Document) -> Result<usize> {
    writer.put_document(doc)?;
    let entries = build_index(&doc.content, &doc.id);
    writer.batch_put_index(&entries)?;
    Ok(entries.len())
}

/// Index every document found under `input`. Stops at the first error.
pub fn index_path<W: IndexWriter + ?Sized>(writer: &W, input: &Path) -> Result<usize> {
    let mut indexed = 0usize;
    let mut entries = 0usize;
    for file in input_files(input) {
        for doc in read_documents(&file)? {
            entries += index_document(writer, &doc).with_context(|| format!("indexing {}", doc.source))?;
            indexed += 1;
        }
    }
    tracing::info!(documents = indexed, entries, "ingested documents");
    Ok(indexed)
}

/// Human-readable rendering of one page of results.
pub fn render_results(results: &Results, page: usize, paginator: &Paginator) -> String {
    let mut out = String::new();
    if results.count == 0 {
        out.push_str("No results found\n");
        return out;
    }
    out.push_str(&format!("Found {} results in {:.4}s\n", results.count, results.time));
    for hit in &results.results {
        out.push('\n');
        if !hit.document.title.is_empty() {
            out.push_str(&format!("{}\n", hit.document.title));
        }
        out.push_str(&format!("{}\n", hit.document.source));
        out.push_str(&format!("{}\n", truncate_text(&hit.document.content, " ...", PREVIEW_LEN)));
    }
    let p = paginator.pagination(page, results.count);
    out.push_str(&format!("\nPage {} of {}", p.current_page, paginator.number_of_pages(p.page_count)));
    if p.has_previous_page {
        out.push_str(&format!(" | previous: {}", paginator.previous(p.current_page)));
    }
    if p.has_next_page {
        out.push_str(&format!(" | next: {}", paginator.next(p.current_page, p.page_count)));
    }
    out.push('\n');
    out
}
