use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use sift_core::{search, util::truncate_text, Config, Document, IndexReader, Pagination, Paginator, SledStore};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Bytes of document content returned as a snippet.
const SNIPPET_LEN: usize = 200;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_page")]
    pub page: i64,
}
fn default_page() -> i64 { 1 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub took_s: f64,
    pub number_of_pages: usize,
    pub pagination: Pagination,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub document_id: String,
    pub title: String,
    pub source: String,
    pub author: String,
    pub word: String,
    pub count: u64,
    pub snippet: String,
}

#[derive(Clone)]
pub struct AppState {
    pub store: SledStore,
    pub paginator: Paginator,
}

type ApiError = (StatusCode, Json<Value>);

pub fn build_app(config: &Config) -> Result<Router> {
    let store = SledStore::open(config)?;
    Ok(router(store, Paginator::from_config(config)))
}

pub fn router(store: SledStore, paginator: Paginator) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(AppState { store, paginator })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = search(&state.store, &params.q, params.page, &state.paginator).map_err(internal)?;
    let page = Paginator::normalize_page(params.page);
    let terms: Vec<&str> = params.q.split_whitespace().collect();

    let hits = results
        .results
        .into_iter()
        .map(|hit| SearchHit {
            snippet: highlight_terms(&truncate_text(&hit.document.content, " ...", SNIPPET_LEN), &terms),
            document_id: hit.document.id,
            title: hit.document.title,
            source: hit.document.source,
            author: hit.document.author,
            word: hit.entry.word,
            count: hit.entry.count,
        })
        .collect();

    Ok(Json(SearchResponse {
        count: results.count,
        took_s: results.time,
        number_of_pages: state.paginator.number_of_pages(results.count),
        pagination: state.paginator.pagination(page, results.count),
        results: hits,
        query: params.q,
    }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    match state.store.get_document(&doc_id).map_err(internal)? {
        Some(doc) => Ok(Json(doc)),
        None => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))),
    }
}

fn internal(err: sift_core::Error) -> ApiError {
    tracing::error!(error = %err, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": err.to_string() })))
}

/// Wrap exact occurrences of the query terms in `<em>`.
fn highlight_terms(snippet: &str, terms: &[&str]) -> String {
    let alternatives: Vec<String> = terms.iter().map(|t| regex::escape(t)).collect();
    if alternatives.is_empty() {
        return snippet.to_string();
    }
    match regex::Regex::new(&alternatives.join("|")) {
        Ok(pat) => pat.replace_all(snippet, |caps: &regex::Captures| format!("<em>{}</em>", &caps[0])).to_string(),
        Err(_) => snippet.to_string(),
    }
}
