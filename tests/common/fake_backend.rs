//! Fake search backend for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1, on its own thread and runtime so that tests can drive it with
//! the blocking [`HttpExecutor`](colindex::HttpExecutor). Serves:
//! - `HEAD /{index}`, `PUT /{index}`, `DELETE /{index}`
//! - `POST /{index}/_refresh`
//! - `GET /{index}/_count`
//! - `POST /{index}/_delete_by_query`
//!
//! Writes are only visible to `_count` after `_refresh`, like the real thing.
//! Delete-by-query bodies are read back with [`QueryParser`] and evaluated
//! against the stored JSON documents.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{head, post},
    Json, Router,
};
use colindex::query::{Query, QueryParser};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct IndexState {
    /// Latest documents, including unrefreshed writes
    docs: Vec<Value>,
    /// Documents as of the last refresh
    visible: Vec<Value>,
}

#[derive(Default)]
struct BackendState {
    indices: HashMap<String, IndexState>,
    delete_calls: usize,
    /// 1-based delete-by-query call that answers 500
    fail_delete_call: Option<usize>,
}

type Shared = Arc<Mutex<BackendState>>;

/// Handle to the running fake backend
pub struct FakeBackend {
    addr: SocketAddr,
    state: Shared,
}

impl FakeBackend {
    /// Start the fake backend on a random port
    pub fn start() -> std::io::Result<Self> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        let state: Shared = Arc::new(Mutex::new(BackendState::default()));

        let app = Router::new()
            .route(
                "/{index}",
                head(index_exists).put(create_index).delete(delete_index),
            )
            .route("/{index}/_refresh", post(refresh))
            .route("/{index}/_count", axum::routing::get(count))
            .route("/{index}/_delete_by_query", post(delete_by_query))
            .with_state(state.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("fake backend runtime");
            rt.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("fake backend listener");
                axum::serve(listener, app).await.expect("fake backend server");
            });
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the backend (e.g. `http://127.0.0.1:PORT`)
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Store a document without making it visible
    pub fn index_document(&self, index: &str, doc: Value) {
        let mut state = self.state.lock().unwrap();
        state
            .indices
            .entry(index.to_string())
            .or_default()
            .docs
            .push(doc);
    }

    /// Number of delete-by-query calls received so far
    pub fn delete_calls(&self) -> usize {
        self.state.lock().unwrap().delete_calls
    }

    /// Answer the `n`-th delete-by-query call (1-based, counted from start) with a 500
    pub fn fail_delete_call(&self, n: usize) {
        self.state.lock().unwrap().fail_delete_call = Some(n);
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

fn not_found(index: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": { "type": "index_not_found_exception", "index": index } })),
    )
        .into_response()
}

async fn index_exists(Path(index): Path<String>, State(state): State<Shared>) -> StatusCode {
    if state.lock().unwrap().indices.contains_key(&index) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn create_index(Path(index): Path<String>, State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    if state.indices.contains_key(&index) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "type": "resource_already_exists_exception" } })),
        )
            .into_response();
    }
    state.indices.insert(index, IndexState::default());
    Json(json!({ "acknowledged": true })).into_response()
}

async fn delete_index(Path(index): Path<String>, State(state): State<Shared>) -> Response {
    match state.lock().unwrap().indices.remove(&index) {
        Some(_) => Json(json!({ "acknowledged": true })).into_response(),
        None => not_found(&index),
    }
}

async fn refresh(Path(index): Path<String>, State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    match state.indices.get_mut(&index) {
        Some(idx) => {
            idx.visible = idx.docs.clone();
            Json(json!({ "_shards": { "failed": 0 } })).into_response()
        }
        None => not_found(&index),
    }
}

async fn count(Path(index): Path<String>, State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    match state.indices.get(&index) {
        Some(idx) => Json(json!({ "count": idx.visible.len() })).into_response(),
        None => not_found(&index),
    }
}

async fn delete_by_query(
    Path(index): Path<String>,
    State(state): State<Shared>,
    body: String,
) -> Response {
    let mut state = state.lock().unwrap();
    state.delete_calls += 1;
    if state.fail_delete_call == Some(state.delete_calls) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let query = match serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| QueryParser::parse(&v).ok())
    {
        Some(query) => query,
        None => return StatusCode::BAD_REQUEST.into_response(),
    };

    let idx = match state.indices.get_mut(&index) {
        Some(idx) => idx,
        None => return not_found(&index),
    };
    let before = idx.docs.len();
    idx.docs.retain(|doc| !matches(&query, doc));
    let deleted = before - idx.docs.len();

    Json(json!({ "total": deleted, "deleted": deleted, "failures": [] })).into_response()
}

// ---------------------------------------------------------------------------
// Query evaluation
// ---------------------------------------------------------------------------

fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |v, key| v.get(key))
}

fn field_equals(doc: &Value, field: &str, expected: &Value) -> bool {
    match lookup(doc, field) {
        Some(Value::Array(values)) => values.iter().any(|v| v == expected),
        Some(v) => v == expected,
        None => false,
    }
}

fn matches(query: &Query, doc: &Value) -> bool {
    match query {
        Query::MatchAll(_) => true,
        Query::Term(q) => field_equals(doc, &q.field, &q.value.to_json()),
        Query::Terms(q) => q
            .values()
            .iter()
            .any(|v| field_equals(doc, &q.field, &v.to_json())),
        Query::Prefix(q) => lookup(doc, &q.field)
            .and_then(Value::as_str)
            .map_or(false, |s| s.starts_with(&q.prefix)),
        Query::Exists(q) => lookup(doc, &q.field).map_or(false, |v| !v.is_null()),
        Query::Nested(q) => match lookup(doc, &q.path) {
            Some(Value::Array(children)) => children.iter().any(|child| {
                let mut wrapper = json!({});
                wrapper[q.path.as_str()] = child.clone();
                matches(&q.query, &wrapper)
            }),
            _ => false,
        },
        Query::Bool(q) => {
            let required = q.filter.iter().chain(&q.must).all(|c| matches(c, doc));
            let excluded = q.must_not.iter().any(|c| matches(c, doc));
            let optional_ok = q.should.is_empty()
                || !(q.filter.is_empty() && q.must.is_empty())
                || q.should.iter().any(|c| matches(c, doc));
            required && !excluded && optional_ok
        }
    }
}
