//! Shared helpers for integration tests

#![allow(dead_code)]

pub mod fake_backend;

use colindex::query::QueryParser;
use colindex::{EsError, EsRequest, EsResponse, Query, RequestExecutor, Result};
use serde_json::json;
use std::sync::Mutex;

/// Executor that answers every request itself and records what it was sent
///
/// Delete-by-query calls report one deletion per value of the first `terms`
/// clause found in the body, so summed counts can be checked against the
/// number of ids that went out.
#[derive(Default)]
pub struct RecordingExecutor {
    requests: Mutex<Vec<EsRequest>>,
    fail_on_call: Option<usize>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`-th request (1-based) with a backend error
    pub fn failing_on(n: usize) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_on_call: Some(n),
        }
    }

    pub fn requests(&self) -> Vec<EsRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Parsed query of every recorded request that carried a body
    pub fn queries(&self) -> Vec<Query> {
        self.requests()
            .iter()
            .filter_map(|r| r.body.as_deref())
            .map(|body| QueryParser::parse_str(body).unwrap())
            .collect()
    }
}

fn terms_len(query: &Query) -> usize {
    match query {
        Query::Terms(q) => q.len(),
        Query::Bool(q) => q
            .filter
            .iter()
            .chain(&q.must)
            .map(terms_len)
            .find(|n| *n > 0)
            .unwrap_or(0),
        _ => 0,
    }
}

impl RequestExecutor for RecordingExecutor {
    fn perform(&self, request: &EsRequest) -> Result<EsResponse> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request.clone());
        if self.fail_on_call == Some(requests.len()) {
            return Ok(EsResponse::new(503, "Service Unavailable", ""));
        }

        let total = match request.body.as_deref() {
            Some(body) => terms_len(&QueryParser::parse_str(body)?),
            None => 0,
        };
        let body = json!({ "total": total, "deleted": total, "count": total });
        Ok(EsResponse::new(200, "OK", body.to_string()))
    }
}

/// Route library logs to the test output; filter with `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Collect `n` distinct usage ids
pub fn usage_ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("u{}", i)).collect()
}

pub fn is_backend_error(err: &EsError) -> bool {
    matches!(err, EsError::Backend { .. })
}
