//! Request execution against the backend
//!
//! [`RequestExecutor`] is the seam to the HTTP layer; [`HttpExecutor`] is the
//! reqwest-backed implementation. [`execute`] and [`read_field`] are the single
//! place where HTTP status codes and raw bodies are turned into [`EsError`]s.

mod http;

pub use http::HttpExecutor;

use crate::error::EsError;
use crate::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// HTTP verbs the maintenance layer needs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Head,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Head => "HEAD",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to the backend: verb, path relative to the backend root, optional JSON body
#[derive(Clone, Debug, PartialEq)]
pub struct EsRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

impl EsRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_json_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Status line and body of a backend response
#[derive(Clone, Debug, PartialEq)]
pub struct EsResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl EsResponse {
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Parse the body into a typed response model
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| EsError::backend(format!("Unreadable response body: {}", e)))
    }
}

/// Performs one HTTP exchange with the backend
///
/// Implementations return `Ok` for every response the server sent, whatever
/// its status; `Err` is reserved for exchanges that could not complete.
/// Executors must be shareable across threads.
pub trait RequestExecutor: Send + Sync {
    fn perform(&self, request: &EsRequest) -> Result<EsResponse>;
}

impl<E: RequestExecutor + ?Sized> RequestExecutor for &E {
    fn perform(&self, request: &EsRequest) -> Result<EsResponse> {
        (**self).perform(request)
    }
}

impl<E: RequestExecutor + ?Sized> RequestExecutor for std::sync::Arc<E> {
    fn perform(&self, request: &EsRequest) -> Result<EsResponse> {
        (**self).perform(request)
    }
}

/// Perform `request`, turning any status >= 400 into [`EsError::Backend`]
pub fn execute<E: RequestExecutor + ?Sized>(executor: &E, request: &EsRequest) -> Result<EsResponse> {
    execute_accepting(executor, request, &[])
}

/// [`execute`], except that error statuses listed in `accepted` are returned
/// as responses for the caller to inspect
pub fn execute_accepting<E: RequestExecutor + ?Sized>(
    executor: &E,
    request: &EsRequest,
    accepted: &[u16],
) -> Result<EsResponse> {
    let response = executor.perform(request)?;
    debug!(
        method = %request.method,
        path = %request.path,
        status = response.status,
        "backend request"
    );
    if response.is_error() && !accepted.contains(&response.status) {
        return Err(EsError::backend(response.reason.clone()));
    }
    Ok(response)
}

/// Parse the response body as a JSON object and extract `key`
pub fn read_field(response: &EsResponse, key: &str) -> Result<Value> {
    let value: Value = response.json()?;
    let object = value
        .as_object()
        .ok_or_else(|| EsError::backend("Response body is not a JSON object"))?;
    object
        .get(key)
        .cloned()
        .ok_or_else(|| EsError::backend(format!("Response has no '{}' field", key)))
}

/// [`read_field`] for non-negative integer fields such as counts and totals
pub fn read_count(response: &EsResponse, key: &str) -> Result<u64> {
    read_field(response, key)?
        .as_u64()
        .ok_or_else(|| EsError::backend(format!("Response field '{}' is not a count", key)))
}
