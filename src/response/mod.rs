//! Response models for the endpoints this crate calls

use crate::error::EsError;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /{index}/_delete_by_query`
///
/// `total` is what the backend reports as processed; under concurrent writes
/// it can differ from `deleted` (version conflicts).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteByQueryResponse {
    pub total: u64,
    #[serde(default)]
    pub deleted: u64,
    #[serde(default)]
    pub version_conflicts: u64,
    #[serde(default)]
    pub failures: Vec<Value>,
}

/// One distinct value of a faceted field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: Value,
    pub doc_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketsContainer {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

/// A facet as returned for a filter aggregation wrapping a terms aggregation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FacetResult {
    pub doc_count: u64,
    // Must match BUCKETS_LABEL
    #[serde(rename = "BUCKETS", default)]
    pub buckets_container: BucketsContainer,
}

impl FacetResult {
    /// Read the facet named `name` from a full search response body
    pub fn from_search_response(response: &Value, name: &str) -> Result<Self> {
        let facet = response
            .get("aggregations")
            .and_then(|aggs| aggs.get(name))
            .ok_or_else(|| EsError::backend(format!("Response has no aggregation '{}'", name)))?;
        serde_json::from_value(facet.clone())
            .map_err(|e| EsError::backend(format!("Unreadable aggregation '{}': {}", name, e)))
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets_container.buckets
    }
}
