//! Search request envelope

use crate::query::aggregation::{Aggregation, Aggregations};
use crate::query::ast::Query;
use crate::query::sort::SortField;
use crate::Result;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Top-level body sent to search, count and delete-by-query endpoints
///
/// Every part is optional; absent parts are left out of the JSON. Without a
/// query the backend decides (most endpoints then match everything).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchRequest {
    pub query: Option<Query>,
    pub sort: Vec<SortField>,
    pub aggs: Aggregations,
    pub from: Option<usize>,
    pub size: Option<usize>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Envelope holding just `query`
    pub fn for_query(query: impl Into<Query>) -> Self {
        Self::new().with_query(query)
    }

    pub fn with_query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Append a sort directive
    pub fn sort(mut self, sort: SortField) -> Self {
        self.sort.push(sort);
        self
    }

    /// Add a named aggregation; a later one with the same name replaces it
    pub fn aggregation(mut self, name: impl Into<String>, aggregation: impl Into<Aggregation>) -> Self {
        self.aggs.insert(name, aggregation.into());
        self
    }

    pub fn from(mut self, from: usize) -> Self {
        self.from = Some(from);
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Reject queries that cannot be rendered faithfully (see [`Query::validate`])
    pub fn validate(&self) -> Result<()> {
        if let Some(ref query) = self.query {
            query.validate()?;
        }
        self.aggs.validate()
    }

    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(from) = self.from {
            body.insert("from".to_string(), Value::from(from));
        }
        if let Some(size) = self.size {
            body.insert("size".to_string(), Value::from(size));
        }
        if let Some(ref query) = self.query {
            body.insert("query".to_string(), query.to_json());
        }
        if !self.sort.is_empty() {
            body.insert(
                "sort".to_string(),
                Value::Array(self.sort.iter().map(SortField::to_json).collect()),
            );
        }
        if !self.aggs.is_empty() {
            body.insert("aggs".to_string(), self.aggs.to_json());
        }
        Value::Object(body)
    }
}

impl Serialize for SearchRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Compact JSON, as sent over the wire
impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::{MatchAllQuery, TermQuery};
    use serde_json::json;

    #[test]
    fn test_empty_request() {
        assert_eq!(SearchRequest::new().to_json(), json!({}));
        assert_eq!(SearchRequest::new().to_string(), "{}");
    }

    #[test]
    fn test_validate_checks_aggregation_filters() {
        let request = SearchRequest::for_query(MatchAllQuery::new()).aggregation(
            "ranks",
            Aggregation::facet(Query::from(MatchAllQuery::new()).with_boost(f64::NAN), "rank", 10),
        );
        assert!(request.validate().is_err());
        assert!(SearchRequest::for_query(TermQuery::new("datasetKey", 3))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_query_only() {
        let request = SearchRequest::for_query(MatchAllQuery::new());
        assert_eq!(request.to_json(), json!({ "query": { "match_all": {} } }));
    }

    #[test]
    fn test_full_request() {
        let request = SearchRequest::new()
            .with_query(TermQuery::new("datasetKey", 3))
            .sort(SortField::score())
            .sort(SortField::ordered("rank", true))
            .aggregation("ranks", Aggregation::facet(MatchAllQuery::new(), "rank", 10))
            .from(20)
            .size(10);

        assert_eq!(
            request.to_json(),
            json!({
                "from": 20,
                "size": 10,
                "query": { "term": { "datasetKey": { "value": 3 } } },
                "sort": ["_score", { "rank": { "order": "asc" } }],
                "aggs": {
                    "ranks": {
                        "filter": { "match_all": {} },
                        "aggs": { "BUCKETS": { "terms": { "field": "rank", "size": 10 } } }
                    }
                }
            })
        );
    }

    #[test]
    fn test_display_is_compact_json() {
        let request = SearchRequest::for_query(TermQuery::new("sectorKey", 9));
        assert_eq!(
            request.to_string(),
            r#"{"query":{"term":{"sectorKey":{"value":9}}}}"#
        );
    }
}
