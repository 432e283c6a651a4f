//! Nested query - constrains nested sub-documents as self-contained units

use crate::query::ast::{clause, put_options, Query, QueryNode};
use crate::query::types::ScoreMode;
use serde_json::{Map, Value};

/// Query over documents that hold nested objects under `path`
///
/// The inner query is evaluated against each nested object on its own, so
/// conditions on two fields must hold for the same object. When no score mode
/// is set the backend default applies and `score_mode` is not sent.
///
/// ```json
/// {
///   "nested": {
///     "path": "vernacularNames",
///     "query": { "term": { "vernacularNames.language": { "value": "eng" } } },
///     "score_mode": "max"
///   }
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NestedQuery {
    pub path: String,
    pub query: Box<Query>,
    pub score_mode: Option<ScoreMode>,
    pub name: Option<String>,
    pub boost: Option<f64>,
}

impl NestedQuery {
    pub fn new(path: impl Into<String>, query: impl Into<Query>) -> Self {
        Self {
            path: path.into(),
            query: Box::new(query.into()),
            score_mode: None,
            name: None,
            boost: None,
        }
    }

    /// Set how child scores combine into the parent score
    pub fn with_score_mode(mut self, score_mode: ScoreMode) -> Self {
        self.score_mode = Some(score_mode);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl QueryNode for NestedQuery {
    fn query_type(&self) -> &'static str {
        "nested"
    }

    fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("path".to_string(), Value::String(self.path.clone()));
        body.insert("query".to_string(), self.query.to_json());
        if let Some(mode) = self.score_mode {
            body.insert(
                "score_mode".to_string(),
                Value::String(mode.as_str().to_string()),
            );
        }
        put_options(&mut body, &self.name, self.boost);
        clause("nested", body)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn boost(&self) -> Option<f64> {
        self.boost
    }
}
