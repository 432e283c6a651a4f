//! Term query - exact match on a field

use crate::query::ast::{clause, put_options, QueryNode};
use crate::query::types::Scalar;
use serde_json::{Map, Value};

/// Query that matches documents whose field holds exactly one value
///
/// Serializes to the long form so that `_name` and `boost` have a place to go:
///
/// ```json
/// { "term": { "datasetKey": { "value": 1000, "boost": 2.0 } } }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TermQuery {
    /// Field to match on
    pub field: String,
    /// Exact value to match
    pub value: Scalar,
    pub name: Option<String>,
    pub boost: Option<f64>,
}

impl TermQuery {
    /// Create a new term query
    pub fn new(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            name: None,
            boost: None,
        }
    }

    /// Set the query name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl QueryNode for TermQuery {
    fn query_type(&self) -> &'static str {
        "term"
    }

    fn to_json(&self) -> Value {
        let mut spec = Map::new();
        spec.insert("value".to_string(), self.value.to_json());
        put_options(&mut spec, &self.name, self.boost);

        let mut body = Map::new();
        body.insert(self.field.clone(), Value::Object(spec));
        clause("term", body)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn boost(&self) -> Option<f64> {
        self.boost
    }
}
