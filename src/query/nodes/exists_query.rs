//! Exists query

use crate::query::ast::{clause, put_options, QueryNode};
use serde_json::{Map, Value};

/// Matches documents that have any indexed value for `field`
#[derive(Clone, Debug, PartialEq)]
pub struct ExistsQuery {
    pub field: String,
    pub name: Option<String>,
    pub boost: Option<f64>,
}

impl ExistsQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: None,
            boost: None,
        }
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

impl QueryNode for ExistsQuery {
    fn query_type(&self) -> &'static str {
        "exists"
    }

    fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("field".to_string(), Value::String(self.field.clone()));
        put_options(&mut body, &self.name, self.boost);
        clause("exists", body)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn boost(&self) -> Option<f64> {
        self.boost
    }
}
