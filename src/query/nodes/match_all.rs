//! Match-all query

use crate::query::ast::{clause, put_options, QueryNode};
use serde_json::{Map, Value};

/// A query that matches every document in the index
///
/// Used as the constraint for whole-index operations such as truncation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchAllQuery {
    pub name: Option<String>,
    pub boost: Option<f64>,
}

impl MatchAllQuery {
    pub fn new() -> Self {
        Self::default()
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

impl QueryNode for MatchAllQuery {
    fn query_type(&self) -> &'static str {
        "match_all"
    }

    fn to_json(&self) -> Value {
        let mut body = Map::new();
        put_options(&mut body, &self.name, self.boost);
        clause("match_all", body)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn boost(&self) -> Option<f64> {
        self.boost
    }
}
