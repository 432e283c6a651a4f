//! Prefix query - matches keyword values starting with a given prefix

use crate::query::ast::{clause, put_options, QueryNode};
use serde_json::{Map, Value};

/// Query that matches documents whose (non-analyzed) field starts with `prefix`
#[derive(Clone, Debug, PartialEq)]
pub struct PrefixQuery {
    pub field: String,
    pub prefix: String,
    pub name: Option<String>,
    pub boost: Option<f64>,
}

impl PrefixQuery {
    pub fn new(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            prefix: prefix.into(),
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

impl QueryNode for PrefixQuery {
    fn query_type(&self) -> &'static str {
        "prefix"
    }

    fn to_json(&self) -> Value {
        let mut spec = Map::new();
        spec.insert("value".to_string(), Value::String(self.prefix.clone()));
        put_options(&mut spec, &self.name, self.boost);

        let mut body = Map::new();
        body.insert(self.field.clone(), Value::Object(spec));
        clause("prefix", body)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn boost(&self) -> Option<f64> {
        self.boost
    }
}
