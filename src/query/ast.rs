//! Query expression tree
//!
//! `Query` is the closed set of clause types this crate can send to the
//! backend. Every variant wraps a node struct that knows its own JSON shape;
//! `Query::to_json` dispatches with a single exhaustive match.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::EsError;
use crate::query::types::Scalar;
use crate::Result;

use super::nodes::{
    BoolQuery, ExistsQuery, MatchAllQuery, NestedQuery, PrefixQuery, TermQuery, TermsQuery,
};

/// Behaviour shared by all query node structs
pub trait QueryNode {
    /// Clause keyword in the backend grammar, e.g. `"term"`
    fn query_type(&self) -> &'static str;

    /// Render the complete clause, e.g. `{"term": {...}}`
    fn to_json(&self) -> Value;

    /// Name reported back by the backend in `matched_queries`
    fn name(&self) -> Option<&str>;

    /// Relevance multiplier, if one was set
    fn boost(&self) -> Option<f64>;
}

/// A node in the query language
#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    Bool(BoolQuery),
    Term(TermQuery),
    Terms(TermsQuery),
    MatchAll(MatchAllQuery),
    Nested(NestedQuery),
    Prefix(PrefixQuery),
    Exists(ExistsQuery),
}

impl Query {
    fn node(&self) -> &dyn QueryNode {
        match self {
            Query::Bool(q) => q,
            Query::Term(q) => q,
            Query::Terms(q) => q,
            Query::MatchAll(q) => q,
            Query::Nested(q) => q,
            Query::Prefix(q) => q,
            Query::Exists(q) => q,
        }
    }

    pub fn query_type(&self) -> &'static str {
        self.node().query_type()
    }

    pub fn to_json(&self) -> Value {
        self.node().to_json()
    }

    pub fn name(&self) -> Option<&str> {
        self.node().name()
    }

    pub fn boost(&self) -> Option<f64> {
        self.node().boost()
    }

    /// Name this query. Calling it again replaces the previous name.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        match self {
            Query::Bool(q) => Query::Bool(q.with_name(name)),
            Query::Term(q) => Query::Term(q.with_name(name)),
            Query::Terms(q) => Query::Terms(q.with_name(name)),
            Query::MatchAll(q) => Query::MatchAll(q.with_name(name)),
            Query::Nested(q) => Query::Nested(q.with_name(name)),
            Query::Prefix(q) => Query::Prefix(q.with_name(name)),
            Query::Exists(q) => Query::Exists(q.with_name(name)),
        }
    }

    /// Check that the whole tree can be rendered faithfully
    ///
    /// JSON has no NaN or infinity, so non-finite boosts and double values
    /// would go out as `null`. Fails with [`EsError::InvalidQuery`] on the
    /// first one found.
    pub fn validate(&self) -> Result<()> {
        check_boost(self.boost())?;
        match self {
            Query::Term(q) => check_scalar(&q.field, &q.value),
            Query::Terms(q) => q.values().iter().try_for_each(|v| check_scalar(&q.field, v)),
            Query::Bool(q) => q
                .filter
                .iter()
                .chain(&q.must)
                .chain(&q.must_not)
                .chain(&q.should)
                .try_for_each(Query::validate),
            Query::Nested(q) => q.query.validate(),
            Query::MatchAll(_) | Query::Prefix(_) | Query::Exists(_) => Ok(()),
        }
    }

    /// Boost this query. Calling it again replaces the previous boost.
    ///
    /// A non-finite boost is kept but rejected by [`Query::validate`].
    pub fn with_boost(self, boost: f64) -> Self {
        match self {
            Query::Bool(q) => Query::Bool(q.with_boost(boost)),
            Query::Term(q) => Query::Term(q.with_boost(boost)),
            Query::Terms(q) => Query::Terms(q.with_boost(boost)),
            Query::MatchAll(q) => Query::MatchAll(q.with_boost(boost)),
            Query::Nested(q) => Query::Nested(q.with_boost(boost)),
            Query::Prefix(q) => Query::Prefix(q.with_boost(boost)),
            Query::Exists(q) => Query::Exists(q.with_boost(boost)),
        }
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

macro_rules! impl_from_node {
    ($($node:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Query {
                fn from(q: $node) -> Self {
                    Query::$variant(q)
                }
            }
        )*
    };
}

impl_from_node! {
    BoolQuery => Bool,
    TermQuery => Term,
    TermsQuery => Terms,
    MatchAllQuery => MatchAll,
    NestedQuery => Nested,
    PrefixQuery => Prefix,
    ExistsQuery => Exists,
}

fn check_boost(boost: Option<f64>) -> Result<()> {
    match boost {
        Some(b) if !b.is_finite() => Err(EsError::InvalidQuery(format!(
            "boost must be a finite number, got {}",
            b
        ))),
        _ => Ok(()),
    }
}

fn check_scalar(field: &str, value: &Scalar) -> Result<()> {
    match value {
        Scalar::Double(d) if !d.is_finite() => Err(EsError::InvalidQuery(format!(
            "value for '{}' must be a finite number, got {}",
            field, d
        ))),
        _ => Ok(()),
    }
}

/// Append `_name` and `boost` to a clause body when set
pub(crate) fn put_options(body: &mut Map<String, Value>, name: &Option<String>, boost: Option<f64>) {
    if let Some(name) = name {
        body.insert("_name".to_string(), Value::String(name.clone()));
    }
    if let Some(boost) = boost {
        body.insert("boost".to_string(), Value::from(boost));
    }
}

/// Wrap a clause body under its keyword: `{keyword: body}`
pub(crate) fn clause(keyword: &str, body: Map<String, Value>) -> Value {
    let mut outer = Map::new();
    outer.insert(keyword.to_string(), Value::Object(body));
    Value::Object(outer)
}
