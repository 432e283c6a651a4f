//! Boolean query - combines multiple clauses with AND, OR, NOT semantics

use crate::query::ast::{clause, put_options, Query, QueryNode};
use crate::query::types::MinimumShouldMatch;
use serde_json::{Map, Value};

/// Boolean query combining multiple clauses
///
/// The boolean query supports four types of clauses:
/// - `filter`: All clauses must match (AND). Does not contribute to score.
/// - `must`: All clauses must match (AND). Contributes to score.
/// - `must_not`: No clause must match (NOT). Does not contribute to score.
/// - `should`: At least one clause should match (OR). Contributes to score.
///
/// Scoring is left entirely to the backend. Roles without clauses are left
/// out of the rendered JSON.
///
/// # Example
///
/// ```json
/// {
///   "bool": {
///     "filter": [
///       { "term": { "datasetKey": { "value": 1000 } } },
///       { "terms": { "usageId": ["a", "b"] } }
///     ]
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoolQuery {
    /// Clauses that must match (AND, no scoring)
    pub filter: Vec<Query>,
    /// Clauses that must match (AND, scoring)
    pub must: Vec<Query>,
    /// Clauses that must not match (NOT, no scoring)
    pub must_not: Vec<Query>,
    /// Clauses where at least one should match (OR, scoring)
    pub should: Vec<Query>,
    /// Minimum number of should clauses that must match
    pub minimum_should_match: Option<MinimumShouldMatch>,
    pub name: Option<String>,
    pub boost: Option<f64>,
}

impl BoolQuery {
    /// Create a new empty boolean query
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter clause
    pub fn filter(mut self, query: impl Into<Query>) -> Self {
        self.filter.push(query.into());
        self
    }

    /// Add a must clause
    pub fn must(mut self, query: impl Into<Query>) -> Self {
        self.must.push(query.into());
        self
    }

    /// Add a must_not clause
    pub fn must_not(mut self, query: impl Into<Query>) -> Self {
        self.must_not.push(query.into());
        self
    }

    /// Add a should clause
    pub fn should(mut self, query: impl Into<Query>) -> Self {
        self.should.push(query.into());
        self
    }

    /// Set minimum should match
    pub fn with_minimum_should_match(mut self, msm: MinimumShouldMatch) -> Self {
        self.minimum_should_match = Some(msm);
        self
    }

    /// Set the query name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set boost factor
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Check if this is an empty query
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.should.is_empty()
            && self.must_not.is_empty()
            && self.filter.is_empty()
    }

    /// Get total number of clauses
    pub fn clause_count(&self) -> usize {
        self.must.len() + self.should.len() + self.must_not.len() + self.filter.len()
    }
}

fn put_role(body: &mut Map<String, Value>, role: &str, clauses: &[Query]) {
    if !clauses.is_empty() {
        body.insert(
            role.to_string(),
            Value::Array(clauses.iter().map(Query::to_json).collect()),
        );
    }
}

impl QueryNode for BoolQuery {
    fn query_type(&self) -> &'static str {
        "bool"
    }

    fn to_json(&self) -> Value {
        let mut body = Map::new();
        put_role(&mut body, "filter", &self.filter);
        put_role(&mut body, "must", &self.must);
        put_role(&mut body, "must_not", &self.must_not);
        put_role(&mut body, "should", &self.should);
        if let Some(ref msm) = self.minimum_should_match {
            body.insert("minimum_should_match".to_string(), msm.to_json());
        }
        put_options(&mut body, &self.name, self.boost);
        clause("bool", body)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn boost(&self) -> Option<f64> {
        self.boost
    }
}
