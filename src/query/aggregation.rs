//! Aggregations attached to a search request
//!
//! A facet is modelled as a filter aggregation (restricting the documents to
//! the facet's constraint) wrapping a terms aggregation that buckets the
//! distinct values of one field. The inner terms aggregation is always named
//! [`BUCKETS_LABEL`] so responses can be read back uniformly.

use crate::query::ast::Query;
use crate::Result;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Name of the terms aggregation nested inside a facet
pub const BUCKETS_LABEL: &str = "BUCKETS";

/// Named aggregations in insertion order; names are unique
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregations {
    entries: Vec<(String, Aggregation)>,
}

impl Aggregations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an aggregation, replacing (in place) any existing one with the same name
    pub fn insert(&mut self, name: impl Into<String>, aggregation: Aggregation) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = aggregation,
            None => self.entries.push((name, aggregation)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Aggregation> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, agg)| agg)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Validate the filter queries of every (sub-)aggregation
    pub fn validate(&self) -> Result<()> {
        self.entries.iter().try_for_each(|(_, agg)| match agg {
            Aggregation::Filter(agg) => {
                agg.filter.validate()?;
                agg.aggs.validate()
            }
            Aggregation::Terms(agg) => agg.aggs.validate(),
        })
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, agg) in &self.entries {
            map.insert(name.clone(), agg.to_json());
        }
        Value::Object(map)
    }
}

/// Restricts its sub-aggregations to documents matching `filter`
#[derive(Clone, Debug, PartialEq)]
pub struct FilterAggregation {
    pub filter: Query,
    pub aggs: Aggregations,
}

impl FilterAggregation {
    pub fn new(filter: impl Into<Query>) -> Self {
        Self {
            filter: filter.into(),
            aggs: Aggregations::new(),
        }
    }

    pub fn with_aggregation(mut self, name: impl Into<String>, aggregation: Aggregation) -> Self {
        self.aggs.insert(name, aggregation);
        self
    }
}

/// Buckets documents by the distinct values of `field`
#[derive(Clone, Debug, PartialEq)]
pub struct TermsAggregation {
    pub field: String,
    pub size: Option<usize>,
    pub aggs: Aggregations,
}

impl TermsAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            size: None,
            aggs: Aggregations::new(),
        }
    }

    /// Maximum number of buckets to return
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_aggregation(mut self, name: impl Into<String>, aggregation: Aggregation) -> Self {
        self.aggs.insert(name, aggregation);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Aggregation {
    Filter(FilterAggregation),
    Terms(TermsAggregation),
}

impl Aggregation {
    /// Facet over `field` restricted to documents matching `filter`
    pub fn facet(filter: impl Into<Query>, field: impl Into<String>, size: usize) -> Self {
        Aggregation::Filter(FilterAggregation::new(filter).with_aggregation(
            BUCKETS_LABEL,
            Aggregation::Terms(TermsAggregation::new(field).with_size(size)),
        ))
    }

    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        let aggs = match self {
            Aggregation::Filter(agg) => {
                body.insert("filter".to_string(), agg.filter.to_json());
                &agg.aggs
            }
            Aggregation::Terms(agg) => {
                let mut terms = Map::new();
                terms.insert("field".to_string(), Value::String(agg.field.clone()));
                if let Some(size) = agg.size {
                    terms.insert("size".to_string(), Value::from(size));
                }
                body.insert("terms".to_string(), Value::Object(terms));
                &agg.aggs
            }
        };
        if !aggs.is_empty() {
            body.insert("aggs".to_string(), aggs.to_json());
        }
        Value::Object(body)
    }
}

impl From<FilterAggregation> for Aggregation {
    fn from(agg: FilterAggregation) -> Self {
        Aggregation::Filter(agg)
    }
}

impl From<TermsAggregation> for Aggregation {
    fn from(agg: TermsAggregation) -> Self {
        Aggregation::Terms(agg)
    }
}

impl Serialize for Aggregation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
