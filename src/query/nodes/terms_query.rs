//! Terms query - matches documents containing any of the specified values

use crate::error::EsError;
use crate::query::ast::{clause, put_options, QueryNode};
use crate::query::types::Scalar;
use crate::Result;
use serde_json::{Map, Value};

/// Query that matches documents whose field holds any of the given values
///
/// The backend caps the number of values per clause. This type does not
/// split oversized inputs; callers chunk first (see
/// [`IndexMaintenance::delete_name_usages`](crate::maintenance::IndexMaintenance::delete_name_usages)).
#[derive(Clone, Debug, PartialEq)]
pub struct TermsQuery {
    /// Field to match on
    pub field: String,
    /// Values to match, never empty, kept in input order
    values: Vec<Scalar>,
    pub name: Option<String>,
    pub boost: Option<f64>,
}

impl TermsQuery {
    /// Create a new terms query
    ///
    /// Fails with [`EsError::InvalidQuery`] when `values` is empty: a terms
    /// clause without values is rejected by the backend, and "match nothing"
    /// is for the caller to decide.
    pub fn new<I, V>(field: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        let field = field.into();
        let values: Vec<Scalar> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(EsError::InvalidQuery(format!(
                "terms query on '{}' requires at least one value",
                field
            )));
        }
        Ok(Self {
            field,
            values,
            name: None,
            boost: None,
        })
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

    /// Add a value to the query
    pub fn add_value(mut self, value: impl Into<Scalar>) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl QueryNode for TermsQuery {
    fn query_type(&self) -> &'static str {
        "terms"
    }

    fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            self.field.clone(),
            Value::Array(self.values.iter().map(Scalar::to_json).collect()),
        );
        put_options(&mut body, &self.name, self.boost);
        clause("terms", body)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn boost(&self) -> Option<f64> {
        self.boost
    }
}
