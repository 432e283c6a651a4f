//! Query DSL parser
//!
//! Reads the backend's JSON query grammar back into [`Query`] values. Accepts
//! exactly the shapes this crate renders, plus the short forms the backend
//! also allows (`{"term": {"field": value}}`, a single clause object in place
//! of a clause array).

use crate::error::EsError;
use crate::query::ast::Query;
use crate::query::nodes::{
    BoolQuery, ExistsQuery, MatchAllQuery, NestedQuery, PrefixQuery, TermQuery, TermsQuery,
};
use crate::query::types::{MinimumShouldMatch, Scalar, ScoreMode};
use crate::Result;
use serde_json::{Map, Value};

const CLAUSE_KEYS: [&str; 7] = ["bool", "term", "terms", "match_all", "nested", "prefix", "exists"];

/// Query parser for JSON DSL
pub struct QueryParser;

fn invalid(msg: impl Into<String>) -> EsError {
    EsError::InvalidQuery(msg.into())
}

impl QueryParser {
    /// Parse a JSON query into a query tree
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
    pub fn parse(json: &Value) -> Result<Query> {
        match json {
            Value::Object(map) => Self::parse_query_object(map),
            _ => Err(invalid("Query must be a JSON object")),
        }
    }

    /// Parse a JSON string into a query tree
    pub fn parse_str(json_str: &str) -> Result<Query> {
        let value: Value = serde_json::from_str(json_str)
            .map_err(|e| invalid(format!("Invalid JSON: {}", e)))?;
        Self::parse(&value)
    }

    fn parse_query_object(map: &Map<String, Value>) -> Result<Query> {
        // Handle wrapped query: { "query": { ... } }
        if let Some(query) = map.get("query") {
            return Self::parse(query);
        }

        let clause_keys: Vec<&String> = map
            .keys()
            .filter(|k| CLAUSE_KEYS.contains(&k.as_str()))
            .collect();
        if clause_keys.len() > 1 {
            return Err(invalid(format!(
                "Query object must hold exactly one clause, got {:?}",
                clause_keys
            )));
        }

        if let Some(v) = map.get("bool") {
            return Self::parse_bool(v);
        }
        if let Some(v) = map.get("term") {
            return Self::parse_term(v);
        }
        if let Some(v) = map.get("terms") {
            return Self::parse_terms(v);
        }
        if let Some(v) = map.get("match_all") {
            return Self::parse_match_all(v);
        }
        if let Some(v) = map.get("nested") {
            return Self::parse_nested(v);
        }
        if let Some(v) = map.get("prefix") {
            return Self::parse_prefix(v);
        }
        if let Some(v) = map.get("exists") {
            return Self::parse_exists(v);
        }

        Err(invalid(format!(
            "Unknown query type. Expected one of: bool, term, terms, match_all, nested, prefix, exists. Got keys: {:?}",
            map.keys().collect::<Vec<_>>()
        )))
    }

    fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
        value
            .as_object()
            .ok_or_else(|| invalid(format!("{} query must be an object", what)))
    }

    /// `_name` and `boost` as they appear in a clause body
    fn options(map: &Map<String, Value>) -> (Option<String>, Option<f64>) {
        (
            map.get("_name").and_then(|v| v.as_str()).map(String::from),
            map.get("boost").and_then(|v| v.as_f64()),
        )
    }

    /// First key that is not `_name` or `boost`
    fn field_entry<'a>(map: &'a Map<String, Value>, what: &str) -> Result<(&'a String, &'a Value)> {
        map.iter()
            .find(|(k, _)| *k != "_name" && *k != "boost")
            .ok_or_else(|| invalid(format!("{} query must specify a field", what)))
    }

    fn parse_bool(value: &Value) -> Result<Query> {
        let map = Self::as_object(value, "bool")?;

        let mut query = BoolQuery::new();
        if let Some(v) = map.get("filter") {
            query.filter = Self::parse_clause_array(v)?;
        }
        if let Some(v) = map.get("must") {
            query.must = Self::parse_clause_array(v)?;
        }
        if let Some(v) = map.get("must_not") {
            query.must_not = Self::parse_clause_array(v)?;
        }
        if let Some(v) = map.get("should") {
            query.should = Self::parse_clause_array(v)?;
        }
        if let Some(msm) = map.get("minimum_should_match") {
            query.minimum_should_match = Some(Self::parse_minimum_should_match(msm)?);
        }
        let (name, boost) = Self::options(map);
        query.name = name;
        query.boost = boost;

        Ok(query.into())
    }

    fn parse_clause_array(value: &Value) -> Result<Vec<Query>> {
        match value {
            Value::Array(arr) => arr.iter().map(Self::parse).collect(),
            // Single clause can be provided without array wrapper
            obj @ Value::Object(_) => Ok(vec![Self::parse(obj)?]),
            _ => Err(invalid("Clause must be an array or object")),
        }
    }

    fn parse_minimum_should_match(value: &Value) -> Result<MinimumShouldMatch> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .map(|n| MinimumShouldMatch::Count(n as usize))
                .ok_or_else(|| invalid(format!("Invalid minimum_should_match: {}", n))),
            Value::String(s) if s.ends_with('%') => Ok(MinimumShouldMatch::Percentage(s.clone())),
            Value::String(s) => s
                .parse()
                .map(MinimumShouldMatch::Count)
                .map_err(|_| invalid(format!("Invalid minimum_should_match: {}", s))),
            _ => Err(invalid("minimum_should_match must be a number or string")),
        }
    }

    fn scalar(value: &Value, what: &str) -> Result<Scalar> {
        Scalar::from_json(value)
            .ok_or_else(|| invalid(format!("{} value must be a string, number or boolean", what)))
    }

    /// Term query has the form `{ "field": value }` or `{ "field": { "value": ..., ... } }`
    fn parse_term(value: &Value) -> Result<Query> {
        let map = Self::as_object(value, "term")?;
        let (field, spec) = Self::field_entry(map, "term")?;

        let query = match spec {
            Value::Object(spec) => {
                let v = spec
                    .get("value")
                    .ok_or_else(|| invalid("term query spec must have 'value' field"))?;
                let mut q = TermQuery::new(field.clone(), Self::scalar(v, "term")?);
                let (name, boost) = Self::options(spec);
                q.name = name;
                q.boost = boost;
                q
            }
            other => TermQuery::new(field.clone(), Self::scalar(other, "term")?),
        };

        Ok(query.into())
    }

    /// Terms query has the form `{ "field": [v1, v2, ...], "_name"?, "boost"? }`
    fn parse_terms(value: &Value) -> Result<Query> {
        let map = Self::as_object(value, "terms")?;
        let (field, spec) = Self::field_entry(map, "terms")?;

        let values = spec
            .as_array()
            .ok_or_else(|| invalid("terms query value must be an array"))?
            .iter()
            .map(|v| Self::scalar(v, "terms"))
            .collect::<Result<Vec<_>>>()?;

        let mut query = TermsQuery::new(field.clone(), values)?;
        let (name, boost) = Self::options(map);
        query.name = name;
        query.boost = boost;

        Ok(query.into())
    }

    fn parse_match_all(value: &Value) -> Result<Query> {
        let mut query = MatchAllQuery::new();
        if let Some(map) = value.as_object() {
            let (name, boost) = Self::options(map);
            query.name = name;
            query.boost = boost;
        }
        Ok(query.into())
    }

    fn parse_nested(value: &Value) -> Result<Query> {
        let map = Self::as_object(value, "nested")?;

        let path = map
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| invalid("nested query must have a 'path'"))?;
        let inner = map
            .get("query")
            .ok_or_else(|| invalid("nested query must have a 'query'"))?;

        let mut query = NestedQuery::new(path, Self::parse(inner)?);
        if let Some(mode) = map.get("score_mode") {
            let mode = mode
                .as_str()
                .and_then(ScoreMode::parse)
                .ok_or_else(|| invalid(format!("Invalid score_mode: {}", mode)))?;
            query = query.with_score_mode(mode);
        }
        let (name, boost) = Self::options(map);
        query.name = name;
        query.boost = boost;

        Ok(query.into())
    }

    /// Prefix query has the form `{ "field": "prefix" }` or `{ "field": { "value": "prefix", ... } }`
    fn parse_prefix(value: &Value) -> Result<Query> {
        let map = Self::as_object(value, "prefix")?;
        let (field, spec) = Self::field_entry(map, "prefix")?;

        let query = match spec {
            Value::String(p) => PrefixQuery::new(field.clone(), p.clone()),
            Value::Object(spec) => {
                let prefix = spec
                    .get("value")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| invalid("prefix query spec must have 'value' field"))?;
                let mut q = PrefixQuery::new(field.clone(), prefix);
                let (name, boost) = Self::options(spec);
                q.name = name;
                q.boost = boost;
                q
            }
            _ => return Err(invalid("prefix query value must be a string or object")),
        };

        Ok(query.into())
    }

    fn parse_exists(value: &Value) -> Result<Query> {
        let map = Self::as_object(value, "exists")?;
        let field = map
            .get("field")
            .and_then(|v| v.as_str())
            .ok_or_else(|| invalid("exists query must have a 'field'"))?;

        let mut query = ExistsQuery::new(field);
        let (name, boost) = Self::options(map);
        query.name = name;
        query.boost = boost;

        Ok(query.into())
    }
}
