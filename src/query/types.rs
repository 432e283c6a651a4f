//! Core value types shared by query nodes

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single leaf value in a term or terms clause
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Long(i64),
    Double(f64),
    String(String),
}

impl Scalar {
    /// Render as a JSON value
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Long(n) => Value::from(*n),
            Scalar::Double(f) => Value::from(*f),
            Scalar::String(s) => Value::String(s.clone()),
        }
    }

    /// Read a scalar from a JSON value; arrays, objects and null are not scalars
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Scalar::Long)
                .or_else(|| n.as_f64().map(Scalar::Double)),
            Value::String(s) => Some(Scalar::String(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Long(n) => write!(f, "{}", n),
            Scalar::Double(d) => write!(f, "{}", d),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Scalar::String(s.clone())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Long(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Long(n as i64)
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Scalar::Long(n as i64)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Double(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// How child document scores combine into the parent score of a nested query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    Avg,
    Max,
    Min,
    Sum,
    None,
}

impl ScoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMode::Avg => "avg",
            ScoreMode::Max => "max",
            ScoreMode::Min => "min",
            ScoreMode::Sum => "sum",
            ScoreMode::None => "none",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "avg" => Some(ScoreMode::Avg),
            "max" => Some(ScoreMode::Max),
            "min" => Some(ScoreMode::Min),
            "sum" => Some(ScoreMode::Sum),
            "none" => Some(ScoreMode::None),
            _ => None,
        }
    }
}

/// Minimum number of `should` clauses a bool query requires
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinimumShouldMatch {
    /// Absolute number of clauses
    Count(usize),
    /// Percentage string, e.g. "75%"
    Percentage(String),
}

impl MinimumShouldMatch {
    pub fn to_json(&self) -> Value {
        match self {
            MinimumShouldMatch::Count(n) => Value::from(*n),
            MinimumShouldMatch::Percentage(p) => Value::String(p.clone()),
        }
    }
}
