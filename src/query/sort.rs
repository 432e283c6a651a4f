//! Sort specifications for search requests

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Pseudo-field sorting by index order
pub const DOC_FIELD: &str = "_doc";
/// Pseudo-field sorting by relevance score
pub const SCORE_FIELD: &str = "_score";

/// Sort direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Which value of a multi-valued field to sort on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Min,
    Max,
    Sum,
    Avg,
    Median,
}

/// Options object for a field sort
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SortOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SortMode>,
    /// `_first`, `_last` or a custom substitute value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<String>,
}

impl SortOptions {
    pub fn new(order: SortOrder) -> Self {
        Self {
            order: Some(order),
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_missing(mut self, missing: impl Into<String>) -> Self {
        self.missing = Some(missing.into());
        self
    }
}

/// One entry of the `sort` array
///
/// The backend accepts either a bare field name or `{field: options}`.
/// Sorting on `_doc` or `_score` must use the bare form, so those two always
/// render as plain strings; any other field renders bare only when it has no
/// options.
#[derive(Clone, Debug, PartialEq)]
pub struct SortField {
    pub field: String,
    pub options: Option<SortOptions>,
}

impl SortField {
    /// Sort on a field using backend defaults
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            options: None,
        }
    }

    /// Sort on a field in the given direction
    pub fn ordered(field: impl Into<String>, ascending: bool) -> Self {
        let order = if ascending {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        };
        Self::with_options(field, SortOptions::new(order))
    }

    pub fn with_options(field: impl Into<String>, options: SortOptions) -> Self {
        Self {
            field: field.into(),
            options: Some(options),
        }
    }

    /// Index order
    pub fn doc() -> Self {
        Self::new(DOC_FIELD)
    }

    /// Relevance score
    pub fn score() -> Self {
        Self::new(SCORE_FIELD)
    }

    fn is_pseudo_field(&self) -> bool {
        self.field == DOC_FIELD || self.field == SCORE_FIELD
    }

    pub fn to_json(&self) -> Value {
        match self.options {
            Some(ref options) if !self.is_pseudo_field() => {
                let mut map = Map::new();
                map.insert(
                    self.field.clone(),
                    serde_json::to_value(options).unwrap_or_else(|_| Value::Object(Map::new())),
                );
                Value::Object(map)
            }
            _ => Value::String(self.field.clone()),
        }
    }
}

impl Serialize for SortField {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_and_field_sort() {
        let sort = vec![SortField::new("_score"), SortField::ordered("rank", true)];
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            json!(["_score", { "rank": { "order": "asc" } }])
        );
    }

    #[test]
    fn test_pseudo_fields_ignore_options() {
        let sort = SortField::with_options(DOC_FIELD, SortOptions::new(SortOrder::Desc));
        assert_eq!(sort.to_json(), json!("_doc"));
        assert_eq!(SortField::score().to_json(), json!("_score"));
    }

    #[test]
    fn test_plain_field_without_options() {
        assert_eq!(SortField::new("scientificName").to_json(), json!("scientificName"));
    }

    #[test]
    fn test_full_options() {
        let options = SortOptions::new(SortOrder::Desc)
            .with_mode(SortMode::Min)
            .with_missing("_last");
        let sort = SortField::with_options("classification.rank", options);
        assert_eq!(
            sort.to_json(),
            json!({ "classification.rank": { "order": "desc", "mode": "min", "missing": "_last" } })
        );
    }
}
