//! Field type definitions
//!
//! Defines how a document field is indexed by the backend.

use super::mapping::DocumentMapping;
use serde::{Deserialize, Serialize};

/// Field data type
#[derive(Clone, Debug, PartialEq)]
pub enum FieldType {
    /// Exact match keyword field
    ///
    /// Indexed as a single term; supports term, terms and prefix queries and
    /// aggregations.
    Keyword,

    /// Full-text field, analyzed before indexing
    Text,

    /// 32-bit signed integer
    Integer,

    /// 64-bit signed integer
    Long,

    /// 64-bit floating point
    Double,

    /// Boolean value
    Boolean,

    /// Date/time field
    Date,

    /// Object whose fields are flattened into the parent document
    Object(DocumentMapping),

    /// Array of objects queried as self-contained units via nested queries
    Nested(DocumentMapping),
}

impl FieldType {
    /// Type name in the backend mapping language
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Keyword => "keyword",
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Long => "long",
            FieldType::Double => "double",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Object(_) => "object",
            FieldType::Nested(_) => "nested",
        }
    }

    /// Sub-field mappings for object and nested types
    pub fn properties(&self) -> Option<&DocumentMapping> {
        match self {
            FieldType::Object(props) | FieldType::Nested(props) => Some(props),
            _ => None,
        }
    }

    /// Whether an analyzer setting applies to this type
    pub fn is_analyzed(&self) -> bool {
        matches!(self, FieldType::Text)
    }
}

/// Dynamic mapping behavior for unmapped fields
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DynamicMapping {
    /// Automatically detect and map new fields
    True,
    /// Ignore unmapped fields (don't index them)
    False,
    /// Reject documents with unmapped fields (default)
    #[default]
    Strict,
}

impl DynamicMapping {
    pub fn as_str(&self) -> &'static str {
        match self {
            DynamicMapping::True => "true",
            DynamicMapping::False => "false",
            DynamicMapping::Strict => "strict",
        }
    }

    /// Check if unmapped fields should cause an error
    pub fn should_reject_unmapped(&self) -> bool {
        matches!(self, DynamicMapping::Strict)
    }
}
