//! Schema and field type system
//!
//! This module defines the declarative document schema:
//! - Field types (Keyword, Text, Integer, Long, Double, Boolean, Date, Object, Nested)
//! - Per-field inclusion, indexing and analyzer settings
//! - Dynamic mapping behavior

mod field_type;
mod mapping;

pub use field_type::{DynamicMapping, FieldType};
pub use mapping::{DocumentMapping, FieldMapping};
