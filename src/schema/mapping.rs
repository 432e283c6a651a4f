//! Document mapping definitions
//!
//! A [`DocumentMapping`] is declared once per document type: which fields
//! exist, whether each is sent to the backend at all, whether it is indexed,
//! and which analyzer text fields use. The backend schema is generated from it.

use super::field_type::{DynamicMapping, FieldType};
use serde_json::{Map, Value};

/// Field mapping configuration
#[derive(Clone, Debug, PartialEq)]
pub struct FieldMapping {
    /// Field data type
    pub field_type: FieldType,

    /// Whether the field is part of the schema at all (default: true)
    ///
    /// Excluded fields must never carry a value in indexed documents, since
    /// strict mappings reject undeclared fields.
    pub included: bool,

    /// Whether to index this field (default: true). Non-indexed fields are
    /// stored but not searchable.
    pub indexed: bool,

    /// Analyzer for text fields
    pub analyzer: Option<String>,
}

impl FieldMapping {
    /// Create a new field mapping with the given type
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            included: true,
            indexed: true,
            analyzer: None,
        }
    }

    pub fn keyword() -> Self {
        Self::new(FieldType::Keyword)
    }

    pub fn text() -> Self {
        Self::new(FieldType::Text)
    }

    pub fn integer() -> Self {
        Self::new(FieldType::Integer)
    }

    pub fn long() -> Self {
        Self::new(FieldType::Long)
    }

    pub fn double() -> Self {
        Self::new(FieldType::Double)
    }

    pub fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    pub fn date() -> Self {
        Self::new(FieldType::Date)
    }

    pub fn object(properties: DocumentMapping) -> Self {
        Self::new(FieldType::Object(properties))
    }

    pub fn nested(properties: DocumentMapping) -> Self {
        Self::new(FieldType::Nested(properties))
    }

    /// Leave the field out of the schema
    pub fn excluded(mut self) -> Self {
        self.included = false;
        self
    }

    /// Set whether the field should be indexed
    pub fn with_index(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    /// Set the analyzer (text fields only)
    pub fn with_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    /// Render the backend definition for this field
    pub fn to_json(&self) -> Value {
        let mut def = Map::new();
        match self.field_type {
            // "object" is the backend default and is not spelled out
            FieldType::Object(_) => {}
            ref other => {
                def.insert("type".to_string(), Value::String(other.type_name().to_string()));
            }
        }
        if !self.indexed {
            def.insert("index".to_string(), Value::Bool(false));
        }
        if let Some(ref analyzer) = self.analyzer {
            if self.field_type.is_analyzed() {
                def.insert("analyzer".to_string(), Value::String(analyzer.clone()));
            }
        }
        if let Some(props) = self.field_type.properties() {
            def.insert("properties".to_string(), props.properties_json());
        }
        Value::Object(def)
    }
}

/// Ordered set of field mappings for one document type
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentMapping {
    fields: Vec<(String, FieldMapping)>,
    dynamic: DynamicMapping,
}

impl DocumentMapping {
    /// Create a new empty (strict) mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field mapping, replacing an earlier one with the same name
    pub fn field(mut self, name: impl Into<String>, mapping: FieldMapping) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = mapping,
            None => self.fields.push((name, mapping)),
        }
        self
    }

    /// Set dynamic mapping behavior
    pub fn with_dynamic(mut self, dynamic: DynamicMapping) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn dynamic(&self) -> DynamicMapping {
        self.dynamic
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a field mapping by path (supports dot notation)
    pub fn get_field(&self, path: &str) -> Option<&FieldMapping> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let field = self
            .fields
            .iter()
            .find(|(n, _)| n == head)
            .map(|(_, m)| m)?;
        match rest {
            None => Some(field),
            Some(rest) => field.field_type.properties()?.get_field(rest),
        }
    }

    /// Check if a field exists
    pub fn has_field(&self, path: &str) -> bool {
        self.get_field(path).is_some()
    }

    /// Names of the fields sent to the backend, flattened with dot notation
    pub fn field_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_field_names("", &mut names);
        names
    }

    fn collect_field_names(&self, prefix: &str, names: &mut Vec<String>) {
        for (name, mapping) in self.fields.iter().filter(|(_, m)| m.included) {
            let full_name = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };
            names.push(full_name.clone());
            if let Some(props) = mapping.field_type.properties() {
                props.collect_field_names(&full_name, names);
            }
        }
    }

    /// `properties` object holding every included field
    pub fn properties_json(&self) -> Value {
        let mut props = Map::new();
        for (name, mapping) in self.fields.iter().filter(|(_, m)| m.included) {
            props.insert(name.clone(), mapping.to_json());
        }
        Value::Object(props)
    }

    /// Index creation body: `{"mappings": {"dynamic": ..., "properties": {...}}}`
    pub fn to_json(&self) -> Value {
        let mut mappings = Map::new();
        mappings.insert(
            "dynamic".to_string(),
            Value::String(self.dynamic.as_str().to_string()),
        );
        mappings.insert("properties".to_string(), self.properties_json());

        let mut body = Map::new();
        body.insert("mappings".to_string(), Value::Object(mappings));
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name_usage_mapping() -> DocumentMapping {
        DocumentMapping::new()
            .field("usageId", FieldMapping::keyword())
            .field("datasetKey", FieldMapping::integer())
            .field("sectorKey", FieldMapping::integer())
            .field("scientificName", FieldMapping::text().with_analyzer("sciname"))
            .field("payload", FieldMapping::keyword().with_index(false))
            .field("cachedLabel", FieldMapping::keyword().excluded())
            .field(
                "vernacularNames",
                FieldMapping::nested(
                    DocumentMapping::new()
                        .field("name", FieldMapping::keyword())
                        .field("language", FieldMapping::keyword()),
                ),
            )
    }

    #[test]
    fn test_field_mapping_creation() {
        let mapping = FieldMapping::text().with_analyzer("standard").with_index(false);
        assert!(mapping.included);
        assert!(!mapping.indexed);
        assert_eq!(mapping.analyzer.as_deref(), Some("standard"));
    }

    #[test]
    fn test_mapping_json() {
        assert_eq!(
            name_usage_mapping().to_json(),
            json!({
                "mappings": {
                    "dynamic": "strict",
                    "properties": {
                        "usageId": { "type": "keyword" },
                        "datasetKey": { "type": "integer" },
                        "sectorKey": { "type": "integer" },
                        "scientificName": { "type": "text", "analyzer": "sciname" },
                        "payload": { "type": "keyword", "index": false },
                        "vernacularNames": {
                            "type": "nested",
                            "properties": {
                                "name": { "type": "keyword" },
                                "language": { "type": "keyword" }
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_excluded_fields_are_not_rendered() {
        let mapping = name_usage_mapping();
        assert!(mapping.has_field("cachedLabel"));
        assert!(!mapping.field_names().contains(&"cachedLabel".to_string()));
        assert!(mapping.to_json()["mappings"]["properties"]
            .get("cachedLabel")
            .is_none());
    }

    #[test]
    fn test_analyzer_ignored_for_keyword() {
        let mapping = FieldMapping::keyword().with_analyzer("standard");
        assert_eq!(mapping.to_json(), json!({ "type": "keyword" }));
    }

    #[test]
    fn test_object_field_has_no_type() {
        let mapping = FieldMapping::object(DocumentMapping::new().field("id", FieldMapping::keyword()));
        assert_eq!(
            mapping.to_json(),
            json!({ "properties": { "id": { "type": "keyword" } } })
        );
    }

    #[test]
    fn test_nested_field_lookup() {
        let mapping = name_usage_mapping();
        assert!(mapping.has_field("vernacularNames"));
        assert!(mapping.has_field("vernacularNames.language"));
        assert!(!mapping.has_field("vernacularNames.unknown"));
        assert!(!mapping.has_field("usageId.sub"));
    }

    #[test]
    fn test_field_names() {
        let names = name_usage_mapping().field_names();
        assert_eq!(names[0], "usageId");
        assert!(names.contains(&"vernacularNames.name".to_string()));
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_redeclared_field_replaces() {
        let mapping = DocumentMapping::new()
            .field("rank", FieldMapping::keyword())
            .field("rank", FieldMapping::integer());
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get_field("rank"), Some(&FieldMapping::integer()));
    }

    #[test]
    fn test_dynamic_setting() {
        let mapping = DocumentMapping::new().with_dynamic(DynamicMapping::False);
        assert_eq!(mapping.to_json()["mappings"]["dynamic"], json!("false"));
    }
}
