//! Query DSL object model
//!
//! Query nodes, sort directives and aggregations that render to the
//! backend's JSON query language, plus a parser that reads that language back.
//!
//! # Example
//!
//! ```
//! use colindex::query::{BoolQuery, SearchRequest, TermQuery, TermsQuery};
//!
//! let query = BoolQuery::new()
//!     .filter(TermQuery::new("datasetKey", 1000))
//!     .filter(TermsQuery::new("usageId", ["u1", "u2"]).unwrap());
//!
//! let body = SearchRequest::for_query(query).to_string();
//! assert!(body.starts_with(r#"{"query":{"bool":{"filter":["#));
//! ```

pub mod aggregation;
pub mod ast;
pub mod nodes;
pub mod parser;
pub mod request;
pub mod sort;
pub mod types;

pub use aggregation::{Aggregation, Aggregations, FilterAggregation, TermsAggregation};
pub use ast::{Query, QueryNode};
pub use nodes::{
    BoolQuery, ExistsQuery, MatchAllQuery, NestedQuery, PrefixQuery, TermQuery, TermsQuery,
};
pub use parser::QueryParser;
pub use request::SearchRequest;
pub use sort::{SortField, SortMode, SortOptions, SortOrder};
pub use types::*;
