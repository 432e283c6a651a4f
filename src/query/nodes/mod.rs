//! Concrete query node implementations
//!
//! Each node struct renders its own clause; [`Query`](crate::query::Query)
//! ties them together.

mod bool_query;
mod exists_query;
mod match_all;
mod nested_query;
mod prefix_query;
mod term_query;
mod terms_query;

pub use bool_query::BoolQuery;
pub use exists_query::ExistsQuery;
pub use match_all::MatchAllQuery;
pub use nested_query::NestedQuery;
pub use prefix_query::PrefixQuery;
pub use term_query::TermQuery;
pub use terms_query::TermsQuery;
