pub mod config;
pub mod error;
pub mod maintenance;
pub mod query;
pub mod response;
pub mod schema;
pub mod transport;

pub use config::ClientSettings;
pub use error::{EsError, Result};
pub use maintenance::IndexMaintenance;
pub use query::{Query, SearchRequest};
pub use transport::{EsRequest, EsResponse, HttpExecutor, Method, RequestExecutor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
