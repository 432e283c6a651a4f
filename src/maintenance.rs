//! Index maintenance operations
//!
//! Stateless, synchronous operations on one index: existence checks, creation,
//! deletion, refresh, counting and the delete-by-query family. Deletions are
//! never refreshed implicitly so callers can batch several deletes before
//! paying for one [`IndexMaintenance::refresh_index`].

use crate::config::ClientSettings;
use crate::error::EsError;
use crate::query::{BoolQuery, MatchAllQuery, Query, SearchRequest, TermQuery, TermsQuery};
use crate::response::DeleteByQueryResponse;
use crate::schema::DocumentMapping;
use crate::transport::{self, EsRequest, Method, RequestExecutor};
use crate::Result;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Document field holding the dataset key
pub const DATASET_KEY_FIELD: &str = "datasetKey";
/// Document field holding the sector key
pub const SECTOR_KEY_FIELD: &str = "sectorKey";
/// Document field holding the name usage id
pub const USAGE_ID_FIELD: &str = "usageId";

const STATUS_OK: u16 = 200;
const STATUS_NOT_FOUND: u16 = 404;

/// Maintenance operations over a request executor
pub struct IndexMaintenance<E: RequestExecutor> {
    executor: E,
    settings: ClientSettings,
}

impl<E: RequestExecutor> IndexMaintenance<E> {
    pub fn new(executor: E, settings: ClientSettings) -> Self {
        Self { executor, settings }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Whether an index with the provided name exists
    ///
    /// Only an exact 200 counts as present. A 404 or any other non-error
    /// status means absent; other error statuses fail with
    /// [`EsError::Backend`].
    pub fn index_exists(&self, index: &str) -> Result<bool> {
        let request = EsRequest::new(Method::Head, index);
        let response = transport::execute_accepting(&self.executor, &request, &[STATUS_NOT_FOUND])?;
        Ok(response.status == STATUS_OK)
    }

    /// Create an index with the schema generated from `mapping`
    pub fn create_index(&self, index: &str, mapping: &DocumentMapping) -> Result<()> {
        let body = serde_json::to_string(&mapping.to_json())?;
        let request = EsRequest::new(Method::Put, index).with_json_body(body);
        transport::execute(&self.executor, &request)?;
        info!(index, fields = mapping.len(), "created index");
        Ok(())
    }

    /// Delete the index. Silently succeeds if the index did not exist.
    pub fn delete_index(&self, index: &str) -> Result<()> {
        let request = EsRequest::new(Method::Delete, index);
        let response = transport::execute_accepting(&self.executor, &request, &[STATUS_NOT_FOUND])?;
        if response.status == STATUS_NOT_FOUND {
            debug!(index, "index to delete does not exist");
            return Ok(());
        }
        info!(index, "deleted index");
        Ok(())
    }

    /// Make all writes so far visible to searches
    pub fn refresh_index(&self, index: &str) -> Result<()> {
        let request = EsRequest::new(Method::Post, format!("{}/_refresh", index));
        transport::execute(&self.executor, &request)?;
        Ok(())
    }

    /// Number of (visible) documents in the index
    pub fn count(&self, index: &str) -> Result<u64> {
        let request = EsRequest::new(Method::Get, format!("{}/_count", index));
        let response = transport::execute(&self.executor, &request)?;
        transport::read_count(&response, "count")
    }

    /// Run a search and return the raw response body
    pub fn search(&self, index: &str, search: &SearchRequest) -> Result<Value> {
        search.validate()?;
        let request =
            EsRequest::new(Method::Post, format!("{}/_search", index)).with_json_body(search.to_string());
        let response = transport::execute(&self.executor, &request)?;
        response.json()
    }

    /// Delete all documents matching `query`; returns the backend-reported count
    ///
    /// The deletions only become visible after a refresh.
    pub fn delete_by_query(&self, index: &str, query: impl Into<Query>) -> Result<u64> {
        Ok(self.delete_by_query_response(index, query)?.total)
    }

    /// [`delete_by_query`](Self::delete_by_query) returning the full summary,
    /// including `deleted` and `version_conflicts`
    pub fn delete_by_query_response(
        &self,
        index: &str,
        query: impl Into<Query>,
    ) -> Result<DeleteByQueryResponse> {
        let search = SearchRequest::for_query(query);
        search.validate()?;
        let request = EsRequest::new(Method::Post, format!("{}/_delete_by_query", index))
            .with_json_body(search.to_string());
        let response = transport::execute(&self.executor, &request)?;
        response.json()
    }

    /// Delete every document but keep the index
    pub fn truncate(&self, index: &str) -> Result<u64> {
        let deleted = self.delete_by_query(index, MatchAllQuery::new())?;
        info!(index, deleted, "truncated index");
        Ok(deleted)
    }

    /// Delete all documents of one dataset
    pub fn delete_dataset(&self, index: &str, dataset_key: i32) -> Result<u64> {
        self.delete_by_query(index, TermQuery::new(DATASET_KEY_FIELD, dataset_key))
    }

    /// Delete all documents of one sector
    pub fn delete_sector(&self, index: &str, sector_key: i32) -> Result<u64> {
        self.delete_by_query(index, TermQuery::new(SECTOR_KEY_FIELD, sector_key))
    }

    /// Delete the name usages with the given ids from one dataset
    ///
    /// Ids are sent in chunks of at most `max_terms_per_clause`, one
    /// delete-by-query per chunk, in order. Returns the summed count. The
    /// first failing chunk aborts the call; chunks already sent stay deleted.
    /// Repeating the call is safe, since absent ids contribute nothing.
    pub fn delete_name_usages<S: AsRef<str>>(
        &self,
        index: &str,
        dataset_key: i32,
        usage_ids: &[S],
    ) -> Result<u64> {
        if usage_ids.is_empty() {
            return Ok(0);
        }
        let max_terms = self.settings.max_terms_per_clause;
        if max_terms == 0 {
            return Err(EsError::InvalidQuery(
                "max_terms_per_clause must be at least 1".to_string(),
            ));
        }

        let chunk_count = usage_ids.len().div_ceil(max_terms);
        let mut deleted = 0;
        for (i, chunk) in usage_ids.chunks(max_terms).enumerate() {
            let query = BoolQuery::new()
                .filter(TermQuery::new(DATASET_KEY_FIELD, dataset_key))
                .filter(TermsQuery::new(
                    USAGE_ID_FIELD,
                    chunk.iter().map(|id| id.as_ref()),
                )?);
            match self.delete_by_query(index, query) {
                Ok(n) => {
                    debug!(index, chunk = i + 1, of = chunk_count, deleted = n, "deleted usage chunk");
                    deleted += n;
                }
                Err(e) => {
                    warn!(
                        index,
                        chunk = i + 1,
                        of = chunk_count,
                        deleted_so_far = deleted,
                        error = %e,
                        "aborting name usage deletion"
                    );
                    return Err(e);
                }
            }
        }
        Ok(deleted)
    }
}
