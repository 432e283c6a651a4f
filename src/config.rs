use serde::{Deserialize, Serialize};

/// Maximum number of values the backend accepts in a single `terms` clause
pub const DEFAULT_MAX_TERMS_PER_CLAUSE: usize = 1024;

/// Connection and batching settings for talking to the search backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL of the backend, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upper bound on values per `terms` clause; depends on backend version
    #[serde(default = "default_max_terms")]
    pub max_terms_per_clause: usize,
    /// Per-request timeout handed to the HTTP client
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_max_terms() -> usize {
    DEFAULT_MAX_TERMS_PER_CLAUSE
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_terms_per_clause: default_max_terms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ClientSettings {
    /// Create settings pointing at the given backend
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Defaults overridden by `ES_URL`, `ES_MAX_TERMS` and `ES_TIMEOUT_MS`
    ///
    /// Unparseable numeric values are ignored and the default is kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(url) = lookup("ES_URL") {
            settings.base_url = url;
        }
        if let Some(max) = lookup("ES_MAX_TERMS").and_then(|v| v.parse().ok()) {
            settings.max_terms_per_clause = max;
        }
        if let Some(timeout) = lookup("ES_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            settings.timeout_ms = timeout;
        }
        settings
    }

    /// Set the terms-clause limit
    pub fn with_max_terms_per_clause(mut self, max: usize) -> Self {
        self.max_terms_per_clause = max;
        self
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Full URL for a path relative to the backend root
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
