//! Blocking HTTP executor backed by reqwest

use super::{EsRequest, EsResponse, Method, RequestExecutor};
use crate::config::ClientSettings;
use crate::Result;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// [`RequestExecutor`] talking to a live backend over HTTP
///
/// Connection pooling, TLS and redirects are reqwest's; the executor adds the
/// base URL and the JSON content type.
#[derive(Clone, Debug)]
pub struct HttpExecutor {
    client: Client,
    settings: ClientSettings,
}

impl HttpExecutor {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Head => reqwest::Method::HEAD,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl RequestExecutor for HttpExecutor {
    fn perform(&self, request: &EsRequest) -> Result<EsResponse> {
        let url = self.settings.url_for(&request.path);
        let mut builder = self.client.request(Self::method(request.method), url);
        if let Some(ref body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("Unknown Status").to_string();
        let body = response.text()?;

        Ok(EsResponse::new(status.as_u16(), reason, body))
    }
}
