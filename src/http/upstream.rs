//! Source document client.

use crate::document::RoutingDocument;
use crate::error::MapperError;

const SOURCE_PATH: &str = "/webhooks/traefik/main.json";

/// Fetches the routing document the upstream publishes.
#[derive(Debug, Clone)]
pub struct SourceClient {
    http: reqwest::Client,
    url: String,
}

impl SourceClient {
    /// `base_endpoint` must not end with a slash.
    pub fn new(http: reqwest::Client, base_endpoint: &str) -> Self {
        Self {
            http,
            url: format!("{base_endpoint}{SOURCE_PATH}"),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the current document. Non-success statuses are errors.
    pub async fn fetch(&self) -> Result<RoutingDocument, MapperError> {
        let doc: RoutingDocument = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(MapperError::Upstream)?
            .json()
            .await
            .map_err(MapperError::Upstream)?;

        tracing::debug!(
            url = %self.url,
            routers = doc.http.routers.len(),
            services = doc.http.services.len(),
            middlewares = doc.http.middlewares.len(),
            "Fetched source document"
        );
        Ok(doc)
    }
}
