//! Per-request document mapping.
//!
//! Address resolution runs first, as its own phase, and hands a new
//! document to the rule pipeline. Nothing is cached between calls.

use crate::config::MapperConfig;
use crate::document::RoutingDocument;
use crate::error::MapperError;
use crate::observability::metrics;
use crate::resolver::{AddressResolver, ManagementClient};
use crate::transform::Pipeline;

#[derive(Debug, Clone)]
pub struct Mapper {
    pipeline: Pipeline,
    resolver: Option<AddressResolver>,
}

impl Mapper {
    pub fn new(pipeline: Pipeline, resolver: Option<AddressResolver>) -> Self {
        Self { pipeline, resolver }
    }

    /// Build the mapper described by `config`, sharing `http` for management API calls.
    pub fn from_config(config: &MapperConfig, http: reqwest::Client, base_endpoint: &str) -> Self {
        let pipeline = Pipeline::from_config(&config.rules);
        let resolver = config.resolver.credentials().map(|credentials| {
            AddressResolver::new(ManagementClient::new(http, base_endpoint), credentials)
        });
        Self::new(pipeline, resolver)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn resolves_addresses(&self) -> bool {
        self.resolver.is_some()
    }

    /// Resolve addresses (when enabled), then fold the document through the pipeline.
    pub async fn map(&self, doc: RoutingDocument) -> Result<RoutingDocument, MapperError> {
        let doc = match &self.resolver {
            Some(resolver) => {
                let resolved = resolver.resolve(doc).await?;
                metrics::record_resolution();
                resolved
            }
            None => doc,
        };

        Ok(self.pipeline.apply(doc))
    }
}
