//! Service address resolution subsystem.
//!
//! # Data Flow
//! ```text
//! ResolverCredentials (email, password, server IP)
//!     → client.rs (POST /api/v1/login → bearer token)
//!     → client.rs (GET /api/v1/applications)
//!     → address.rs (rewrite "<dns>-<port>" service URLs)
//!     → RoutingDocument handed to the transform pipeline
//! ```
//!
//! # Design Decisions
//! - Runs as an explicit phase before the pipeline and returns a new document
//! - Login must finish before the application list is requested
//! - Any failure aborts the whole request; nothing is retried
//! - Malformed service keys and unknown application ids are not errors

pub mod address;
pub mod client;
pub mod types;

pub use address::map_services_to_server;
pub use client::ManagementClient;
pub use types::{RemoteApplication, ResolverError};

use crate::config::ResolverCredentials;
use crate::document::RoutingDocument;

/// Rewrites service backends to the configured server IP.
#[derive(Debug, Clone)]
pub struct AddressResolver {
    client: ManagementClient,
    credentials: ResolverCredentials,
}

impl AddressResolver {
    pub fn new(client: ManagementClient, credentials: ResolverCredentials) -> Self {
        Self { client, credentials }
    }

    /// Authenticate, fetch the application list, and rewrite `doc`.
    pub async fn resolve(&self, doc: RoutingDocument) -> Result<RoutingDocument, ResolverError> {
        let token = self
            .client
            .login(&self.credentials.email, &self.credentials.password)
            .await?;
        let applications = self.client.applications(&token).await?;

        tracing::debug!(
            applications = applications.len(),
            server_ip = %self.credentials.server_ip,
            "Resolving service addresses"
        );

        Ok(map_services_to_server(doc, &applications, &self.credentials.server_ip))
    }
}
