//! Management API types and resolver errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Extra;

/// An application known to the management API.
///
/// Only the fields the resolver reads are modeled; the rest is carried in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RemoteApplication {
    /// Matches the DNS-like token in a `<dns>-<port>` service key.
    pub id: String,

    /// Port the application is published on, overriding the key's port.
    #[serde(default, rename = "exposePort", skip_serializing_if = "Option::is_none")]
    pub expose_port: Option<u16>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl RemoteApplication {
    /// The published port, treating 0 as unset.
    pub fn override_port(&self) -> Option<u16> {
        self.expose_port.filter(|port| *port != 0)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationsResponse {
    #[serde(default)]
    pub applications: Vec<RemoteApplication>,
}

/// Errors that can occur while resolving service addresses.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// Login request failed or was rejected.
    #[error("Login failed: {0}")]
    Login(#[source] reqwest::Error),

    /// Login succeeded but returned no token.
    #[error("Login response did not contain a token")]
    MissingToken,

    /// Application list request failed or was rejected.
    #[error("Fetching applications failed: {0}")]
    Applications(#[source] reqwest::Error),
}
