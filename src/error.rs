//! Request-level error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::resolver::ResolverError;

#[derive(Debug, Error)]
pub enum MapperError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// Source document unreachable, rejected, or undecodable.
    #[error("Source document fetch failed: {0}")]
    Upstream(#[source] reqwest::Error),

    #[error("Address resolution failed: {0}")]
    Resolver(#[from] ResolverError),
}

impl MapperError {
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Client(_) => "client_error",
            Self::Upstream(_) => "upstream_error",
            Self::Resolver(_) => "resolver_error",
        }
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream(_) | Self::Resolver(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) | Self::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MapperError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Upstream detail stays in the logs
        let message = match &self {
            Self::Upstream(_) => "Failed to fetch source configuration",
            Self::Resolver(_) => "Failed to resolve service addresses",
            Self::Config(_) | Self::Client(_) => "Internal server error",
        };

        (status, message).into_response()
    }
}
