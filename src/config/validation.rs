//! Configuration validation.
//!
//! # Responsibilities
//! - Require the upstream base endpoint
//! - Check that it is an absolute http(s) URL
//! - Validate value ranges (timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MapperConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::MapperConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("TRAEFIK_MAPPER_BASE_ENDPOINT is missing")]
    MissingBaseEndpoint,

    #[error("base endpoint '{endpoint}' is invalid: {reason}")]
    InvalidBaseEndpoint { endpoint: String, reason: String },

    #[error("bind address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

pub fn validate_config(config: &MapperConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.upstream.base_endpoint.as_deref() {
        None | Some("") => errors.push(ValidationError::MissingBaseEndpoint),
        Some(endpoint) => {
            if let Err(reason) = check_endpoint(endpoint) {
                errors.push(ValidationError::InvalidBaseEndpoint {
                    endpoint: endpoint.to_string(),
                    reason,
                });
            }
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("listener.request_timeout_secs"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.request_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_endpoint(endpoint: &str) -> Result<(), String> {
    let url = url::Url::parse(endpoint).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}
