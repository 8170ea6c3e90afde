//! Management API client.
//!
//! # Responsibilities
//! - Exchange admin credentials for a bearer token
//! - Fetch the application list with that token
//! - Surface transport and status failures as [`ResolverError`]

use crate::resolver::types::{
    ApplicationsResponse, LoginRequest, LoginResponse, RemoteApplication, ResolverError,
};

const LOGIN_PATH: &str = "/api/v1/login";
const APPLICATIONS_PATH: &str = "/api/v1/applications";

#[derive(Debug, Clone)]
pub struct ManagementClient {
    http: reqwest::Client,
    base_endpoint: String,
}

impl ManagementClient {
    /// `base_endpoint` must not end with a slash.
    pub fn new(http: reqwest::Client, base_endpoint: impl Into<String>) -> Self {
        Self {
            http,
            base_endpoint: base_endpoint.into(),
        }
    }

    /// POST the credentials and return the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ResolverError> {
        let url = format!("{}{}", self.base_endpoint, LOGIN_PATH);
        let response: LoginResponse = self
            .http
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ResolverError::Login)?
            .json()
            .await
            .map_err(ResolverError::Login)?;

        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or(ResolverError::MissingToken)?;
        tracing::debug!(url = %url, "Authenticated against management API");
        Ok(token)
    }

    /// GET every application known to the management API.
    pub async fn applications(&self, token: &str) -> Result<Vec<RemoteApplication>, ResolverError> {
        let url = format!("{}{}", self.base_endpoint, APPLICATIONS_PATH);
        let response: ApplicationsResponse = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ResolverError::Applications)?
            .json()
            .await
            .map_err(ResolverError::Applications)?;

        Ok(response.applications)
    }
}
