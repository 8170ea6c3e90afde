//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mapper.
//! All types derive Serde traits for deserialization from a TOML file; the
//! environment overlay in [`crate::config::loader`] writes into the same types.

use serde::{Deserialize, Serialize};

/// Root configuration for the mapper service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MapperConfig {
    /// Listener configuration (bind address, inbound timeout).
    pub listener: ListenerConfig,

    /// Where the source document and the management API live.
    pub upstream: UpstreamConfig,

    /// Which rewrite rules are enabled, and their parameters.
    pub rules: RuleConfig,

    /// Service-to-server address resolution.
    pub resolver: ResolverConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Upper bound on a whole inbound request, upstream calls included.
    /// Exceeding it answers 504.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            // Room for login, application list and source fetch at the outbound limit
            request_timeout_secs: 120,
        }
    }
}

/// Upstream endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the upstream, e.g. "http://coolify:3000". Required.
    pub base_endpoint: Option<String>,

    /// Timeout applied to each outbound call in seconds.
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_endpoint: None,
            request_timeout_secs: 30,
        }
    }
}

/// Rewrite rule toggles. An absent name or a `false` flag leaves the rule out.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RuleConfig {
    /// Replacement for the `web` entrypoint.
    pub new_http_entrypoint: Option<String>,

    /// Replacement for the `websecure` entrypoint.
    pub new_https_entrypoint: Option<String>,

    /// Replacement certificate resolver.
    pub new_cert_resolver: Option<String>,

    /// Middleware appended to every router.
    pub add_middleware: Option<String>,

    /// Rule substrings that exempt a router from `add_middleware`.
    pub ignore_middleware_sites: Vec<String>,

    pub filter_coolify: bool,
    pub filter_www_middlewares: bool,
    pub filter_http_routers: bool,
    pub filter_www_routers: bool,
}

/// Address resolution against the management API.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResolverConfig {
    /// Enables the resolver when set together with the other three fields.
    pub map_to_server_ip: Option<String>,

    /// IP substituted for the service host in backend URLs.
    pub server_ip: Option<String>,

    pub admin_email: Option<String>,

    pub admin_password: Option<String>,
}

/// Credentials and target for address resolution.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolverCredentials {
    pub email: String,
    pub password: String,
    pub server_ip: String,
}

impl std::fmt::Debug for ResolverCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("server_ip", &self.server_ip)
            .finish()
    }
}

impl ResolverConfig {
    /// Returns credentials only when all four settings are present and non-empty.
    pub fn credentials(&self) -> Option<ResolverCredentials> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        present(&self.map_to_server_ip)?;
        Some(ResolverCredentials {
            email: present(&self.admin_email)?,
            password: present(&self.admin_password)?,
            server_ip: present(&self.server_ip)?,
        })
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
