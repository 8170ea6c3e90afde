//! Typed shape of the dynamic routing configuration.
//!
//! The wire form nests the three collections under a top-level `http` key:
//!
//! ```json
//! { "http": { "routers": {}, "services": {}, "middlewares": {} } }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unmodeled fields, carried through every transformation untouched.
pub type Extra = IndexMap<String, Value>;

/// Root of the routing configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RoutingDocument {
    #[serde(default)]
    pub http: HttpSection,

    /// Other top-level sections (`tcp`, `udp`, ...).
    #[serde(flatten)]
    pub extra: Extra,
}

/// The HTTP section holding routers, services and middlewares.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct HttpSection {
    #[serde(default)]
    pub routers: IndexMap<String, Router>,

    #[serde(default)]
    pub services: IndexMap<String, Service>,

    /// Middleware definitions, keyed by name. Bodies are opaque.
    #[serde(default)]
    pub middlewares: IndexMap<String, Value>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// A router: match rule plus entrypoint and middleware bindings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Router {
    /// Entrypoint names. Order is meaningful, duplicates allowed.
    #[serde(default)]
    pub entrypoints: Vec<String>,

    /// Match expression, e.g. ``Host(`example.com`)``. Treated as text.
    #[serde(default)]
    pub rule: String,

    /// Name of the target service. Not checked for existence.
    #[serde(default)]
    pub service: String,

    /// Middleware references, in application order.
    #[serde(default)]
    pub middlewares: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<RouterTls>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Router {
    /// Create a router bound to `entrypoints`, matching `rule` and forwarding to `service`.
    pub fn new<I, S>(entrypoints: I, rule: impl Into<String>, service: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entrypoints: entrypoints.into_iter().map(Into::into).collect(),
            rule: rule.into(),
            service: service.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper to set the middleware list.
    pub fn with_middlewares<I, S>(mut self, middlewares: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.middlewares = middlewares.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style helper to attach a TLS block with the given resolver.
    pub fn with_cert_resolver(mut self, resolver: impl Into<String>) -> Self {
        self.tls = Some(RouterTls {
            certresolver: Some(resolver.into()),
            ..Default::default()
        });
        self
    }

    /// The configured certificate resolver, if set and non-empty.
    pub fn cert_resolver(&self) -> Option<&str> {
        self.tls
            .as_ref()
            .and_then(|tls| tls.certresolver.as_deref())
            .filter(|resolver| !resolver.is_empty())
    }
}

/// TLS settings on a router.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RouterTls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certresolver: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<TlsDomains>,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct TlsDomains {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// A backend definition with one or more server addresses.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Service {
    #[serde(default)]
    pub loadbalancer: LoadBalancer,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Service {
    /// Create a service balancing over the given server URLs.
    pub fn with_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loadbalancer: LoadBalancer {
                servers: urls.into_iter().map(Server::new).collect(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Iterate over the backend URLs.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.loadbalancer.servers.iter().map(|server| server.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct LoadBalancer {
    #[serde(default)]
    pub servers: Vec<Server>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// A single backend address (`scheme://host:port/...`).
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Server {
    pub url: String,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extra: Extra::new(),
        }
    }
}
