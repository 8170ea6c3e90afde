//! Catalog of rewrite rules.
//!
//! Every rule is a total function over [`RoutingDocument`] built from the
//! primitives in [`super::primitives`].

use crate::document::RoutingDocument;
use crate::transform::primitives::{
    filter_middlewares, filter_routers, filter_services, map_routers,
};

/// Entrypoint name the upstream uses for plain HTTP.
pub const HTTP_ENTRYPOINT: &str = "web";

/// Entrypoint name the upstream uses for HTTPS.
pub const HTTPS_ENTRYPOINT: &str = "websecure";

/// Key prefix of routers and services managed by the upstream itself.
pub const COOLIFY_PREFIX: &str = "coolify";

/// Rule fragment identifying a `www.` host match.
pub const WWW_HOST_PATTERN: &str = "Host(`www.";

/// Redirect middlewares the upstream generates for www handling.
pub const WWW_REDIRECT_MIDDLEWARES: [&str; 2] = ["redirect-to-non-www", "redirect-to-www"];

/// A single, independently toggleable rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Drop routers still bound to the plain HTTP entrypoint.
    FilterHttpRouters,

    /// Drop routers whose rule matches a `www.` host.
    FilterWwwRouters,

    /// Rename the `web` entrypoint on every router.
    RenameHttpEntrypoint(String),

    /// Rename the `websecure` entrypoint on every router.
    RenameHttpsEntrypoint(String),

    /// Replace the certificate resolver on routers that have one.
    RenameCertResolver(String),

    /// Drop routers and services whose key starts with `coolify`.
    FilterCoolify,

    /// Drop the www redirect middlewares and every reference to them.
    FilterWwwMiddlewares,

    /// Append a middleware to every router whose rule matches none of `ignore_sites`.
    AddMiddleware {
        name: String,
        ignore_sites: Vec<String>,
    },
}

impl Rule {
    /// Stable identifier used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::FilterHttpRouters => "filter_http_routers",
            Rule::FilterWwwRouters => "filter_www_routers",
            Rule::RenameHttpEntrypoint(_) => "rename_http_entrypoint",
            Rule::RenameHttpsEntrypoint(_) => "rename_https_entrypoint",
            Rule::RenameCertResolver(_) => "rename_cert_resolver",
            Rule::FilterCoolify => "filter_coolify",
            Rule::FilterWwwMiddlewares => "filter_www_middlewares",
            Rule::AddMiddleware { .. } => "add_middleware",
        }
    }

    /// Apply this rule, producing the next document.
    pub fn apply(&self, doc: RoutingDocument) -> RoutingDocument {
        match self {
            Rule::FilterHttpRouters => filter_http_routers(doc),
            Rule::FilterWwwRouters => filter_www_routers(doc),
            Rule::RenameHttpEntrypoint(new_name) => {
                rename_entrypoint(doc, HTTP_ENTRYPOINT, new_name)
            }
            Rule::RenameHttpsEntrypoint(new_name) => {
                rename_entrypoint(doc, HTTPS_ENTRYPOINT, new_name)
            }
            Rule::RenameCertResolver(new_name) => rename_cert_resolver(doc, new_name),
            Rule::FilterCoolify => filter_coolify(doc),
            Rule::FilterWwwMiddlewares => filter_www_middlewares(doc),
            Rule::AddMiddleware { name, ignore_sites } => add_middleware(doc, name, ignore_sites),
        }
    }
}

/// Replace every occurrence of `old_name` in each router's entrypoints.
pub fn rename_entrypoint(doc: RoutingDocument, old_name: &str, new_name: &str) -> RoutingDocument {
    map_routers(doc, |mut router, _| {
        for entrypoint in router.entrypoints.iter_mut().filter(|ep| ep.as_str() == old_name) {
            *entrypoint = new_name.to_string();
        }
        router
    })
}

/// Set `certresolver` to `new_name` on routers that already have a non-empty one.
pub fn rename_cert_resolver(doc: RoutingDocument, new_name: &str) -> RoutingDocument {
    map_routers(doc, |mut router, _| {
        if router.cert_resolver().is_some() {
            if let Some(tls) = router.tls.as_mut() {
                tls.certresolver = Some(new_name.to_string());
            }
        }
        router
    })
}

pub fn filter_http_routers(doc: RoutingDocument) -> RoutingDocument {
    filter_routers(doc, |router, _| {
        !router.entrypoints.iter().any(|ep| ep == HTTP_ENTRYPOINT)
    })
}

pub fn filter_www_routers(doc: RoutingDocument) -> RoutingDocument {
    filter_routers(doc, |router, _| !router.rule.contains(WWW_HOST_PATTERN))
}

/// Remove routers and services keyed with the `coolify` prefix.
pub fn filter_coolify(doc: RoutingDocument) -> RoutingDocument {
    let doc = filter_routers(doc, |_, key| !key.starts_with(COOLIFY_PREFIX));
    filter_services(doc, |_, key| !key.starts_with(COOLIFY_PREFIX))
}

/// Remove the www redirect middlewares from the catalog and from every router.
pub fn filter_www_middlewares(doc: RoutingDocument) -> RoutingDocument {
    let doc = filter_middlewares(doc, |_, key| !WWW_REDIRECT_MIDDLEWARES.contains(&key));
    map_routers(doc, |mut router, _| {
        router
            .middlewares
            .retain(|middleware| !WWW_REDIRECT_MIDDLEWARES.contains(&middleware.as_str()));
        router
    })
}

/// Append `middleware` to every router unless its rule contains one of `ignore_sites`.
pub fn add_middleware(
    doc: RoutingDocument,
    middleware: &str,
    ignore_sites: &[String],
) -> RoutingDocument {
    map_routers(doc, |mut router, _| {
        let ignored = ignore_sites.iter().any(|site| router.rule.contains(site.as_str()));
        if !ignored {
            router.middlewares.push(middleware.to_string());
        }
        router
    })
}
