//! Collection-level traversal helpers.
//!
//! Each helper consumes a [`RoutingDocument`] and returns the transformed
//! document. Only the targeted collection changes; the others are moved
//! through as-is.

use serde_json::Value;

use crate::document::{Router, RoutingDocument, Service};

/// Replace every router with `f(router, key)`. Keys and order are unchanged.
pub fn map_routers<F>(mut doc: RoutingDocument, f: F) -> RoutingDocument
where
    F: Fn(Router, &str) -> Router,
{
    doc.http.routers = doc
        .http
        .routers
        .into_iter()
        .map(|(key, router)| {
            let router = f(router, &key);
            (key, router)
        })
        .collect();
    doc
}

/// Replace every service with `f(service, key)`. Keys and order are unchanged.
pub fn map_services<F>(mut doc: RoutingDocument, f: F) -> RoutingDocument
where
    F: Fn(Service, &str) -> Service,
{
    doc.http.services = doc
        .http
        .services
        .into_iter()
        .map(|(key, service)| {
            let service = f(service, &key);
            (key, service)
        })
        .collect();
    doc
}

/// Keep only the routers for which `keep(router, key)` holds.
pub fn filter_routers<P>(mut doc: RoutingDocument, keep: P) -> RoutingDocument
where
    P: Fn(&Router, &str) -> bool,
{
    doc.http.routers.retain(|key, router| keep(router, key));
    doc
}

/// Keep only the services for which `keep(service, key)` holds.
pub fn filter_services<P>(mut doc: RoutingDocument, keep: P) -> RoutingDocument
where
    P: Fn(&Service, &str) -> bool,
{
    doc.http.services.retain(|key, service| keep(service, key));
    doc
}

/// Keep only the middleware definitions for which `keep(body, key)` holds.
pub fn filter_middlewares<P>(mut doc: RoutingDocument, keep: P) -> RoutingDocument
where
    P: Fn(&Value, &str) -> bool,
{
    doc.http.middlewares.retain(|key, body| keep(body, key));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> RoutingDocument {
        let mut doc = RoutingDocument::default();
        for name in ["c", "a", "d", "b"] {
            doc.http
                .routers
                .insert(name.to_string(), Router::new(["web"], format!("Host(`{name}`)"), name));
            doc.http
                .services
                .insert(name.to_string(), Service::with_urls([format!("http://{name}:80")]));
            doc.http.middlewares.insert(name.to_string(), json!({ "name": name }));
        }
        doc
    }

    #[test]
    fn test_map_routers_keeps_keys_and_order() {
        let out = map_routers(doc(), |mut router, key| {
            router.service = format!("{key}-svc");
            router
        });

        let keys: Vec<_> = out.http.routers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["c", "a", "d", "b"]);
        assert_eq!(out.http.routers["a"].service, "a-svc");
        assert_eq!(out.http.services, doc().http.services);
        assert_eq!(out.http.middlewares, doc().http.middlewares);
    }

    #[test]
    fn test_filters_preserve_relative_order() {
        let out = filter_routers(doc(), |_, key| key != "a");
        let keys: Vec<_> = out.http.routers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["c", "d", "b"]);

        let out = filter_services(doc(), |_, key| key == "d" || key == "c");
        let keys: Vec<_> = out.http.services.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["c", "d"]);

        let out = filter_middlewares(doc(), |body, _| body["name"] != "b");
        let keys: Vec<_> = out.http.middlewares.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["c", "a", "d"]);
    }

    #[test]
    fn test_filter_can_empty_a_collection() {
        let out = filter_services(doc(), |_, _| false);
        assert!(out.http.services.is_empty());
        assert_eq!(out.http.routers.len(), 4);

        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["http"]["services"], json!({}));
    }
}
