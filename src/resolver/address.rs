//! Backend URL rewriting for `<dns>-<port>` services.

use crate::document::{RoutingDocument, Service};
use crate::resolver::types::RemoteApplication;
use crate::transform::primitives::map_services;

/// Service key the upstream uses for itself; never rewritten.
pub const EXCLUDED_SERVICE_KEY: &str = "coolify-3000";

/// Split `<dns>-<port>` into its two tokens.
///
/// Returns `None` unless the key has exactly one hyphen with text on both sides.
pub fn split_service_key(key: &str) -> Option<(&str, &str)> {
    let mut tokens = key.split('-');
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(dns), Some(port), None) if !dns.is_empty() && !port.is_empty() => Some((dns, port)),
        _ => None,
    }
}

/// Point every `<dns>-<port>` service at `server_ip`.
///
/// The port becomes the matching application's published port when it has
/// one, otherwise the key's own port. The first occurrence of each token in
/// every backend URL is substituted.
pub fn map_services_to_server(
    doc: RoutingDocument,
    applications: &[RemoteApplication],
    server_ip: &str,
) -> RoutingDocument {
    map_services(doc, |service, key| {
        if key == EXCLUDED_SERVICE_KEY {
            return service;
        }
        match split_service_key(key) {
            Some((dns, port)) => rewrite_service(service, applications, server_ip, dns, port),
            None => service,
        }
    })
}

fn rewrite_service(
    mut service: Service,
    applications: &[RemoteApplication],
    server_ip: &str,
    dns: &str,
    port: &str,
) -> Service {
    let app_port = applications
        .iter()
        .find(|app| app.id == dns)
        .and_then(RemoteApplication::override_port)
        .map(|p| p.to_string())
        .unwrap_or_else(|| port.to_string());

    for server in &mut service.loadbalancer.servers {
        server.url = server
            .url
            .replacen(dns, server_ip, 1)
            .replacen(port, &app_port, 1);
    }
    service
}
