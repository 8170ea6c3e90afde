//! Behavioral properties of the rewrite pipeline and address resolution.

use serde_json::json;

use traefik_mapper::config::RuleConfig;
use traefik_mapper::document::{Router, Service};
use traefik_mapper::resolver::{map_services_to_server, RemoteApplication};
use traefik_mapper::{Pipeline, RoutingDocument, Rule};

fn document() -> RoutingDocument {
    serde_json::from_value(json!({
        "http": {
            "routers": {
                "zeta": { "entrypoints": ["web"], "rule": "Host(`zeta.io`)", "service": "zeta-80", "middlewares": [] },
                "www-alpha": { "entrypoints": ["websecure"], "rule": "Host(`www.alpha.io`)", "service": "alpha-80", "middlewares": ["redirect-to-www"] },
                "alpha": { "entrypoints": ["websecure"], "rule": "Host(`alpha.io`)", "service": "alpha-80", "middlewares": ["redirect-to-www", "gzip"], "tls": { "certresolver": "letsencrypt" } },
                "coolify-app": { "entrypoints": ["websecure"], "rule": "Host(`panel.io`)", "service": "coolify-app", "middlewares": [] },
                "beta": { "entrypoints": ["web", "websecure"], "rule": "Host(`beta.io`)", "service": "beta-80", "middlewares": [], "priority": 5 }
            },
            "services": {
                "zeta-80": { "loadbalancer": { "servers": [{ "url": "http://zeta:80" }] } },
                "coolify-app": { "loadbalancer": { "servers": [{ "url": "http://coolify:3000" }] } },
                "alpha-80": { "loadbalancer": { "servers": [{ "url": "http://alpha:80" }] } }
            },
            "middlewares": {
                "redirect-to-www": { "redirectregex": {} },
                "gzip": { "compress": true }
            }
        }
    }))
    .unwrap()
}

fn router_keys(doc: &RoutingDocument) -> Vec<&str> {
    doc.http.routers.keys().map(String::as_str).collect()
}

#[test]
fn test_identity_with_every_rule_disabled() {
    let pipeline = Pipeline::from_config(&RuleConfig::default());
    assert_eq!(pipeline.apply(document()), document());
}

#[test]
fn test_filters_preserve_relative_order() {
    let input = document();
    let mut sorted = router_keys(&input);
    sorted.sort_unstable();
    assert_ne!(router_keys(&input), sorted, "fixture must not be in sorted order");

    for rule in [Rule::FilterHttpRouters, Rule::FilterWwwRouters, Rule::FilterCoolify] {
        let output = Pipeline::new(vec![rule]).apply(input.clone());
        let expected: Vec<_> = router_keys(&input)
            .into_iter()
            .filter(|key| output.http.routers.contains_key(*key))
            .collect();
        assert_eq!(router_keys(&output), expected);
    }

    let output = Pipeline::new(vec![Rule::FilterWwwRouters, Rule::FilterCoolify]).apply(input);
    assert_eq!(router_keys(&output), vec!["zeta", "alpha", "beta"]);
}

#[test]
fn test_rename_applied_twice_equals_once() {
    let once = Pipeline::new(vec![Rule::RenameHttpEntrypoint("http".into())]).apply(document());
    let twice = Pipeline::new(vec![
        Rule::RenameHttpEntrypoint("http".into()),
        Rule::RenameHttpEntrypoint("http".into()),
    ])
    .apply(document());
    assert_eq!(once, twice);
}

#[test]
fn test_add_middleware_skips_excluded_sites_only() {
    let input = document();
    let output = Pipeline::new(vec![Rule::AddMiddleware {
        name: "auth".into(),
        ignore_sites: vec!["alpha.io".into()],
    }])
    .apply(input.clone());

    for (key, router) in &output.http.routers {
        let before = &input.http.routers[key.as_str()].middlewares;
        if router.rule.contains("alpha.io") {
            assert_eq!(&router.middlewares, before, "router {key} must be untouched");
        } else {
            assert_eq!(router.middlewares.len(), before.len() + 1);
            assert_eq!(router.middlewares.iter().filter(|m| *m == "auth").count(), 1);
            assert_eq!(router.middlewares.last().map(String::as_str), Some("auth"));
        }
    }
}

#[test]
fn test_coolify_removal_keeps_other_entries() {
    let mut doc = RoutingDocument::default();
    let r1 = Router::new(["websecure"], "Host(`c`)", "coolify-app");
    let r2 = Router::new(["websecure"], "Host(`o`)", "other");
    let s1 = Service::with_urls(["http://c:1"]);
    let s2 = Service::with_urls(["http://o:2"]);
    doc.http.routers.insert("coolify-app".into(), r1);
    doc.http.routers.insert("other".into(), r2.clone());
    doc.http.services.insert("coolify-app".into(), s1);
    doc.http.services.insert("other".into(), s2.clone());

    let out = Pipeline::new(vec![Rule::FilterCoolify]).apply(doc);
    assert_eq!(out.http.routers.len(), 1);
    assert_eq!(out.http.routers["other"], r2);
    assert_eq!(out.http.services.len(), 1);
    assert_eq!(out.http.services["other"], s2);
}

#[test]
fn test_www_middleware_removal_cleans_catalog_and_references() {
    let out = Pipeline::new(vec![Rule::FilterWwwMiddlewares]).apply(document());
    assert!(!out.http.middlewares.contains_key("redirect-to-www"));
    assert_eq!(out.http.routers["alpha"].middlewares, vec!["gzip"]);
    assert!(out.http.routers["www-alpha"].middlewares.is_empty());
}

#[test]
fn test_unmodeled_router_fields_survive_every_rule() {
    let config = RuleConfig {
        new_http_entrypoint: Some("http".into()),
        new_https_entrypoint: Some("https".into()),
        new_cert_resolver: Some("le".into()),
        add_middleware: Some("auth".into()),
        filter_coolify: true,
        filter_www_middlewares: true,
        filter_www_routers: true,
        ..Default::default()
    };
    let out = Pipeline::from_config(&config).apply(document());
    assert_eq!(out.http.routers["beta"].extra.get("priority"), Some(&json!(5)));
    assert_eq!(out.http.routers["beta"].entrypoints, vec!["http", "https"]);
    assert_eq!(out.http.middlewares["gzip"], json!({ "compress": true }));
}

#[test]
fn test_address_resolution_scenarios() {
    let mut doc = RoutingDocument::default();
    doc.http.services.insert("app1-3000".into(), Service::with_urls(["http://app1:3000/"]));
    doc.http.services.insert("nohyphens".into(), Service::with_urls(["http://nohyphens/"]));
    doc.http.services.insert("coolify-3000".into(), Service::with_urls(["http://coolify:3000"]));

    let apps = vec![
        RemoteApplication { id: "app1".into(), expose_port: Some(8080), ..Default::default() },
        RemoteApplication { id: "coolify".into(), expose_port: Some(1), ..Default::default() },
    ];
    let out = map_services_to_server(doc.clone(), &apps, "10.0.0.5");

    assert_eq!(out.http.services["app1-3000"].loadbalancer.servers[0].url, "http://10.0.0.5:8080/");
    assert_eq!(out.http.services["nohyphens"], doc.http.services["nohyphens"]);
    assert_eq!(out.http.services["coolify-3000"], doc.http.services["coolify-3000"]);
}
