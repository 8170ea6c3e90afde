//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::MapperConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Prefix shared by every environment variable the mapper reads.
pub const ENV_PREFIX: &str = "TRAEFIK_MAPPER_";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, overlay the process
/// environment, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<MapperConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => MapperConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    normalize(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay `TRAEFIK_MAPPER_*` variables onto `config`.
///
/// `lookup` receives the full variable name. Empty values count as unset.
pub fn apply_env_overrides<F>(config: &mut MapperConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(&format!("{ENV_PREFIX}{name}")).filter(|value| !value.is_empty());
    let set_string = |target: &mut Option<String>, name: &str| {
        if let Some(value) = get(name) {
            *target = Some(value);
        }
    };
    let set_flag = |target: &mut bool, name: &str| {
        if let Some(value) = get(name) {
            *target = parse_flag(&value);
        }
    };

    if let Some(bind_address) = get("BIND_ADDRESS") {
        config.listener.bind_address = bind_address;
    }
    if let Some(log_level) = get("LOG_LEVEL") {
        config.observability.log_level = log_level;
    }
    set_string(&mut config.upstream.base_endpoint, "BASE_ENDPOINT");

    let rules = &mut config.rules;
    set_string(&mut rules.new_http_entrypoint, "NEW_HTTP_ENTRYPOINT");
    set_string(&mut rules.new_https_entrypoint, "NEW_HTTPS_ENTRYPOINT");
    set_string(&mut rules.new_cert_resolver, "NEW_CERT_RESOLVER");
    set_string(&mut rules.add_middleware, "ADD_MIDDLEWARE_NAME");
    if let Some(sites) = get("IGNORE_MIDDLEWARE_SITES") {
        rules.ignore_middleware_sites = parse_list(&sites);
    }
    set_flag(&mut rules.filter_coolify, "FILTER_COOLIFY");
    set_flag(&mut rules.filter_www_middlewares, "FILTER_WWW_MIDDLEWARE");
    set_flag(&mut rules.filter_http_routers, "FILTER_HTTP_ROUTERS");
    set_flag(&mut rules.filter_www_routers, "FILTER_WWW_ROUTERS");

    let resolver = &mut config.resolver;
    set_string(&mut resolver.map_to_server_ip, "MAP_TO_SERVER_IP");
    set_string(&mut resolver.server_ip, "SERVER_IP");
    set_string(&mut resolver.admin_email, "ADMIN_EMAIL");
    set_string(&mut resolver.admin_password, "ADMIN_PASSWORD");
}

/// Only the exact literal `true` enables a flag.
pub fn parse_flag(value: &str) -> bool {
    value == "true"
}

/// Split a `;`-delimited list. Empty segments are kept.
pub fn parse_list(value: &str) -> Vec<String> {
    value.split(';').map(str::to_string).collect()
}

fn normalize(config: &mut MapperConfig) {
    if let Some(endpoint) = config.upstream.base_endpoint.as_mut() {
        let trimmed = endpoint.trim_end_matches('/').len();
        endpoint.truncate(trimmed);
    }
}
