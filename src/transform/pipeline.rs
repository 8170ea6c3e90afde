//! Pipeline assembly and execution.
//!
//! # Responsibilities
//! - Select the enabled rules from [`RuleConfig`]
//! - Order them by category: filters, then mappers, then adders
//! - Fold the document through them left to right
//!
//! # Design Decisions
//! - Order is fixed here, never taken from configuration order
//! - An empty pipeline is the identity

use crate::config::RuleConfig;
use crate::document::RoutingDocument;
use crate::observability::metrics;
use crate::transform::rules::Rule;

/// An ordered list of rewrite rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    rules: Vec<Rule>,
}

impl Pipeline {
    /// Build a pipeline that applies `rules` in the given order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Build the pipeline described by `config`.
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut rules = Vec::new();

        // filters
        if config.filter_http_routers {
            rules.push(Rule::FilterHttpRouters);
        }
        if config.filter_www_routers {
            rules.push(Rule::FilterWwwRouters);
        }

        // mappers
        if let Some(name) = non_empty(&config.new_http_entrypoint) {
            rules.push(Rule::RenameHttpEntrypoint(name));
        }
        if let Some(name) = non_empty(&config.new_https_entrypoint) {
            rules.push(Rule::RenameHttpsEntrypoint(name));
        }
        if let Some(name) = non_empty(&config.new_cert_resolver) {
            rules.push(Rule::RenameCertResolver(name));
        }
        if config.filter_coolify {
            rules.push(Rule::FilterCoolify);
        }
        if config.filter_www_middlewares {
            rules.push(Rule::FilterWwwMiddlewares);
        }

        // adders
        if let Some(name) = non_empty(&config.add_middleware) {
            rules.push(Rule::AddMiddleware {
                name,
                ignore_sites: config.ignore_middleware_sites.clone(),
            });
        }

        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the enabled rules, in application order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }

    /// Run `doc` through every rule; each rule sees only the previous rule's output.
    pub fn apply(&self, doc: RoutingDocument) -> RoutingDocument {
        self.rules.iter().fold(doc, |doc, rule| {
            metrics::record_rule_applied(rule.name());
            rule.apply(doc)
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}
