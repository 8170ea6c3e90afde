//! Traefik configuration mapper library.
//!
//! Fetches a dynamic routing document from an upstream, rewrites it
//! through a fixed-order pipeline of rules, and serves the result.

pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod mapper;
pub mod observability;
pub mod resolver;
pub mod transform;

pub use config::MapperConfig;
pub use document::RoutingDocument;
pub use error::MapperError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use mapper::Mapper;
pub use transform::{Pipeline, Rule};
