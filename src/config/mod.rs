//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (overlay TRAEFIK_MAPPER_* environment variables)
//!     → validation.rs (semantic checks)
//!     → MapperConfig (validated, immutable)
//!     → shared by the server and the transform pipeline
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the document is recomputed per
//!   request but the rules are fixed for the life of the process
//! - All fields have defaults except the upstream base endpoint
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::MapperConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ResolverConfig;
pub use schema::ResolverCredentials;
pub use schema::RuleConfig;
pub use schema::UpstreamConfig;
