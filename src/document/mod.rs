//! Routing document subsystem.
//!
//! # Data Flow
//! ```text
//! upstream main.json
//!     → model.rs (serde deserialize into RoutingDocument)
//!     → transform / resolver (produce new documents)
//!     → model.rs (serde serialize back to the wire form)
//! ```
//!
//! # Design Decisions
//! - Collections are insertion-ordered maps; JSON key order survives
//! - Middleware bodies are never interpreted, only carried
//! - Fields the model does not name are kept in catch-all maps
//! - Cross-collection references (router → service) are not validated

pub mod model;

pub use model::{
    Extra, HttpSection, LoadBalancer, Router, RouterTls, RoutingDocument, Server, Service,
    TlsDomains,
};
