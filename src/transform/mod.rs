//! Transformation subsystem.
//!
//! # Data Flow
//! ```text
//! RoutingDocument (fetched, optionally address-resolved)
//!     → pipeline.rs (ordered list of enabled rules)
//!     → rules.rs (each rule, built from primitives)
//!     → primitives.rs (map/filter over one collection)
//!     → RoutingDocument (served)
//! ```
//!
//! # Design Decisions
//! - Every step takes the document by value and returns a new one;
//!   no step can observe another step's intermediate state
//! - Filters keep the relative order of surviving entries
//! - Rules are total: no rule fails on a well-shaped document
//! - Ordering is fixed by category, not by configuration order

pub mod pipeline;
pub mod primitives;
pub mod rules;

pub use pipeline::Pipeline;
pub use rules::Rule;
