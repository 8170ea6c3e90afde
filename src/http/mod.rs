//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! GET /
//!     → request.rs (assign / propagate x-request-id)
//!     → server.rs (handler)
//!     → upstream.rs (fetch main.json from the base endpoint)
//!     → Mapper (resolve addresses, run pipeline)
//!     → JSON response
//! ```

pub mod request;
pub mod server;
pub mod upstream;

pub use request::X_REQUEST_ID;
pub use server::HttpServer;
pub use upstream::SourceClient;
