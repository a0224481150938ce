//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → cors.rs (allow-origin echo + preflight hints)
//!     → client
//! ```
//!
//! The API token never reaches this layer; see `crm` and `config::loader`.

pub mod cors;

pub use cors::CorsPolicy;
