//! Deal relay library.
//!
//! A read-only HTTP relay in front of a CRM API: browser form clients call
//! three narrow endpoints, the relay calls the CRM with a secret token and
//! returns minimal JSON projections with CORS headers attached.

pub mod config;
pub mod crm;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod projection;
pub mod routing;
pub mod security;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
