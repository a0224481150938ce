//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered dispatch)
//!     → matcher.rs (evaluate path patterns, capture parameters)
//!     → Return: Route (endpoint with parameters, or an error outcome)
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at startup, immutable at runtime
//! - Deterministic: same input always resolves to the same route
//! - First match wins

pub mod matcher;
pub mod router;

pub use matcher::PathPattern;
pub use router::{FieldLookup, Route, Router};
