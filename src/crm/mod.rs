//! Upstream CRM integration subsystem.
//!
//! # Data Flow
//! ```text
//! ApiToken + UpstreamConfig
//!     → client.rs (URL building, token query credential, status check)
//!     → types.rs (lenient decoding of deals, activities, field definitions)
//!     → projection layer
//! ```
//!
//! # Security Constraints
//! - The token only ever lives in the outgoing query string
//! - Transport errors are logged and returned without their URL

pub mod client;
pub mod types;

pub use client::CrmClient;
pub use types::{
    Activity, ContactEntry, CrmError, CrmResult, Deal, FieldDefinition, FieldOption, PersonRef,
};
