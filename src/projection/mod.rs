//! Response shaping.
//!
//! # Data Flow
//! ```text
//! upstream records (crm::types)
//!     → deals.rs (sales-rep label map, deal projection)
//!     → activity.rs (undone-first, latest-due selection)
//!     → fields.rs (field lookup by key, field projection)
//!     → serialized by the http layer
//! ```
//!
//! Everything here is pure: no I/O, no shared state, same input gives the
//! same output.

pub mod activity;
pub mod deals;
pub mod fields;

pub use activity::{select_activity, ActivityProjection};
pub use deals::{project_deal, DealProjection, SalesRepLabels};
pub use fields::{find_by_key, FieldProjection, OptionProjection};
