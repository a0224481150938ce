//! Request dispatch.
//!
//! # Responsibilities
//! - Evaluate method and path in a fixed order, first match wins:
//!   OPTIONS → preflight, non-GET → 405, `/deals`, `/deals/{digits}/activity`,
//!   `/deal-fields/{hex}`, otherwise 404
//! - Classify field lookups as numeric id or hex key
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Explicit NotFound rather than silent default

use axum::http::Method;

use crate::routing::matcher::{is_digits, PathPattern};

/// How a `/deal-fields/{key}` lookup reaches upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLookup {
    /// All digits: fetch the single definition by id.
    Id(String),
    /// Hex key: scan the full definitions list.
    Key(String),
}

impl FieldLookup {
    fn classify(key: &str) -> Self {
        if is_digits(key) {
            FieldLookup::Id(key.to_string())
        } else {
            FieldLookup::Key(key.to_string())
        }
    }
}

/// Outcome of dispatching a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Preflight,
    MethodNotAllowed,
    Deals,
    DealActivity { deal_id: String },
    DealField(FieldLookup),
    NotFound,
}

impl Route {
    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Preflight => "preflight",
            Route::MethodNotAllowed => "method_not_allowed",
            Route::Deals => "deals",
            Route::DealActivity { .. } => "deal_activity",
            Route::DealField(_) => "deal_field",
            Route::NotFound => "not_found",
        }
    }
}

/// Compiled dispatch table.
#[derive(Debug, Clone)]
pub struct Router {
    deals: PathPattern,
    deal_activity: PathPattern,
    deal_field: PathPattern,
}

impl Router {
    pub fn new() -> Self {
        Self {
            deals: PathPattern::new("/deals"),
            deal_activity: PathPattern::new("/deals/{digits}/activity"),
            deal_field: PathPattern::new("/deal-fields/{hex}"),
        }
    }

    /// Resolve the route for a method and path.
    pub fn resolve(&self, method: &Method, path: &str) -> Route {
        if method == Method::OPTIONS {
            return Route::Preflight;
        }
        if method != Method::GET {
            return Route::MethodNotAllowed;
        }

        if self.deals.matches(path) {
            return Route::Deals;
        }
        if let Some(captures) = self.deal_activity.captures(path) {
            return Route::DealActivity {
                deal_id: captures[0].to_string(),
            };
        }
        if let Some(captures) = self.deal_field.captures(path) {
            return Route::DealField(FieldLookup::classify(captures[0]));
        }

        Route::NotFound
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
