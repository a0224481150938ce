//! Cross-origin policy.
//!
//! # Responsibilities
//! - Echo the request `Origin` back when it is on the allow-list
//! - Attach method, header and max-age hints to every response
//!
//! # Design Decisions
//! - Exact string match, no wildcard or suffix matching
//! - A disallowed origin still gets a body; only the allow-origin header is omitted

use std::collections::HashSet;

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE,
};
use axum::http::{HeaderMap, HeaderValue};

use crate::config::CorsConfig;

/// Compiled CORS policy.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: HashSet<String>,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
    max_age: HeaderValue,
}

impl CorsPolicy {
    /// Build a policy from config. Header values that are not valid header
    /// text fall back to the built-in defaults.
    pub fn from_config(config: &CorsConfig) -> Self {
        Self {
            allowed_origins: config.allowed_origins.iter().cloned().collect(),
            allow_methods: HeaderValue::from_str(&config.allow_methods)
                .unwrap_or_else(|_| HeaderValue::from_static("GET, OPTIONS")),
            allow_headers: HeaderValue::from_str(&config.allow_headers)
                .unwrap_or_else(|_| HeaderValue::from_static("Content-Type")),
            max_age: HeaderValue::from(config.max_age_secs),
        }
    }

    /// Returns true if `origin` is on the allow-list.
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.contains(origin)
    }

    /// Write the CORS headers for a request from `origin` into `headers`.
    pub fn apply(&self, origin: Option<&HeaderValue>, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
        headers.insert(ACCESS_CONTROL_MAX_AGE, self.max_age.clone());

        match origin {
            Some(value)
                if value
                    .to_str()
                    .map(|origin| self.is_allowed(origin))
                    .unwrap_or(false) =>
            {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value.clone());
            }
            _ => {
                headers.remove(ACCESS_CONTROL_ALLOW_ORIGIN);
            }
        }
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::from_config(&CorsConfig::default())
    }
}
