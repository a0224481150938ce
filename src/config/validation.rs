//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and URLs parse
//! - Validate account identifiers have the shape the CRM uses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.base_url: '{0}' is not an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("upstream.token_env must not be empty")]
    EmptyTokenEnv,

    #[error("cors.allowed_origins must list at least one origin")]
    NoAllowedOrigins,

    #[error("cors.allowed_origins: '{0}' is not a bare origin (scheme://host[:port])")]
    InvalidOrigin(String),

    #[error("{field}: '{value}' is not a hexadecimal field key")]
    InvalidFieldKey { field: &'static str, value: String },

    #[error("crm.deals_limit must be between 1 and 500, got {0}")]
    DealsLimitOutOfRange(u32),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_socket_addr(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );
    if config.observability.metrics_enabled {
        check_socket_addr(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(
            config.upstream.base_url.clone(),
        )),
    }

    if config.upstream.token_env.trim().is_empty() {
        errors.push(ValidationError::EmptyTokenEnv);
    }

    if config.cors.allowed_origins.is_empty() {
        errors.push(ValidationError::NoAllowedOrigins);
    }
    for origin in &config.cors.allowed_origins {
        if !is_bare_origin(origin) {
            errors.push(ValidationError::InvalidOrigin(origin.clone()));
        }
    }

    check_field_key(
        "crm.sales_rep_field_key",
        &config.crm.sales_rep_field_key,
        &mut errors,
    );
    check_field_key(
        "crm.address_field_key",
        &config.crm.address_field_key,
        &mut errors,
    );

    if !(1..=500).contains(&config.crm.deals_limit) {
        errors.push(ValidationError::DealsLimitOutOfRange(config.crm.deals_limit));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_socket_addr(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_field_key(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        errors.push(ValidationError::InvalidFieldKey {
            field,
            value: value.to_string(),
        });
    }
}

/// Browsers send `Origin` as `scheme://host[:port]` with no trailing slash,
/// and the policy compares strings exactly.
fn is_bare_origin(origin: &str) -> bool {
    match Url::parse(origin) {
        Ok(url) => {
            url.has_host()
                && url.origin().ascii_serialization() == origin
                && matches!(url.scheme(), "http" | "https")
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.base_url = "ftp://crm.example.com".into();
        config.cors.allowed_origins = vec!["https://forms.example.com/".into()];
        config.crm.address_field_key = "zz-not-hex".into();
        config.crm.deals_limit = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::InvalidOrigin(
            "https://forms.example.com/".into()
        )));
        assert!(errors.contains(&ValidationError::DealsLimitOutOfRange(0)));
    }

    #[test]
    fn test_empty_origin_list_rejected() {
        let mut config = RelayConfig::default();
        config.cors.allowed_origins.clear();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::NoAllowedOrigins])
        );
    }

    #[test]
    fn test_origin_with_port_is_bare() {
        assert!(is_bare_origin("http://localhost:3000"));
        assert!(!is_bare_origin("https://example.com/form"));
        assert!(!is_bare_origin("example.com"));
    }
}
