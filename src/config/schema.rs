//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.
//! The defaults are the values of the production deployment, so a relay
//! started without a config file serves the original account's schema.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Upstream CRM API settings.
    pub upstream: UpstreamConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Account-specific field and filter identifiers.
    pub crm: CrmSchemaConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8787").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8787".to_string(),
        }
    }
}

/// Upstream CRM API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL every upstream path is appended to.
    pub base_url: String,

    /// Name of the environment variable holding the API token.
    pub token_env: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.pipedrive.com/v1".to_string(),
            token_env: "PIPEDRIVE_API_TOKEN".to_string(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins echoed back in `Access-Control-Allow-Origin` (exact match).
    pub allowed_origins: Vec<String>,

    /// Value of `Access-Control-Allow-Methods`.
    pub allow_methods: String,

    /// Value of `Access-Control-Allow-Headers`.
    pub allow_headers: String,

    /// Value of `Access-Control-Max-Age` in seconds.
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "https://calculabs.github.io".to_string(),
                "https://form.jotform.com".to_string(),
                "https://www.jotform.com".to_string(),
                "https://submit.jotform.com".to_string(),
                "https://eu.jotform.com".to_string(),
            ],
            allow_methods: "GET, OPTIONS".to_string(),
            allow_headers: "Content-Type".to_string(),
            max_age_secs: 86_400,
        }
    }
}

/// Field and filter identifiers of the CRM account.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CrmSchemaConfig {
    /// Saved filter selecting the demo-sale deals.
    pub demo_sale_filter_id: u64,

    /// Numeric id of the sales-rep enum field definition.
    pub sales_rep_field_id: u64,

    /// Key under which deals carry the sales-rep option id.
    pub sales_rep_field_key: String,

    /// Key under which deals carry the free-text address.
    pub address_field_key: String,

    /// Page size for the deals listing.
    pub deals_limit: u32,
}

impl Default for CrmSchemaConfig {
    fn default() -> Self {
        Self {
            demo_sale_filter_id: 10143,
            sales_rep_field_id: 69,
            sales_rep_field_key: "facd9fa577e3e35573573d03b248eb2ce2987eb7".to_string(),
            address_field_key: "c2f35ff46a62827ff9fd000e9fc7480a1fee3a43".to_string(),
            deals_limit: 500,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
