//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (production account) or DEAL_RELAY_CONFIG (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//!
//! upstream.token_env
//!     → loader.rs reads the secret from the environment
//!     → ApiToken (redacted Debug) handed to the CRM client only
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_api_token, load_config, load_from_env, ApiToken, ConfigError};
pub use schema::{
    CorsConfig, CrmSchemaConfig, ListenerConfig, ObservabilityConfig, RelayConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
