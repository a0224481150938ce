//! Upstream record types and error definitions.
//!
//! Upstream JSON is loosely shaped. Every field the relay reads is decoded
//! leniently: a missing field, a `null`, or a value of the wrong type decodes
//! to `None`/default instead of failing the whole response.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while talking to the CRM API.
#[derive(Debug, Error)]
pub enum CrmError {
    /// Upstream answered with a non-success status.
    #[error("CRM API error: {0}")]
    Status(u16),

    /// Connection or protocol failure. The URL (and its token) is stripped.
    #[error("CRM request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream body was not the JSON shape we read.
    #[error("Malformed CRM response: {0}")]
    Decode(String),

    /// Base URL cannot carry path segments.
    #[error("Invalid CRM base URL: {0}")]
    InvalidUrl(String),
}

/// Result type for CRM operations.
pub type CrmResult<T> = Result<T, CrmError>;

/// The `{ "data": ... }` envelope every endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// A deal as returned by the filtered deals listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Deal {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub person_id: Option<PersonRef>,

    /// Everything else, including account-specific custom fields keyed by hash.
    #[serde(flatten)]
    pub custom_fields: Map<String, Value>,
}

impl Deal {
    /// String value of a custom field, if it holds one.
    pub fn text_field(&self, key: &str) -> Option<&str> {
        self.custom_fields.get(key).and_then(Value::as_str)
    }

    /// Raw value of a custom field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.custom_fields.get(key)
    }
}

/// The person embedded in a deal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonRef {
    #[serde(default, deserialize_with = "lenient")]
    pub phone: Option<Vec<ContactEntry>>,
}

/// One phone number or email entry of a person.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<String>,
}

/// An activity attached to a deal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Activity {
    #[serde(default, deserialize_with = "truthy")]
    pub done: bool,

    #[serde(default, deserialize_with = "lenient")]
    pub due_date: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub due_time: Option<String>,
}

/// A custom field definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldDefinition {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub field_type: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub options: Option<Vec<FieldOption>>,
}

/// One enumerated option of a field definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldOption {
    /// Numeric on most accounts, but compared as a string.
    #[serde(default)]
    pub id: Value,

    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<String>,
}

/// Decode `T` if the value has the right shape, `None` otherwise.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// `true`, or any non-zero number.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}
