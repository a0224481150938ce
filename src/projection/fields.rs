//! Field definition projection.

use serde::Serialize;
use serde_json::Value;

use crate::crm::{FieldDefinition, FieldOption};

/// Stripped-down field definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldProjection {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub field_type: Option<String>,
    pub options: Vec<OptionProjection>,
}

/// One enum option, in upstream order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionProjection {
    pub id: Value,
    pub label: Option<String>,
}

impl From<FieldOption> for OptionProjection {
    fn from(option: FieldOption) -> Self {
        Self {
            id: option.id,
            label: option.label,
        }
    }
}

impl From<FieldDefinition> for FieldProjection {
    fn from(field: FieldDefinition) -> Self {
        Self {
            id: field.id,
            name: field.name,
            field_type: field.field_type,
            options: field
                .options
                .unwrap_or_default()
                .into_iter()
                .map(OptionProjection::from)
                .collect(),
        }
    }
}

/// The definition whose `key` equals `key` exactly (case-sensitive).
pub fn find_by_key(fields: Vec<FieldDefinition>, key: &str) -> Option<FieldDefinition> {
    fields
        .into_iter()
        .find(|field| field.key.as_deref() == Some(key))
}
