//! Deal listing projection.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::config::CrmSchemaConfig;
use crate::crm::{Deal, FieldDefinition};

/// What a form client sees of a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealProjection {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub address: String,
    pub phone: String,
    #[serde(rename = "salesRep")]
    pub sales_rep: String,
}

/// Option id → label map of the sales-rep enum field.
#[derive(Debug, Clone, Default)]
pub struct SalesRepLabels {
    labels: HashMap<String, String>,
}

impl SalesRepLabels {
    /// Build from the field definition. A missing definition or option list
    /// gives an empty map.
    pub fn from_field(field: Option<&FieldDefinition>) -> Self {
        let mut labels = HashMap::new();
        for option in field.and_then(|f| f.options.as_deref()).unwrap_or_default() {
            if let Some(id) = stringify(&option.id) {
                labels.insert(id, option.label.clone().unwrap_or_default());
            }
        }
        Self { labels }
    }

    /// Label for a deal's rep value. Falsy or unknown values resolve to `""`.
    pub fn resolve(&self, value: Option<&Value>) -> String {
        value
            .filter(|v| is_truthy(v))
            .and_then(stringify)
            .and_then(|id| self.labels.get(&id).cloned())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Shape one upstream deal.
pub fn project_deal(deal: &Deal, schema: &CrmSchemaConfig, reps: &SalesRepLabels) -> DealProjection {
    let phone = deal
        .person_id
        .as_ref()
        .and_then(|person| person.phone.as_deref())
        .and_then(<[_]>::first)
        .and_then(|entry| entry.value.clone())
        .unwrap_or_default();

    DealProjection {
        id: deal.id,
        title: deal.title.clone(),
        address: deal
            .text_field(&schema.address_field_key)
            .unwrap_or_default()
            .to_string(),
        phone,
        sales_rep: reps.resolve(deal.field(&schema.sales_rep_field_key)),
    }
}

/// Option ids arrive as numbers or strings; both compare as strings.
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rep_field() -> FieldDefinition {
        serde_json::from_value(json!({
            "id": 69,
            "options": [
                { "id": 101, "label": "Alice" },
                { "id": "102", "label": "Bob" },
                { "id": 103 }
            ]
        }))
        .unwrap()
    }

    fn deal(value: Value) -> Deal {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_labels_accept_numeric_and_string_ids() {
        let reps = SalesRepLabels::from_field(Some(&rep_field()));
        assert_eq!(reps.len(), 3);
        assert_eq!(reps.resolve(Some(&json!(101))), "Alice");
        assert_eq!(reps.resolve(Some(&json!("101"))), "Alice");
        assert_eq!(reps.resolve(Some(&json!(102))), "Bob");
        assert_eq!(reps.resolve(Some(&json!(103))), "");
    }

    #[test]
    fn test_unresolved_rep_is_empty() {
        let reps = SalesRepLabels::from_field(Some(&rep_field()));
        assert_eq!(reps.resolve(Some(&json!(999))), "");
        assert_eq!(reps.resolve(Some(&json!(0))), "");
        assert_eq!(reps.resolve(Some(&Value::Null)), "");
        assert_eq!(reps.resolve(None), "");
    }

    #[test]
    fn test_missing_field_definition_gives_empty_map() {
        assert!(SalesRepLabels::from_field(None).is_empty());
        let no_options = FieldDefinition::default();
        assert!(SalesRepLabels::from_field(Some(&no_options)).is_empty());
    }

    #[test]
    fn test_project_full_deal() {
        let schema = CrmSchemaConfig::default();
        let reps = SalesRepLabels::from_field(Some(&rep_field()));
        let mut raw = json!({
            "id": 5,
            "title": "Roof demo",
            "person_id": { "name": "Dana", "phone": [
                { "value": "555-0100", "primary": true },
                { "value": "555-0199" }
            ]}
        });
        raw[schema.address_field_key.as_str()] = json!("1 Elm St");
        raw[schema.sales_rep_field_key.as_str()] = json!(102);
        let d = deal(raw);

        assert_eq!(
            project_deal(&d, &schema, &reps),
            DealProjection {
                id: Some(5),
                title: Some("Roof demo".into()),
                address: "1 Elm St".into(),
                phone: "555-0100".into(),
                sales_rep: "Bob".into(),
            }
        );
    }

    #[test]
    fn test_project_sparse_deal_defaults() {
        let schema = CrmSchemaConfig::default();
        let reps = SalesRepLabels::default();

        let no_person = project_deal(&deal(json!({ "id": 1, "title": "A" })), &schema, &reps);
        assert_eq!(no_person.phone, "");
        assert_eq!(no_person.address, "");
        assert_eq!(no_person.sales_rep, "");

        let no_phones = project_deal(
            &deal(json!({ "id": 2, "person_id": { "phone": [] } })),
            &schema,
            &reps,
        );
        assert_eq!(no_phones.phone, "");
        assert_eq!(no_phones.title, None);
    }

    #[test]
    fn test_serialized_shape() {
        let p = DealProjection {
            id: Some(1),
            title: Some("T".into()),
            address: String::new(),
            phone: String::new(),
            sales_rep: "Alice".into(),
        };
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({ "id": 1, "title": "T", "address": "", "phone": "", "salesRep": "Alice" })
        );
    }
}
