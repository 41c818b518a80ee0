//! The `Contact` GraphQL schema and its hand-authored model introspection.
//!
//! The introspection block is not derived from the live schema; it only
//! describes the client-facing fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const CONTACT_SCHEMA: &str = r#"type Contact @model {
  id: ID!
  name: String!
  email: String!
  message: String!
  createdAt: AWSDateTime!
  updatedAt: AWSDateTime
}

type Mutation {
  sendContact(name: String!, email: String!, message: String!): String
}
"#;

pub const CONTACT_MODEL_NAME: &str = "Contact";
pub const CONTACT_MODEL_PLURAL_NAME: &str = "Contacts";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelField {
    pub name: String,
    pub is_array: bool,
    #[serde(rename = "type")]
    pub field_type: String,
    pub is_required: bool,
}

impl ModelField {
    fn scalar(name: &str, field_type: &str, is_required: bool) -> Self {
        Self {
            name: name.to_string(),
            is_array: false,
            field_type: field_type.to_string(),
            is_required,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub name: String,
    pub fields: IndexMap<String, ModelField>,
    pub syncable: bool,
    pub plural_name: String,
}

/// Client view of `Contact`: four required fields and one optional one.
pub fn contact_model() -> ModelDescriptor {
    let fields = [
        ModelField::scalar("id", "ID", true),
        ModelField::scalar("name", "String", true),
        ModelField::scalar("email", "String", true),
        ModelField::scalar("message", "String", true),
        ModelField::scalar("updatedAt", "AWSDateTime", false),
    ];

    ModelDescriptor {
        name: CONTACT_MODEL_NAME.to_string(),
        fields: fields
            .into_iter()
            .map(|field| (field.name.clone(), field))
            .collect(),
        syncable: true,
        plural_name: CONTACT_MODEL_PLURAL_NAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_model_has_four_required_and_one_optional_field() {
        let model = contact_model();
        let required = model.fields.values().filter(|field| field.is_required).count();

        assert_eq!(model.fields.len(), 5);
        assert_eq!(required, 4);
        assert!(!model.fields["updatedAt"].is_required);
        assert!(model.fields.values().all(|field| !field.is_array));
    }

    #[test]
    fn introspected_fields_exist_in_schema_definition() {
        for field in contact_model().fields.keys() {
            assert!(
                CONTACT_SCHEMA.contains(&format!("  {field}: ")),
                "field {field} missing from schema"
            );
        }
    }

    #[test]
    fn model_fields_serialize_with_client_key_names() {
        let value = serde_json::to_value(contact_model()).expect("model should serialize");
        assert_eq!(value["pluralName"], "Contacts");
        assert_eq!(value["fields"]["id"]["type"], "ID");
        assert_eq!(value["fields"]["id"]["isRequired"], true);
        assert_eq!(value["fields"]["id"]["isArray"], false);
    }
}
