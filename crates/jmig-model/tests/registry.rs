//! Tests for the schema registry.

use jmig_model::{FieldType, RegistryError, SchemaError, SchemaRegistry, SchemaTable};
use serde_json::json;

#[test]
fn builtin_lookup_normalizes_headers() {
    let registry = SchemaRegistry::builtin();
    assert_eq!(registry.len(), 3);

    let log_work = registry.get("Log Work").expect("log work schema");
    assert_eq!(log_work.describe(), "comment;datetime;username;seconds");

    let attachment = registry.get("Attachment").expect("attachment schema");
    assert_eq!(attachment.position_of(FieldType::Location), Some(3));
    assert!(registry.get("Sprint").is_none());
}

fn table(value: serde_json::Value) -> SchemaTable {
    serde_json::from_value(value).expect("schema table")
}

#[test]
fn extend_adds_and_replaces_schemas() {
    let mut registry = SchemaRegistry::builtin();
    registry
        .extend(table(json!({
            "Approval Note": ["datetime", "comment"],
            "attachment": [
                { "name": "created", "type": "datetime" },
                { "name": "author", "type": "username" },
                { "name": "file", "type": "filename" },
                { "name": "url", "type": "location" },
            ],
        })))
        .expect("extend registry");

    assert_eq!(registry.len(), 4);
    assert_eq!(
        registry.get("approval note").map(|s| s.describe()),
        Some("datetime;comment".to_string())
    );
    assert_eq!(
        registry.get("attachment").map(|s| s.describe()),
        Some("created;author;file;url".to_string())
    );
}

#[test]
fn extend_reports_invalid_schema_and_inserts_nothing() {
    let mut registry = SchemaRegistry::builtin();
    let err = registry
        .extend(table(json!({
            "audit": ["datetime", "comment"],
            "broken": ["datetime", "datetime"],
        })))
        .unwrap_err();

    assert_eq!(
        err,
        RegistryError::Schema {
            name: "broken".to_string(),
            source: SchemaError::DuplicateField {
                name: "datetime".to_string()
            },
        }
    );
    assert!(registry.get("audit").is_none());
    assert_eq!(registry.len(), 3);
}

#[test]
fn repair_serializes_with_kind_tag() {
    let json = serde_json::to_value(jmig_model::Repair::Recovered {
        rule: "missing-username-attachment".to_string(),
    })
    .expect("serialize");
    assert_eq!(json["kind"], "recovered");
    assert_eq!(json["rule"], "missing-username-attachment");
}
