//! The creature record and its wire shapes.

use crate::error::StoreError;
use crate::sql::SqlValue;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A creature in the bestiary. `name` is the natural key and the URL path segment.
///
/// Every field is optional on input: a missing string becomes empty and a missing
/// or `null` attribute map becomes empty. Only the JSON shape is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beast {
    #[serde(rename = "BeastName", default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub category: String,
    #[serde(rename = "CR", default)]
    pub challenge_rating: String,
    #[serde(rename = "Attributes", default, deserialize_with = "null_as_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(rename = "Description", default)]
    pub description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Beast {
    /// Attribute map as a JSON object for the `attributes` column.
    pub fn attributes_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.attributes
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }

    /// Scan a row laid out as `beast_name, type, cr, attributes, description`.
    pub fn from_row(row: Vec<SqlValue>) -> Result<Self, StoreError> {
        let [name, category, cr, attributes, description]: [SqlValue; 5] = row
            .try_into()
            .map_err(|r: Vec<SqlValue>| StoreError::Scan(format!("expected 5 columns, got {}", r.len())))?;
        Ok(Beast {
            name: text_column("beast_name", name)?,
            category: text_column("type", category)?,
            challenge_rating: text_column("cr", cr)?,
            attributes: attributes_column(attributes)?,
            description: text_column("description", description)?,
        })
    }
}

fn text_column(column: &str, value: SqlValue) -> Result<String, StoreError> {
    match value {
        SqlValue::Text(s) => Ok(s),
        other => Err(StoreError::Scan(format!("column {column}: expected text, got {other:?}"))),
    }
}

fn attributes_column(value: SqlValue) -> Result<BTreeMap<String, String>, StoreError> {
    match value {
        SqlValue::Null => Ok(BTreeMap::new()),
        SqlValue::Json(v) => serde_json::from_value(v)
            .map_err(|e| StoreError::Scan(format!("column attributes: {e}"))),
        SqlValue::Text(s) => serde_json::from_str(&s)
            .map_err(|e| StoreError::Scan(format!("column attributes: {e}"))),
    }
}

/// Body returned by a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedBeast {
    #[serde(rename = "BeastName")]
    pub name: String,
}

/// Fixed-message body for update and delete.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_beast() -> Beast {
        Beast {
            name: "TestBeast".into(),
            category: "TestType".into(),
            challenge_rating: "1".into(),
            attributes: BTreeMap::from([("STR".to_string(), "10".to_string())]),
            description: "Test description".into(),
        }
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let value = serde_json::to_value(test_beast()).unwrap();
        assert_eq!(
            value,
            json!({
                "BeastName": "TestBeast",
                "Type": "TestType",
                "CR": "1",
                "Attributes": {"STR": "10"},
                "Description": "Test description"
            })
        );
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let beast: Beast = serde_json::from_value(json!({"Type": "UpdatedType", "Attributes": null})).unwrap();
        assert_eq!(beast.name, "");
        assert_eq!(beast.category, "UpdatedType");
        assert!(beast.attributes.is_empty());
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        assert!(serde_json::from_value::<Beast>(json!({"CR": 2})).is_err());
        assert!(serde_json::from_value::<Beast>(json!({"Attributes": {"STR": 10}})).is_err());
    }

    #[test]
    fn scans_row_in_column_order() {
        let row = vec![
            SqlValue::Text("TestBeast".into()),
            SqlValue::Text("TestType".into()),
            SqlValue::Text("1".into()),
            SqlValue::Json(json!({"STR": "10"})),
            SqlValue::Text("Test description".into()),
        ];
        assert_eq!(Beast::from_row(row).unwrap(), test_beast());
    }

    #[test]
    fn short_row_is_a_scan_error() {
        let err = Beast::from_row(vec![SqlValue::Text("x".into())]).unwrap_err();
        assert!(matches!(err, StoreError::Scan(_)));
    }

    mod properties {
        use super::*;
        use crate::service::BeastService;
        use crate::sql::statements;
        use crate::store::MockStore;
        use proptest::prelude::*;

        fn block_on<F: std::future::Future>(future: F) -> F::Output {
            tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap()
                .block_on(future)
        }

        fn arb_payload() -> impl Strategy<Value = serde_json::Value> {
            (
                ".*",
                ".*",
                ".*",
                prop::collection::btree_map(".*", ".*", 0..8),
                ".*",
            )
                .prop_map(|(name, category, cr, attributes, description)| {
                    json!({
                        "BeastName": name,
                        "Type": category,
                        "CR": cr,
                        "Attributes": attributes,
                        "Description": description
                    })
                })
        }

        proptest! {
            /// Whatever create binds, read back as a row, is the payload again.
            #[test]
            fn create_then_read_returns_the_payload(payload in arb_payload()) {
                let beast: Beast = serde_json::from_value(payload.clone()).unwrap();
                let store = MockStore::new();
                store.expect_exec(statements::INSERT).will_return_result(1);
                block_on(BeastService::create(&store, &beast)).unwrap();

                let row = store.calls().remove(0).args;
                let read_back = Beast::from_row(row).unwrap();
                prop_assert_eq!(serde_json::to_value(read_back).unwrap(), payload);
            }

            /// Update binds every non-key field from the body and the key from the path.
            #[test]
            fn update_replaces_every_non_key_field(
                key in ".*",
                replacement in arb_payload(),
            ) {
                let body: Beast = serde_json::from_value(replacement.clone()).unwrap();
                let store = MockStore::new();
                store.expect_exec(statements::UPDATE_BY_NAME).will_return_result(1);
                block_on(BeastService::update(&store, &key, &body)).unwrap();

                // SET type, cr, attributes, description WHERE beast_name
                let mut args = store.calls().remove(0).args;
                let name = args.pop().unwrap();
                args.insert(0, name);
                let read_back = serde_json::to_value(Beast::from_row(args).unwrap()).unwrap();

                let mut expected = replacement;
                expected["BeastName"] = json!(key);
                prop_assert_eq!(read_back, expected);
            }
        }
    }

    #[test]
    fn non_string_attribute_value_is_a_scan_error() {
        let mut row: Vec<SqlValue> = (0..5).map(|_| SqlValue::Text(String::new())).collect();
        row[3] = SqlValue::Json(json!({"STR": 10}));
        assert!(matches!(Beast::from_row(row), Err(StoreError::Scan(_))));
    }
}
