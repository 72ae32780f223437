// ============================================================================
// AttributeValue <-> JSON bridge
// ============================================================================
//
// Items and pagination keys cross the wire as JSON while DynamoDB speaks
// `AttributeValue`. The pagination token stays opaque: whatever key the
// query returns is converted to JSON verbatim, and a caller-supplied token
// is converted back without interpreting its structure.
//
// ============================================================================

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{json, Map, Number, Value};

use crate::error::{AppError, AppResult};

/// Convert a DynamoDB item (or evaluated key) to a JSON object.
pub fn item_to_json(item: &HashMap<String, AttributeValue>) -> AppResult<Value> {
    let mut object = Map::with_capacity(item.len());
    for (name, attr) in item {
        object.insert(name.clone(), attr_to_json(attr)?);
    }
    Ok(Value::Object(object))
}

/// Convert a caller-supplied pagination token back into a key map.
/// Anything that is not a JSON object cannot address an item and is
/// reported as a store-layer error.
pub fn key_from_json(value: &Value) -> AppResult<HashMap<String, AttributeValue>> {
    let object = value.as_object().ok_or_else(|| {
        AppError::Store("last_evaluated_key must be a JSON object".to_string())
    })?;

    Ok(object
        .iter()
        .map(|(name, value)| (name.clone(), json_to_attr(value)))
        .collect())
}

fn attr_to_json(attr: &AttributeValue) -> AppResult<Value> {
    match attr {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => Ok(number_to_json(n)),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(list) => list.iter().map(attr_to_json).collect(),
        AttributeValue::M(map) => item_to_json(map),
        AttributeValue::Ss(set) => Ok(json!(set)),
        AttributeValue::Ns(set) => Ok(Value::Array(set.iter().map(|n| number_to_json(n)).collect())),
        other => Err(AppError::Store(format!(
            "unsupported attribute type in item: {:?}",
            other
        ))),
    }
}

fn json_to_attr(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(list) => AttributeValue::L(list.iter().map(json_to_attr).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(name, value)| (name.clone(), json_to_attr(value)))
                .collect(),
        ),
    }
}

/// DynamoDB numbers are decimal strings; represent them as JSON numbers
/// where they fit, falling back to the string form.
fn number_to_json(n: &str) -> Value {
    if let Ok(i) = n.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Some(f) = n.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(f);
    }
    Value::String(n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_item_converts_to_json_object() {
        let item = HashMap::from([
            ("channel_id".to_string(), AttributeValue::S("c1".into())),
            (
                "timestamp_utc_iso8601".to_string(),
                AttributeValue::S("2024-05-01T10:00:00.000000".into()),
            ),
            ("author".to_string(), AttributeValue::S("alice".into())),
            ("content".to_string(), AttributeValue::S("hi".into())),
        ]);

        let value = item_to_json(&item).unwrap();
        assert_eq!(value["channel_id"], "c1");
        assert_eq!(value["author"], "alice");
    }

    #[test]
    fn nested_values_survive_the_round_trip() {
        let token = json!({
            "channel_id": "c1",
            "meta": { "depth": 2, "tags": ["a", "b"], "flag": true, "none": null }
        });

        let key = key_from_json(&token).unwrap();
        assert_eq!(item_to_json(&key).unwrap(), token);
    }

    #[test]
    fn non_object_token_is_rejected() {
        let err = key_from_json(&json!("not-a-key")).unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }

    #[test]
    fn binary_attributes_are_rejected() {
        let item = HashMap::from([(
            "blob".to_string(),
            AttributeValue::B(aws_sdk_dynamodb::primitives::Blob::new(vec![1, 2, 3])),
        )]);

        assert!(item_to_json(&item).is_err());
    }

    #[test]
    fn unrepresentable_numbers_fall_back_to_strings() {
        assert_eq!(number_to_json("42"), json!(42));
        assert_eq!(number_to_json("1.5"), json!(1.5));
        assert_eq!(number_to_json("1e999"), json!("1e999"));
    }
}
