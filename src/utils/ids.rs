//! Serde helpers for loosely typed identifiers

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an `i64` sent as an integer, an integral float or a numeric string
pub fn string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_id(&value).ok_or_else(|| de::Error::custom(format!("expected a numeric id, got {}", value)))
}

fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "string_or_number")]
        id: i64,
    }

    #[test]
    fn test_accepted_shapes() {
        for raw in [json!({"id": 42}), json!({"id": 42.0}), json!({"id": " 42 "})] {
            let holder: Holder = serde_json::from_value(raw).unwrap();
            assert_eq!(holder.id, 42);
        }
    }

    #[test]
    fn test_rejected_shapes() {
        for raw in [json!({"id": 4.5}), json!({"id": "two"}), json!({"id": null})] {
            assert!(serde_json::from_value::<Holder>(raw).is_err());
        }
    }
}
