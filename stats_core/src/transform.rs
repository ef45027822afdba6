//! Float-to-exact-decimal conversion for store-bound values.
//!
//! The stats table stores numeric stats inside a JSON document, and binary
//! floats drift once they round-trip through the store. Every float is
//! therefore replaced by a string-backed exact decimal before persisting.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Recursively replace every floating-point number in `value` with a
/// string-backed exact decimal of the same magnitude.
///
/// The conversion goes through the shortest decimal rendering of the `f64`,
/// so `0.6097` becomes the token `"0.6097"` rather than its full binary
/// expansion. Integers, strings, booleans and null pass through untouched.
/// Total: a float outside `Decimal` range passes through unchanged instead
/// of failing. Idempotent: decimal strings produced by a previous pass are
/// not floats and are left alone.
pub fn floats_to_decimals(value: Value) -> Value {
    match value {
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return Value::Number(n);
            }
            let decimal = n
                .as_f64()
                .map(|f| f.to_string())
                .and_then(|s| Decimal::from_str(&s).ok());
            match decimal {
                Some(d) => Value::String(d.to_string()),
                None => Value::Number(n),
            }
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, floats_to_decimals(v)))
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(floats_to_decimals).collect())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn has_float(value: &Value) -> bool {
        match value {
            Value::Number(n) => !n.is_i64() && !n.is_u64(),
            Value::Object(map) => map.values().any(has_float),
            Value::Array(items) => items.iter().any(has_float),
            _ => false,
        }
    }

    #[test]
    fn test_float_becomes_decimal_string() {
        let converted = floats_to_decimals(json!(0.6097));
        assert_eq!(converted, json!("0.6097"));
    }

    #[test]
    fn test_magnitude_preserved_not_rounded() {
        let converted = floats_to_decimals(json!(0.6666666));
        assert_eq!(converted, json!("0.6666666"));
    }

    #[test]
    fn test_integers_untouched() {
        assert_eq!(floats_to_decimals(json!(50)), json!(50));
        assert_eq!(floats_to_decimals(json!(-3)), json!(-3));
    }

    #[test]
    fn test_non_numeric_types_untouched() {
        assert_eq!(floats_to_decimals(json!("BOS")), json!("BOS"));
        assert_eq!(floats_to_decimals(json!(true)), json!(true));
        assert_eq!(floats_to_decimals(json!(null)), json!(null));
    }

    #[test]
    fn test_recurses_through_nested_structures() {
        let input = json!({
            "Percentage": 0.6097,
            "Splits": [{"PointsPerGameFor": 117.9}, {"PointsPerGameAgainst": 111.4}],
            "Meta": {"Wins": 50, "Nested": {"LastTen": [7, 3, 0.7]}},
        });

        let converted = floats_to_decimals(input);

        assert!(!has_float(&converted));
        assert_eq!(converted["Percentage"], json!("0.6097"));
        assert_eq!(converted["Splits"][0]["PointsPerGameFor"], json!("117.9"));
        assert_eq!(converted["Splits"][1]["PointsPerGameAgainst"], json!("111.4"));
        assert_eq!(converted["Meta"]["Wins"], json!(50));
        assert_eq!(converted["Meta"]["Nested"]["LastTen"], json!([7, 3, "0.7"]));
    }

    #[test]
    fn test_idempotent() {
        let input = json!({
            "Percentage": 0.6097,
            "Wins": 50,
            "Splits": [117.9, "already-decimal", null],
        });

        let once = floats_to_decimals(input);
        let twice = floats_to_decimals(once.clone());
        assert_eq!(once, twice);
    }
}
