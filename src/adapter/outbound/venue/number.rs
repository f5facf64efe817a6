//! Lenient decimal extraction from JSON values.
//!
//! Venues send prices as numbers, numeric strings or `null` depending on
//! the endpoint. Numbers go through their textual form so `0.41` stays
//! exactly `0.41` instead of picking up binary float noise.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Parse a JSON number or numeric string. Anything else is absent.
#[must_use]
pub fn decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse(&number.to_string()),
        Value::String(text) => parse(text.trim()),
        _ => None,
    }
}

/// Same as [`decimal`] for an optional field.
#[must_use]
pub fn optional_decimal(value: Option<&Value>) -> Option<Decimal> {
    value.and_then(decimal)
}

fn parse(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn numbers_and_strings_parse_exactly() {
        assert_eq!(decimal(&json!(0.41)), Some(dec!(0.41)));
        assert_eq!(decimal(&json!("0.65")), Some(dec!(0.65)));
        assert_eq!(decimal(&json!(42)), Some(dec!(42)));
        assert_eq!(decimal(&json!(1e-3)), Some(dec!(0.001)));
    }

    #[test]
    fn null_and_garbage_are_absent() {
        assert_eq!(decimal(&Value::Null), None);
        assert_eq!(decimal(&json!("n/a")), None);
        assert_eq!(decimal(&json!(true)), None);
        assert_eq!(optional_decimal(None), None);
    }
}
