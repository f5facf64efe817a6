//! Limitless market listing payload.
//!
//! The listing is either a bare array or wrapped under `data`, `markets`,
//! `items` or `results`, sometimes one level deeper inside a `data` object.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::adapter::outbound::venue::number::decimal;

const LIST_KEYS: [&str; 4] = ["data", "markets", "items", "results"];

/// Pull the market array out of a listing body. `None` when there is none.
#[must_use]
pub fn market_list(body: Value) -> Option<Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(mut fields) => take_array(&mut fields, &LIST_KEYS).or_else(|| match fields.remove("data") {
            Some(Value::Object(mut nested)) => take_array(&mut nested, &LIST_KEYS[1..]),
            _ => None,
        }),
        _ => None,
    }
}

fn take_array(fields: &mut Map<String, Value>, keys: &[&str]) -> Option<Vec<Value>> {
    let key = keys.iter().find(|key| fields.get(**key).is_some_and(Value::is_array))?;
    match fields.remove(*key) {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// One listed market. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitlessMarket {
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    market_slug: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    name: Option<String>,
    /// `[yes, no]`, as probabilities or percentages.
    #[serde(default)]
    prices: Option<Vec<Value>>,
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim).filter(|t| !t.is_empty()).map(ToString::to_string)
}

impl LimitlessMarket {
    /// Slug, then id, then market slug. Markets without any are unusable.
    #[must_use]
    pub fn ticker(&self) -> Option<String> {
        let id = match &self.id {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };
        non_empty(self.slug.as_deref())
            .or_else(|| non_empty(id.as_deref()))
            .or_else(|| non_empty(self.market_slug.as_deref()))
    }

    #[must_use]
    pub fn title(&self) -> Option<String> {
        non_empty(self.title.as_deref())
            .or_else(|| non_empty(self.question.as_deref()))
            .or_else(|| non_empty(self.name.as_deref()))
    }

    #[must_use]
    pub fn yes_price(&self) -> Option<Decimal> {
        self.price_at(0)
    }

    #[must_use]
    pub fn no_price(&self) -> Option<Decimal> {
        self.price_at(1)
    }

    /// Values above 1 are read as percentages.
    fn price_at(&self, index: usize) -> Option<Decimal> {
        let value = decimal(self.prices.as_ref()?.get(index)?)?;
        Some(if value > Decimal::ONE { value / dec!(100) } else { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn market(value: Value) -> LimitlessMarket {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn listing_is_found_in_any_envelope() {
        let one = || json!([{ "slug": "a" }]);
        assert_eq!(market_list(one()).map(|m| m.len()), Some(1));
        assert_eq!(market_list(json!({ "markets": one() })).map(|m| m.len()), Some(1));
        assert_eq!(market_list(json!({ "data": one(), "total": 1 })).map(|m| m.len()), Some(1));
        assert_eq!(market_list(json!({ "data": { "results": one() } })).map(|m| m.len()), Some(1));
        assert_eq!(market_list(json!({ "error": "maintenance" })), None);
        assert_eq!(market_list(json!("markets")), None);
    }

    #[test]
    fn ticker_and_title_fall_back_in_order() {
        let m = market(json!({ "id": 42, "marketSlug": "btc-100k", "name": "BTC above 100k?" }));
        assert_eq!(m.ticker().as_deref(), Some("42"));
        assert_eq!(m.title().as_deref(), Some("BTC above 100k?"));

        let bare = market(json!({ "slug": "  ", "title": "" }));
        assert_eq!(bare.ticker(), None);
        assert_eq!(bare.title(), None);
    }

    #[test]
    fn percentage_prices_are_scaled() {
        let m = market(json!({ "slug": "a", "prices": [41.5, "58.5"] }));
        assert_eq!(m.yes_price(), Some(dec!(0.415)));
        assert_eq!(m.no_price(), Some(dec!(0.585)));

        let unit = market(json!({ "slug": "b", "prices": [0.4] }));
        assert_eq!(unit.yes_price(), Some(dec!(0.4)));
        assert_eq!(unit.no_price(), None);
    }
}
