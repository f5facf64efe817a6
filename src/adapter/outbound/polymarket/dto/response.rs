//! Gamma `GET /markets` payload.
//!
//! The listing is a bare JSON array. `outcomes` and `outcomePrices` are
//! themselves JSON arrays serialized into strings, e.g.
//! `"outcomes": "[\"Yes\", \"No\"]"`.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::adapter::outbound::venue::number::decimal;

/// One Gamma market. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    /// Used as the venue ticker.
    pub condition_id: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    outcomes: Option<String>,
    #[serde(default)]
    outcome_prices: Option<String>,
}

/// Decode an array that was serialized into a string field.
///
/// Malformed text is logged and treated as empty.
fn embedded<T: DeserializeOwned>(raw: Option<&str>, field: &str, market: &str) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    serde_json::from_str(raw).unwrap_or_else(|err| {
        debug!(market, field, error = %err, "Ignoring malformed embedded array");
        Vec::new()
    })
}

impl GammaMarket {
    fn labels(&self) -> Vec<String> {
        embedded(self.outcomes.as_deref(), "outcomes", &self.condition_id)
    }

    /// Prices in outcome order. Entries may be numbers or strings.
    fn prices(&self) -> Vec<Option<Decimal>> {
        embedded::<Value>(self.outcome_prices.as_deref(), "outcomePrices", &self.condition_id)
            .iter()
            .map(decimal)
            .collect()
    }

    /// Price quoted for `outcome`, matched case-insensitively by label.
    #[must_use]
    pub fn price_of(&self, outcome: &str) -> Option<Decimal> {
        let index = self
            .labels()
            .iter()
            .position(|label| label.trim().eq_ignore_ascii_case(outcome))?;
        self.prices().into_iter().nth(index).flatten()
    }
}
