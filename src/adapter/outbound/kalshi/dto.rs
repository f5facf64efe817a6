//! Kalshi REST response types.

use serde::Deserialize;
use serde_json::Value;

/// `GET /markets` response.
#[derive(Debug, Deserialize)]
pub struct KalshiMarketsResponse {
    #[serde(default)]
    pub markets: Vec<KalshiMarket>,
    /// Pagination cursor. Only the first page is read.
    #[serde(default)]
    pub cursor: Option<String>,
}

/// One market. Dollar prices are decimals in `[0, 1]`; book fields are
/// integer cents. Any of them may be missing or `null`.
#[derive(Debug, Deserialize)]
pub struct KalshiMarket {
    pub ticker: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub yes_price: Option<Value>,
    #[serde(default)]
    pub no_price: Option<Value>,
    #[serde(default)]
    pub yes_bid: Option<Value>,
    #[serde(default)]
    pub yes_ask: Option<Value>,
    #[serde(default)]
    pub no_bid: Option<Value>,
    #[serde(default)]
    pub no_ask: Option<Value>,
    #[serde(default)]
    pub last_price: Option<Value>,
}
