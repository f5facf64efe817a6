//! Kalshi market normalization.
//!
//! Price precedence per side: the explicit dollar price, then the bid/ask
//! midpoint, then (YES only) the last traded price. A zero bid or ask means
//! there is no book on that side.

pub mod dto;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use self::dto::{KalshiMarket, KalshiMarketsResponse};
use super::venue::number::optional_decimal;
use crate::domain::money::probability;
use crate::domain::{Price, Quote, VenueId};

/// Default API bases, tried in order.
pub const DEFAULT_BASE_URLS: [&str; 3] = [
    "https://api.elections.kalshi.com/trade-api/v2",
    "https://api.kalshi.com/trade-api/v2",
    "https://trading-api.kalshi.com/trade-api/v2",
];

/// Convert a markets response into quotes.
#[must_use]
pub fn normalize(venue: &VenueId, response: KalshiMarketsResponse, observed_at: DateTime<Utc>) -> Vec<Quote> {
    response
        .markets
        .into_iter()
        .map(|market| to_quote(venue, market, observed_at))
        .collect()
}

fn to_quote(venue: &VenueId, market: KalshiMarket, observed_at: DateTime<Utc>) -> Quote {
    let yes = dollars(market.yes_price.as_ref())
        .or_else(|| midpoint(market.yes_bid.as_ref(), market.yes_ask.as_ref()))
        .or_else(|| cents(market.last_price.as_ref()));
    let no = dollars(market.no_price.as_ref())
        .or_else(|| midpoint(market.no_bid.as_ref(), market.no_ask.as_ref()));

    let title = market.title.unwrap_or_else(|| market.ticker.clone());
    Quote::new(venue.clone(), market.ticker, title, yes, no, observed_at)
}

fn dollars(value: Option<&Value>) -> Option<Price> {
    optional_decimal(value).and_then(probability)
}

/// Positive cent value as a probability.
fn cents(value: Option<&Value>) -> Option<Price> {
    optional_decimal(value)
        .filter(|c| *c > Decimal::ZERO)
        .and_then(|c| probability(c / dec!(100)))
}

fn midpoint(bid: Option<&Value>, ask: Option<&Value>) -> Option<Price> {
    let bid = optional_decimal(bid).filter(|c| *c > Decimal::ZERO)?;
    let ask = optional_decimal(ask).filter(|c| *c > Decimal::ZERO)?;
    probability((bid + ask) / dec!(200))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotes(json: &str) -> Vec<Quote> {
        let response: KalshiMarketsResponse = serde_json::from_str(json).unwrap();
        normalize(&VenueId::from("kalshi"), response, Utc::now())
    }

    #[test]
    fn null_yes_price_without_book_is_absent() {
        let q = quotes(r#"{"markets":[{"ticker":"T","title":"X","yes_price":null}]}"#);
        assert_eq!(q[0].yes_price(), None);
        assert_eq!(q[0].no_price(), None);
    }

    #[test]
    fn dollar_price_wins() {
        let q = quotes(r#"{"markets":[{"ticker":"T","yes_price":0.41,"yes_bid":10,"yes_ask":20}]}"#);
        assert_eq!(q[0].yes_price(), Some(dec!(0.41)));
    }

    #[test]
    fn book_midpoint_in_cents() {
        let q = quotes(r#"{"markets":[{"ticker":"T","yes_bid":40,"yes_ask":42,"no_bid":58,"no_ask":60}]}"#);
        assert_eq!(q[0].yes_price(), Some(dec!(0.41)));
        assert_eq!(q[0].no_price(), Some(dec!(0.59)));
    }

    #[test]
    fn zero_book_falls_back_to_last_price() {
        let q = quotes(r#"{"markets":[{"ticker":"T","yes_bid":0,"yes_ask":0,"last_price":37}]}"#);
        assert_eq!(q[0].yes_price(), Some(dec!(0.37)));
    }

    #[test]
    fn empty_book_and_no_trades_is_absent_not_zero() {
        let q = quotes(r#"{"markets":[{"ticker":"T","yes_bid":0,"yes_ask":0,"last_price":0}]}"#);
        assert_eq!(q[0].yes_price(), None);
    }

    #[test]
    fn out_of_range_dollar_price_falls_through() {
        let q = quotes(r#"{"markets":[{"ticker":"T","yes_price":41,"yes_bid":40,"yes_ask":42}]}"#);
        assert_eq!(q[0].yes_price(), Some(dec!(0.41)));
    }

    #[test]
    fn title_defaults_to_ticker() {
        let q = quotes(r#"{"markets":[{"ticker":"KX-1"}]}"#);
        assert_eq!(q[0].title(), "KX-1");
    }
}
