//! Cross-venue market pairing.
//!
//! Venues name the same event differently, so quotes are mapped onto a
//! canonical [`MarketKey`] before they can be compared. Explicit ticker
//! aliases always win; otherwise the normalized market title is used when
//! title matching is enabled.

use std::collections::{BTreeMap, HashMap};

use super::id::{MarketKey, VenueId};
use super::quote::Quote;

/// Explicit mapping of venue tickers onto one canonical market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketAlias {
    pub key: MarketKey,
    pub tickers: HashMap<VenueId, String>,
}

/// Two quotes for the same canonical market from different venues.
#[derive(Debug, Clone)]
pub struct QuotePair {
    pub key: MarketKey,
    pub quote_a: Quote,
    pub quote_b: Quote,
}

/// Maps quotes onto canonical keys and pairs them across venues.
#[derive(Debug, Clone, Default)]
pub struct PairMatcher {
    aliases: HashMap<(VenueId, String), MarketKey>,
    match_by_title: bool,
}

impl PairMatcher {
    #[must_use]
    pub fn new(aliases: impl IntoIterator<Item = MarketAlias>, match_by_title: bool) -> Self {
        let aliases = aliases
            .into_iter()
            .flat_map(|alias| {
                let key = alias.key;
                alias
                    .tickers
                    .into_iter()
                    .map(move |(venue, ticker)| ((venue, ticker), key.clone()))
            })
            .collect();
        Self {
            aliases,
            match_by_title,
        }
    }

    /// Number of configured venue ticker aliases.
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Canonical key for a quote, if it can be matched at all.
    #[must_use]
    pub fn key_for(&self, quote: &Quote) -> Option<MarketKey> {
        let lookup = (quote.venue().clone(), quote.ticker().to_string());
        if let Some(key) = self.aliases.get(&lookup) {
            return Some(key.clone());
        }
        if !self.match_by_title {
            return None;
        }
        let normalized = normalize_title(quote.title());
        (!normalized.is_empty()).then(|| MarketKey::new(normalized))
    }

    /// Pair quotes that share a key across every pair of venues.
    ///
    /// Venues are compared in input order and pairs come out sorted by key,
    /// so the result is deterministic for a given input. When a venue
    /// reports the same key twice, the first quote wins.
    #[must_use]
    pub fn pair(&self, quotes_by_venue: &[(VenueId, Vec<Quote>)]) -> Vec<QuotePair> {
        let indexed: Vec<BTreeMap<MarketKey, &Quote>> = quotes_by_venue
            .iter()
            .map(|(_, quotes)| {
                let mut by_key = BTreeMap::new();
                for quote in quotes {
                    if let Some(key) = self.key_for(quote) {
                        by_key.entry(key).or_insert(quote);
                    }
                }
                by_key
            })
            .collect();

        let mut pairs = Vec::new();
        for (i, left) in indexed.iter().enumerate() {
            for right in &indexed[i + 1..] {
                for (key, quote_a) in left {
                    if let Some(quote_b) = right.get(key) {
                        pairs.push(QuotePair {
                            key: key.clone(),
                            quote_a: (*quote_a).clone(),
                            quote_b: (*quote_b).clone(),
                        });
                    }
                }
            }
        }
        pairs
    }
}

/// Lowercase, replace non-alphanumerics with spaces, collapse whitespace.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn quote(venue: &str, ticker: &str, title: &str) -> Quote {
        Quote::new(VenueId::from(venue), ticker, title, Some(dec!(0.5)), None, Utc::now())
    }

    #[test]
    fn titles_normalize_punctuation_and_case() {
        assert_eq!(
            normalize_title("  Will BTC hit $100k by 2025?  "),
            "will btc hit 100k by 2025"
        );
        assert_eq!(normalize_title("???"), "");
    }

    #[test]
    fn alias_wins_over_title() {
        let alias = MarketAlias {
            key: MarketKey::from("btc-100k"),
            tickers: HashMap::from([(VenueId::from("kalshi"), "KXBTC-100K".to_string())]),
        };
        let matcher = PairMatcher::new([alias], true);
        assert_eq!(
            matcher.key_for(&quote("kalshi", "KXBTC-100K", "Bitcoin above 100k?")),
            Some(MarketKey::from("btc-100k"))
        );
        assert_eq!(
            matcher.key_for(&quote("kalshi", "OTHER", "Bitcoin above 100k?")),
            Some(MarketKey::from("bitcoin above 100k"))
        );
    }

    #[test]
    fn title_matching_can_be_disabled() {
        let matcher = PairMatcher::new([], false);
        assert_eq!(matcher.key_for(&quote("kalshi", "T", "Some market")), None);
    }

    #[test]
    fn pairs_across_venues_by_key() {
        let matcher = PairMatcher::new([], true);
        let input = vec![
            (
                VenueId::from("kalshi"),
                vec![quote("kalshi", "K1", "Fed cuts rates"), quote("kalshi", "K2", "Only here")],
            ),
            (
                VenueId::from("polymarket"),
                vec![quote("polymarket", "0xabc", "Fed cuts rates?")],
            ),
        ];

        let pairs = matcher.pair(&input);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].key.as_str(), "fed cuts rates");
        assert_eq!(pairs[0].quote_a.ticker(), "K1");
        assert_eq!(pairs[0].quote_b.ticker(), "0xabc");
    }

    #[test]
    fn single_venue_yields_no_pairs() {
        let matcher = PairMatcher::new([], true);
        let input = vec![(VenueId::from("kalshi"), vec![quote("kalshi", "K1", "Fed cuts rates")])];
        assert!(matcher.pair(&input).is_empty());
    }
}
