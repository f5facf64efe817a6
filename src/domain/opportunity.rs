//! Cross-venue spread opportunities.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::id::MarketKey;
use super::quote::Quote;
use super::tier::SpreadTier;

/// Dedup identity of an opportunity: the market key plus its tier.
///
/// A market moving into a different tier produces a new fingerprint, so
/// escalations are never suppressed by an earlier, milder alert.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    key: MarketKey,
    tier: SpreadTier,
}

impl Fingerprint {
    /// Create a fingerprint from its parts.
    #[must_use]
    pub fn new(key: MarketKey, tier: SpreadTier) -> Self {
        Self { key, tier }
    }

    /// Get the market key.
    #[must_use]
    pub fn key(&self) -> &MarketKey {
        &self.key
    }

    /// Get the tier.
    #[must_use]
    pub fn tier(&self) -> SpreadTier {
        self.tier
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key, self.tier)
    }
}

/// A classified price gap between two venues quoting the same market.
///
/// Created by the classifier and consumed by the alert dispatcher. Never
/// persisted.
#[derive(Debug, Clone)]
pub struct Opportunity {
    key: MarketKey,
    tier: SpreadTier,
    spread_pct: Decimal,
    venue_a_quote: Quote,
    venue_b_quote: Quote,
    detected_at: DateTime<Utc>,
}

impl Opportunity {
    /// Create a new opportunity.
    #[must_use]
    pub fn new(
        key: MarketKey,
        tier: SpreadTier,
        spread_pct: Decimal,
        venue_a_quote: Quote,
        venue_b_quote: Quote,
        detected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key,
            tier,
            spread_pct,
            venue_a_quote,
            venue_b_quote,
            detected_at,
        }
    }

    /// Get the canonical market key.
    #[must_use]
    pub fn key(&self) -> &MarketKey {
        &self.key
    }

    /// Get the tier.
    #[must_use]
    pub fn tier(&self) -> SpreadTier {
        self.tier
    }

    /// Spread in percentage points.
    #[must_use]
    pub fn spread_pct(&self) -> Decimal {
        self.spread_pct
    }

    /// Get the first venue's quote.
    #[must_use]
    pub fn venue_a_quote(&self) -> &Quote {
        &self.venue_a_quote
    }

    /// Get the second venue's quote.
    #[must_use]
    pub fn venue_b_quote(&self) -> &Quote {
        &self.venue_b_quote
    }

    /// Get the detection time.
    #[must_use]
    pub fn detected_at(&self) -> DateTime<Utc> {
        self.detected_at
    }

    /// Dedup fingerprint for this opportunity.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(self.key.clone(), self.tier)
    }

    /// Quality score from 0 to 10.
    ///
    /// Each tier has a base score; the position of the spread within the
    /// tier's band adds up to 0.99 on top. Spreads of 5% or more score 10.
    #[must_use]
    pub fn quality_score(&self) -> Decimal {
        quality_score(self.spread_pct)
    }
}

/// Score a spread on the 0-10 quality scale.
#[must_use]
pub fn quality_score(spread_pct: Decimal) -> Decimal {
    if spread_pct >= dec!(5.0) {
        return dec!(10);
    }

    let tier = SpreadTier::for_spread(spread_pct);
    let (base, bonus) = match tier {
        SpreadTier::Exceptional => (dec!(9.0), ((spread_pct - dec!(3.0)) / dec!(2.0)).min(Decimal::ONE)),
        SpreadTier::Excellent => (dec!(8.0), band_bonus(spread_pct, dec!(2.51), dec!(0.49))),
        SpreadTier::VeryGood => (dec!(7.0), band_bonus(spread_pct, dec!(2.01), dec!(0.49))),
        SpreadTier::Good => (dec!(6.0), band_bonus(spread_pct, dec!(1.0), dec!(1.0))),
        SpreadTier::Fair => (dec!(5.0), band_bonus(spread_pct, dec!(0.75), dec!(0.25))),
        SpreadTier::Poor => (dec!(2.5), (spread_pct / dec!(0.75) * dec!(2.49)).min(dec!(2.49))),
    };

    (base + bonus.max(Decimal::ZERO)).min(dec!(10)).round_dp(2)
}

fn band_bonus(spread_pct: Decimal, floor: Decimal, width: Decimal) -> Decimal {
    ((spread_pct - floor) / width * dec!(0.99)).min(dec!(0.99))
}
