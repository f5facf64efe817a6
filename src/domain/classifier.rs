//! Spread classification.
//!
//! Turns two quotes for the same market into a tiered [`Opportunity`]. The
//! classifier is pure: identical inputs always give identical outputs, and
//! the detection time is taken from the quotes rather than the clock.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::id::{MarketKey, VenueId};
use super::opportunity::Opportunity;
use super::quote::Quote;
use super::tier::SpreadTier;

/// Why a pair of quotes produced no opportunity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOpportunity {
    /// A venue had neither a YES nor a NO price.
    MissingPrice { venue: VenueId },
}

/// Outcome of classifying a quote pair.
#[derive(Debug, Clone)]
pub enum Classification {
    Opportunity(Opportunity),
    NoOpportunity(NoOpportunity),
}

impl Classification {
    /// Get the opportunity, if any.
    #[must_use]
    pub fn opportunity(self) -> Option<Opportunity> {
        match self {
            Self::Opportunity(opp) => Some(opp),
            Self::NoOpportunity(_) => None,
        }
    }
}

/// Classifies cross-venue spreads and decides which tiers are worth alerting.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadClassifier {
    min_alert_tier: SpreadTier,
}

impl SpreadClassifier {
    /// Create a classifier that alerts at `min_alert_tier` and above.
    #[must_use]
    pub const fn new(min_alert_tier: SpreadTier) -> Self {
        Self { min_alert_tier }
    }

    /// Lowest tier that is dispatched.
    #[must_use]
    pub const fn min_alert_tier(&self) -> SpreadTier {
        self.min_alert_tier
    }

    /// Classify two quotes, keyed by the first quote's ticker.
    #[must_use]
    pub fn classify(&self, quote_a: &Quote, quote_b: &Quote) -> Classification {
        self.classify_pair(&MarketKey::from(quote_a.ticker()), quote_a, quote_b)
    }

    /// Classify two quotes for a known canonical market.
    #[must_use]
    pub fn classify_pair(&self, key: &MarketKey, quote_a: &Quote, quote_b: &Quote) -> Classification {
        let Some(price_a) = quote_a.comparable_yes_price() else {
            return Classification::NoOpportunity(NoOpportunity::MissingPrice {
                venue: quote_a.venue().clone(),
            });
        };
        let Some(price_b) = quote_b.comparable_yes_price() else {
            return Classification::NoOpportunity(NoOpportunity::MissingPrice {
                venue: quote_b.venue().clone(),
            });
        };

        let spread_pct = spread_pct(price_a, price_b);
        let tier = SpreadTier::for_spread(spread_pct);
        let detected_at = quote_a.observed_at().max(quote_b.observed_at());

        Classification::Opportunity(Opportunity::new(
            key.clone(),
            tier,
            spread_pct,
            quote_a.clone(),
            quote_b.clone(),
            detected_at,
        ))
    }

    /// Whether an opportunity meets the minimum alert tier.
    #[must_use]
    pub fn is_alertable(&self, opportunity: &Opportunity) -> bool {
        opportunity.tier() >= self.min_alert_tier
    }
}

/// Absolute price difference in percentage points.
#[must_use]
pub fn spread_pct(price_a: Decimal, price_b: Decimal) -> Decimal {
    ((price_a - price_b).abs() * dec!(100)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn quote(venue: &str, yes: Option<Decimal>, no: Option<Decimal>) -> Quote {
        let observed = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Quote::new(VenueId::from(venue), "BTC-100K", "BTC above 100k", yes, no, observed)
    }

    fn classify(a: Decimal, b: Decimal) -> Opportunity {
        SpreadClassifier::default()
            .classify(&quote("a", Some(a), None), &quote("b", Some(b), None))
            .opportunity()
            .expect("both prices present")
    }

    #[test]
    fn one_cent_gap_is_good() {
        let opp = classify(dec!(0.40), dec!(0.41));
        assert_eq!(opp.spread_pct(), dec!(1));
        assert_eq!(opp.tier(), SpreadTier::Good);
    }

    #[test]
    fn spread_is_symmetric() {
        assert_eq!(
            classify(dec!(0.40), dec!(0.43)).spread_pct(),
            classify(dec!(0.43), dec!(0.40)).spread_pct()
        );
    }

    #[test]
    fn tier_boundaries_are_exact() {
        assert_eq!(classify(dec!(0.50), dec!(0.53)).tier(), SpreadTier::Exceptional);
        assert_eq!(classify(dec!(0.50), dec!(0.5299)).tier(), SpreadTier::Excellent);
        assert_eq!(classify(dec!(0.50), dec!(0.51)).tier(), SpreadTier::Good);
        assert_eq!(classify(dec!(0.50), dec!(0.5099)).tier(), SpreadTier::Fair);
        assert_eq!(classify(dec!(0.50), dec!(0.5074)).tier(), SpreadTier::Poor);
    }

    #[test]
    fn larger_spread_never_lowers_tier() {
        let mut previous = SpreadTier::Poor;
        for bps in 0..=1000 {
            let tier = classify(dec!(0), Decimal::new(bps, 4)).tier();
            assert!(tier >= previous, "tier dropped at {bps}");
            previous = tier;
        }
    }

    #[test]
    fn missing_price_is_no_opportunity() {
        let result = SpreadClassifier::default()
            .classify(&quote("a", None, None), &quote("b", Some(dec!(0.41)), None));
        match result {
            Classification::NoOpportunity(NoOpportunity::MissingPrice { venue }) => {
                assert_eq!(venue.as_str(), "a");
            }
            Classification::Opportunity(_) => panic!("expected no opportunity"),
        }
    }

    #[test]
    fn no_side_complement_is_used() {
        let opp = SpreadClassifier::default()
            .classify(&quote("a", None, Some(dec!(0.60))), &quote("b", Some(dec!(0.42)), None))
            .opportunity()
            .unwrap();
        assert_eq!(opp.spread_pct(), dec!(2));
        assert_eq!(opp.tier(), SpreadTier::Good);
    }

    #[test]
    fn classification_is_deterministic() {
        let a = quote("a", Some(dec!(0.40)), None);
        let b = quote("b", Some(dec!(0.425)), None);
        let classifier = SpreadClassifier::default();
        let first = classifier.classify(&a, &b).opportunity().unwrap();
        let second = classifier.classify(&a, &b).opportunity().unwrap();
        assert_eq!(first.tier(), second.tier());
        assert_eq!(first.spread_pct(), second.spread_pct());
        assert_eq!(first.detected_at(), second.detected_at());
    }

    #[test]
    fn min_tier_filters_fair_and_poor() {
        let classifier = SpreadClassifier::new(SpreadTier::Good);
        assert!(classifier.is_alertable(&classify(dec!(0.40), dec!(0.41))));
        assert!(!classifier.is_alertable(&classify(dec!(0.40), dec!(0.408))));
        assert!(!classifier.is_alertable(&classify(dec!(0.40), dec!(0.401))));
    }
}
