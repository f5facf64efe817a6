//! Alert payload rendering.

use rust_decimal::Decimal;

use crate::domain::{Opportunity, Quote, SpreadTier};
use crate::port::{AlertPayload, Embed, EmbedField};

/// Display name of a tier.
#[must_use]
pub fn tier_label(tier: SpreadTier) -> &'static str {
    match tier {
        SpreadTier::Exceptional => "Exceptional",
        SpreadTier::Excellent => "Excellent",
        SpreadTier::VeryGood => "Very Good",
        SpreadTier::Good => "Good",
        SpreadTier::Fair => "Fair",
        SpreadTier::Poor => "Poor",
    }
}

/// Render an opportunity as a webhook message.
#[must_use]
pub fn opportunity_payload(opportunity: &Opportunity, username: Option<&str>) -> AlertPayload {
    let tier = opportunity.tier();
    let a = opportunity.venue_a_quote();
    let b = opportunity.venue_b_quote();

    let fields = vec![
        field(a.venue().as_str(), quote_summary(a), true),
        field(b.venue().as_str(), quote_summary(b), true),
        field("Spread", format!("{}%", opportunity.spread_pct().round_dp(2)), true),
        field("Tier", format!("{} ({})", tier_label(tier), tier.band()), true),
        field("Quality", format!("{}/10", opportunity.quality_score()), true),
        field("Market key", opportunity.key().to_string(), false),
    ];

    AlertPayload {
        content: format!(
            "{} spread of {}% on {}",
            tier_label(tier),
            opportunity.spread_pct().round_dp(2),
            a.title()
        ),
        username: username.map(ToString::to_string),
        embeds: vec![Embed {
            title: format!("{} spread: {}", tier_label(tier), a.title()),
            description: format!(
                "{} vs {} priced {} points apart",
                a.venue(),
                b.venue(),
                opportunity.spread_pct().round_dp(2)
            ),
            color: tier.color(),
            timestamp: opportunity.detected_at().to_rfc3339(),
            fields,
        }],
    }
}

/// Startup notice sent once when enabled.
#[must_use]
pub fn online_payload(venues: &[String], username: Option<&str>) -> AlertPayload {
    AlertPayload {
        content: format!("spreadwatch online, watching {}", venues.join(", ")),
        username: username.map(ToString::to_string),
        embeds: Vec::new(),
    }
}

fn quote_summary(quote: &Quote) -> String {
    format!(
        "{} | YES {} | NO {}",
        quote.ticker(),
        price(quote.yes_price()),
        price(quote.no_price())
    )
}

fn price(value: Option<Decimal>) -> String {
    value.map_or_else(|| "n/a".to_string(), |p| format!("${}", p.round_dp(3)))
}

fn field(name: &str, value: String, inline: bool) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value,
        inline,
    }
}
