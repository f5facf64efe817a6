//! Spread tier table.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::alert::message::tier_label;
use crate::domain::SpreadTier;
use crate::error::Result;

#[derive(Tabled)]
struct TierRow {
    #[tabled(rename = "Tier")]
    tier: &'static str,
    #[tabled(rename = "Min spread")]
    threshold: String,
    #[tabled(rename = "Band")]
    band: &'static str,
    #[tabled(rename = "Priority")]
    priority: u8,
    #[tabled(rename = "Color")]
    color: String,
}

fn rows() -> Vec<TierRow> {
    SpreadTier::ALL
        .iter()
        .map(|tier| TierRow {
            tier: tier_label(*tier),
            threshold: format!("{}%", tier.threshold()),
            band: tier.band(),
            priority: tier.priority(),
            color: format!("#{:06x}", tier.color()),
        })
        .collect()
}

/// Print every tier with its inclusive lower bound.
pub fn execute() -> Result<()> {
    if output::is_json() {
        let tiers: Vec<_> = SpreadTier::ALL
            .iter()
            .map(|tier| {
                json!({
                    "tier": tier.as_str(),
                    "threshold_pct": tier.threshold().to_string(),
                    "band": tier.band(),
                    "priority": tier.priority(),
                    "color": tier.color(),
                })
            })
            .collect();
        output::json_output(json!({ "command": "tiers", "tiers": tiers }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Spread tiers");
    output::lines(&Table::new(rows()).to_string());
    output::hint(&format!(
        "set {} to change which tiers are alerted",
        output::highlight("[classifier] min_alert_tier")
    ));
    Ok(())
}
