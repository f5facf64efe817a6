//! Spread severity tiers.
//!
//! Each tier owns an inclusive lower bound on the spread, in percentage
//! points. Bounds strictly decrease from [`SpreadTier::Exceptional`] to
//! [`SpreadTier::Poor`], and `Poor` starts at zero, so every non-negative
//! spread maps to exactly one tier.
//!
//! | Tier        | Spread      |
//! |-------------|-------------|
//! | Exceptional | >= 3.00%    |
//! | Excellent   | >= 2.51%    |
//! | VeryGood    | >= 2.01%    |
//! | Good        | >= 1.00%    |
//! | Fair        | >= 0.75%    |
//! | Poor        | otherwise   |

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Severity bucket for a cross-venue spread.
///
/// Ordering follows severity: `Exceptional > Excellent > ... > Poor`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadTier {
    Exceptional,
    Excellent,
    VeryGood,
    #[default]
    Good,
    Fair,
    Poor,
}

impl SpreadTier {
    /// All tiers, strictest first.
    pub const ALL: [SpreadTier; 6] = [
        SpreadTier::Exceptional,
        SpreadTier::Excellent,
        SpreadTier::VeryGood,
        SpreadTier::Good,
        SpreadTier::Fair,
        SpreadTier::Poor,
    ];

    /// Inclusive lower bound of the tier, in percentage points.
    #[must_use]
    pub fn threshold(self) -> Decimal {
        match self {
            Self::Exceptional => dec!(3.0),
            Self::Excellent => dec!(2.51),
            Self::VeryGood => dec!(2.01),
            Self::Good => dec!(1.0),
            Self::Fair => dec!(0.75),
            Self::Poor => Decimal::ZERO,
        }
    }

    /// Highest tier whose threshold the spread meets or exceeds.
    #[must_use]
    pub fn for_spread(spread_pct: Decimal) -> Self {
        Self::ALL
            .into_iter()
            .find(|tier| spread_pct >= tier.threshold())
            .unwrap_or(Self::Poor)
    }

    /// Priority rank, 1 being the most severe.
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            Self::Exceptional => 1,
            Self::Excellent => 2,
            Self::VeryGood => 3,
            Self::Good => 4,
            Self::Fair => 5,
            Self::Poor => 6,
        }
    }

    /// Stable snake_case name, used in fingerprints and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exceptional => "exceptional",
            Self::Excellent => "excellent",
            Self::VeryGood => "very_good",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    /// Human-readable spread band.
    #[must_use]
    pub fn band(self) -> &'static str {
        match self {
            Self::Exceptional => "3.0%+",
            Self::Excellent => "2.51-3.0%",
            Self::VeryGood => "2.01-2.5%",
            Self::Good => "1.0-2.0%",
            Self::Fair => "0.75-1.0%",
            Self::Poor => "<0.75%",
        }
    }

    /// Embed color for webhook notifications.
    #[must_use]
    pub fn color(self) -> u32 {
        match self {
            Self::Exceptional => 0x0066ff,
            Self::Excellent => 0x00ff00,
            Self::VeryGood => 0xffff00,
            Self::Good => 0xffa500,
            Self::Fair | Self::Poor => 0x808080,
        }
    }
}

impl Ord for SpreadTier {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority().cmp(&self.priority())
    }
}

impl PartialOrd for SpreadTier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SpreadTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
