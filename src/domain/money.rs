//! Price representation for binary outcome contracts.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
///
/// Binary contract prices are probabilities and live in `[0, 1]`.
pub type Price = Decimal;

/// Accept a price only when it is a valid probability.
///
/// Anything outside `[0, 1]` is treated as "no quote" rather than clamped.
#[must_use]
pub fn probability(value: Decimal) -> Option<Price> {
    (Decimal::ZERO..=Decimal::ONE)
        .contains(&value)
        .then_some(value)
}
