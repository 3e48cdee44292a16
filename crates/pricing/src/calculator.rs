//! Price conversion arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on computed prices (monetary precision).
pub const PRICE_SCALE: u32 = 2;

/// Convert a base price into the store's regular price.
///
/// `new_price = round(base_price * exchange_rate, 2)`, midpoints rounding
/// away from zero. The base price is already denominated in the item's
/// currency; the rate is that currency's multiplier relative to the store's
/// base currency. Pure: inputs are validated by the caller.
pub fn convert(base_price: Decimal, exchange_rate: Decimal) -> Decimal {
    (base_price * exchange_rate)
        .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
