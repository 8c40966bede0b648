//! Decimal helpers shared by the fee model and the calculator.
//!
//! Every division in the engine goes through [`safe_div`] so the
//! "zero denominator yields a fixed default" convention lives in one place.
//! Results too large for a `Decimal` saturate at `Decimal::MAX` / `Decimal::MIN`
//! instead of panicking.

use rust_decimal::{Decimal, RoundingStrategy};

/// Percentages are expressed on a 0..100 scale.
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// `Decimal::MIN` when `negative`, `Decimal::MAX` otherwise.
#[must_use]
pub fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Sum that saturates at the `Decimal` bounds.
#[must_use]
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Divide `numerator` by `denominator`, returning `default_on_zero` when the
/// denominator is zero. A quotient that does not fit saturates.
#[must_use]
pub fn safe_div(numerator: Decimal, denominator: Decimal, default_on_zero: Decimal) -> Decimal {
    if denominator.is_zero() {
        return default_on_zero;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        saturated(numerator.is_sign_negative() != denominator.is_sign_negative())
    })
}

/// `pct` percent of `value`, e.g. `percent_of(80, 20) == 16`.
#[must_use]
pub fn percent_of(value: Decimal, pct: Decimal) -> Decimal {
    match value.checked_mul(pct) {
        Some(scaled) => safe_div(scaled, HUNDRED, Decimal::ZERO),
        None => safe_div(value, HUNDRED, Decimal::ZERO).saturating_mul(pct),
    }
}

/// `part` as a percentage of `whole`, or zero when `whole` is not positive.
///
/// Margin and ROI both use this: a missing (zero) base means "undefined",
/// reported as `0` rather than an error.
#[must_use]
pub fn ratio_pct(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match part.checked_mul(HUNDRED) {
        Some(scaled) => safe_div(scaled, whole, Decimal::ZERO),
        None => safe_div(part, whole, Decimal::ZERO).saturating_mul(HUNDRED),
    }
}

/// Round for display using half-away-from-zero, the convention shoppers and
/// marketplaces expect for currency.
#[must_use]
pub fn round_money(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
