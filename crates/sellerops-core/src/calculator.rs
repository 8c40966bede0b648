//! Profitability calculator: profit, margin and ROI for a sale price, and the
//! inverse solve for the price that yields a target margin.
//!
//! All percentage costs (commission, ads, other, payment gateway, tax) are
//! levied on the sale price, never on the cost basis. Every function here is
//! pure: no I/O, no shared state.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::channels::{ChannelMap, ChannelType};
use crate::error::PricingError;
use crate::money::{percent_of, ratio_pct, round_money, safe_div, saturating_sum, HUNDRED};
use crate::product::CostBasis;

/// Margin presets offered by the price-suggestion feature.
pub const DEFAULT_MARGIN_PRESETS: [Decimal; 3] = [
    Decimal::from_parts(20, 0, 0, false, 0),
    Decimal::from_parts(30, 0, 0, false, 0),
    Decimal::from_parts(40, 0, 0, false, 0),
];

/// Channel-agnostic calculator input. Fields that do not apply to a channel
/// are zero and therefore neutral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelInput {
    pub price: Decimal,
    pub cost_item: Decimal,
    pub pack_cost: Decimal,
    pub commission_pct: Decimal,
    pub ads_pct: Decimal,
    pub other_pct: Decimal,
    /// Payment gateway percentage; non-zero only for the own-site channel.
    pub gateway_pct: Decimal,
    pub fixed_fee: Decimal,
    pub other_value: Decimal,
    pub inbound_freight: Decimal,
    pub outbound_freight: Decimal,
    pub prep_center: Decimal,
    /// Carrier rebate. Stored non-negative and subtracted from unit cost.
    pub flex_revenue: Decimal,
}

impl ChannelInput {
    /// Same input at a different sale price.
    #[must_use]
    pub fn with_price(self, price: Decimal) -> Self {
        Self { price, ..self }
    }

    /// Sum of every percentage-of-price cost, including the global tax.
    #[must_use]
    pub fn var_percent_total(&self, tax_percent: Decimal) -> Decimal {
        saturating_sum([
            self.commission_pct,
            self.ads_pct,
            self.other_pct,
            self.gateway_pct,
            tax_percent,
        ])
    }

    /// Flat per-unit costs net of the flex rebate. May be negative; never clamped.
    #[must_use]
    pub fn unit_cost_total(&self) -> Decimal {
        saturating_sum([
            self.cost_item,
            self.pack_cost,
            self.inbound_freight,
            self.outbound_freight,
            self.prep_center,
            self.fixed_fee,
            self.other_value,
        ])
        .saturating_sub(self.flex_revenue)
    }

    /// Capital at risk before the sale happens. Excludes packaging, outbound
    /// logistics and every percentage fee.
    #[must_use]
    pub fn invested_cost(&self) -> Decimal {
        saturating_sum([self.cost_item, self.inbound_freight, self.prep_center])
    }
}

/// Intermediate cost figures for one price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub percent_cost_total: Decimal,
    pub unit_cost_total: Decimal,
    pub total_cost: Decimal,
    pub invested_cost: Decimal,
}

/// Profitability of a single channel at a single price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelResult {
    pub profit: Decimal,
    /// Profit as a percentage of sale price; `0` when price is not positive.
    pub margin: Decimal,
    /// Profit as a percentage of invested cost; `0` when nothing is invested.
    pub roi: Decimal,
}

impl ChannelResult {
    /// Copy rounded half-away-from-zero to `dp` decimal places, for display.
    #[must_use]
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            profit: round_money(self.profit, dp),
            margin: round_money(self.margin, dp),
            roi: round_money(self.roi, dp),
        }
    }

    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.profit < Decimal::ZERO
    }
}

/// Compute the cost figures for `input.price`.
#[must_use]
pub fn breakdown(input: &ChannelInput, tax_percent: Decimal) -> CostBreakdown {
    let percent_cost_total = percent_of(input.price, input.var_percent_total(tax_percent));
    let unit_cost_total = input.unit_cost_total();
    CostBreakdown {
        percent_cost_total,
        unit_cost_total,
        total_cost: percent_cost_total.saturating_add(unit_cost_total),
        invested_cost: input.invested_cost(),
    }
}

/// Profit, margin and ROI for `input.price`.
///
/// Negative profit and margin are ordinary results, not errors. A price of
/// zero yields `margin = 0`; ROI is still computed from the invested cost.
/// Amounts beyond the `Decimal` range saturate rather than panic.
#[must_use]
pub fn calculate(input: &ChannelInput, tax_percent: Decimal) -> ChannelResult {
    let costs = breakdown(input, tax_percent);
    let profit = input.price.saturating_sub(costs.total_cost);
    ChannelResult {
        profit,
        margin: ratio_pct(profit, input.price),
        roi: ratio_pct(profit, costs.invested_cost),
    }
}

/// Solve for the sale price whose margin equals `target_margin_pct`:
///
/// `price = unit_cost_total / (1 - (var_percent_total + target) / 100)`
///
/// # Errors
///
/// Returns [`PricingError::UnreachableMargin`] when the percentage fees plus
/// the target margin reach or exceed 100%, since no finite positive price
/// can satisfy it.
pub fn price_for_margin(
    input: &ChannelInput,
    target_margin_pct: Decimal,
    tax_percent: Decimal,
) -> Result<Decimal, PricingError> {
    let percent_sum = input
        .var_percent_total(tax_percent)
        .saturating_add(target_margin_pct);
    if percent_sum >= HUNDRED {
        return Err(PricingError::UnreachableMargin { percent_sum });
    }

    let denominator = Decimal::ONE - safe_div(percent_sum, HUNDRED, Decimal::ZERO);
    Ok(safe_div(input.unit_cost_total(), denominator, Decimal::ZERO))
}

/// Outcome of the reverse solve for one margin preset.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSuggestion {
    pub target_margin: Decimal,
    pub price: Result<Decimal, PricingError>,
}

/// Run [`price_for_margin`] for each preset. Infeasible presets are kept as
/// errors next to the feasible ones.
#[must_use]
pub fn suggest_prices(
    input: &ChannelInput,
    tax_percent: Decimal,
    presets: &[Decimal],
) -> Vec<PriceSuggestion> {
    presets
        .iter()
        .map(|&target_margin| {
            let price = price_for_margin(input, target_margin, tax_percent);
            if let Err(ref e) = price {
                tracing::debug!(%target_margin, error = %e, "margin preset is unreachable");
            }
            PriceSuggestion {
                target_margin,
                price,
            }
        })
        .collect()
}

/// Calculate every enabled channel. Disabled channels are left out of the
/// result entirely, whatever their stored values.
#[must_use]
pub fn calculate_all(
    basis: &CostBasis,
    channels: &ChannelMap,
) -> BTreeMap<ChannelType, ChannelResult> {
    channels
        .iter()
        .filter_map(|config| {
            if !config.is_enabled() {
                tracing::debug!(channel = %config.channel_type(), "skipping disabled channel");
                return None;
            }
            let input = config.to_input(basis);
            Some((config.channel_type(), calculate(&input, basis.tax_percent)))
        })
        .collect()
}

#[cfg(test)]
#[path = "calculator_test.rs"]
mod tests;
