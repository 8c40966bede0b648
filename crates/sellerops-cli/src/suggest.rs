//! `suggest` command: reverse-solve sale prices for target margins.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;

use sellerops_core::money::round_money;
use sellerops_core::{calculate, suggest_prices, AppConfig, ChannelType, PriceSuggestion};

use crate::catalog::open_catalog;

pub(crate) struct SuggestArgs<'a> {
    pub catalog: Option<&'a Path>,
    pub sku: &'a str,
    pub channel: ChannelType,
    pub margins: &'a [Decimal],
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct SuggestionRow {
    pub target_margin: Decimal,
    /// `None` when the margin cannot be reached at these fee rates.
    pub price: Option<Decimal>,
    pub error: Option<String>,
}

pub(crate) fn suggestion_rows(suggestions: Vec<PriceSuggestion>, dp: u32) -> Vec<SuggestionRow> {
    suggestions
        .into_iter()
        .map(|s| match s.price {
            Ok(price) => SuggestionRow {
                target_margin: s.target_margin,
                price: Some(round_money(price, dp)),
                error: None,
            },
            Err(e) => SuggestionRow {
                target_margin: s.target_margin,
                price: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

/// Suggest prices for one product on one channel. Disabled channels are
/// still computable individually.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, or the SKU or channel
/// is not configured.
pub(crate) fn run_suggest(config: &AppConfig, args: &SuggestArgs<'_>) -> anyhow::Result<()> {
    let catalog = open_catalog(config, args.catalog)?;
    let product = catalog
        .find(args.sku)
        .ok_or_else(|| anyhow::anyhow!("sku '{}' not found in catalog", args.sku))?;
    let channel = product.channels.get(args.channel).ok_or_else(|| {
        anyhow::anyhow!(
            "sku '{}' has no '{}' channel configured",
            product.sku,
            args.channel
        )
    })?;

    let presets = if args.margins.is_empty() {
        config.margin_presets.as_slice()
    } else {
        args.margins
    };

    let input = channel.to_input(&product.cost_basis());
    let current = calculate(&input, product.tax_percent).rounded(config.display_decimals);
    let rows = suggestion_rows(
        suggest_prices(&input, product.tax_percent, presets),
        config.display_decimals,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{} on {}: price {} -> margin {}%",
        product.sku,
        args.channel.label(),
        channel.base.sale_price,
        current.margin
    );
    println!("{:>9} {:>12}", "MARGIN%", "PRICE");
    for row in &rows {
        let price = match (&row.price, &row.error) {
            (Some(price), _) => price.to_string(),
            (None, Some(e)) => format!("unreachable ({e})"),
            (None, None) => "-".to_string(),
        };
        println!("{:>9} {:>12}", row.target_margin.to_string(), price);
    }
    Ok(())
}
