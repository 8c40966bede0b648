//! `calculate` command: per-channel profitability for catalog products.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;

use sellerops_core::{AppConfig, ChannelType, Product};

use crate::catalog::{open_catalog, select_products};

/// One enabled channel of one product, rounded for display.
#[derive(Debug, Serialize)]
pub(crate) struct ResultRow {
    pub sku: String,
    pub channel: ChannelType,
    pub sale_price: Decimal,
    pub profit: Decimal,
    pub margin: Decimal,
    pub roi: Decimal,
    pub loss: bool,
}

pub(crate) fn result_rows(products: &[&Product], dp: u32) -> Vec<ResultRow> {
    products
        .iter()
        .flat_map(|product| {
            product
                .channel_results()
                .into_iter()
                .map(move |(channel, result)| {
                    let sale_price = product
                        .channels
                        .get(channel)
                        .map_or(Decimal::ZERO, |c| c.base.sale_price);
                    let shown = result.rounded(dp);
                    ResultRow {
                        sku: product.sku.clone(),
                        channel,
                        sale_price,
                        profit: shown.profit,
                        margin: shown.margin,
                        roi: shown.roi,
                        loss: result.is_loss(),
                    }
                })
        })
        .collect()
}

/// Calculate every enabled channel of the selected products.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or `sku` is unknown.
pub(crate) fn run_calculate(
    config: &AppConfig,
    catalog_path: Option<&Path>,
    sku: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = open_catalog(config, catalog_path)?;
    let products = select_products(&catalog, sku)?;
    let rows = result_rows(&products, config.display_decimals);

    tracing::info!(
        products = products.len(),
        channels = rows.len(),
        "calculated channel results"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("no enabled channels");
        return Ok(());
    }

    println!(
        "{:<20} {:<22} {:>10} {:>10} {:>9} {:>9}",
        "SKU", "CHANNEL", "PRICE", "PROFIT", "MARGIN%", "ROI%"
    );
    for row in &rows {
        println!(
            "{:<20} {:<22} {:>10} {:>10} {:>9} {:>9}{}",
            row.sku,
            row.channel.as_str(),
            row.sale_price.to_string(),
            row.profit.to_string(),
            row.margin.to_string(),
            row.roi.to_string(),
            if row.loss { "  LOSS" } else { "" }
        );
    }
    Ok(())
}
