use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::channels::{ChannelConfig, ChannelType};
use crate::product::Product;
use crate::ConfigError;

/// Products loaded from a catalog YAML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    /// Look up a product by SKU, ignoring case.
    #[must_use]
    pub fn find(&self, sku: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.sku.eq_ignore_ascii_case(sku))
    }
}

/// Load and validate a product catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog = parse_catalog(&content)?;
    tracing::debug!(
        path = %path.display(),
        products = catalog.products.len(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Parse and validate catalog YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_catalog(content: &str) -> Result<Catalog, ConfigError> {
    let raw: Value = serde_yaml::from_str(content)?;
    check_channel_keys(&raw)?;
    let catalog: Catalog = serde_yaml::from_value(raw)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Reject channel entries that set a key their channel type does not have,
/// whether misspelled or a cost that does not apply to that channel.
///
/// Channel configs flatten their fields, so serde alone drops unknown keys.
/// Entries whose shape or `channel_type` is invalid are left for the typed
/// parse to report.
fn check_channel_keys(raw: &Value) -> Result<(), ConfigError> {
    let Some(products) = raw.get("products").and_then(Value::as_sequence) else {
        return Ok(());
    };

    for product in products {
        let sku = product.get("sku").and_then(Value::as_str).unwrap_or("?");
        let Some(channels) = product.get("channels").and_then(Value::as_sequence) else {
            continue;
        };

        for channel in channels {
            let Some(entries) = channel.as_mapping() else {
                continue;
            };
            let Some(channel_type) = channel
                .get("channel_type")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<ChannelType>().ok())
            else {
                continue;
            };

            let allowed = channel_type.config_keys();
            for key in entries.keys() {
                let name = key.as_str().unwrap_or("<non-string key>");
                if !allowed.contains(&name) {
                    return Err(ConfigError::Validation(format!(
                        "product '{sku}' channel '{channel_type}' has unsupported field '{name}' \
                         (allowed: {})",
                        allowed[1..].join(", ")
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Reject values the calculator assumes never reach it: blank or duplicate
/// SKUs and negative money or percentage fields.
///
/// # Errors
///
/// Returns `ConfigError::Validation` describing the first offending value.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    let mut seen_skus = HashSet::new();

    for product in &catalog.products {
        if product.sku.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "product '{}' has an empty sku",
                product.name
            )));
        }

        if !seen_skus.insert(product.sku.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate sku: '{}'",
                product.sku
            )));
        }

        for (field, value) in [
            ("cost_item", product.cost_item),
            ("pack_cost", product.pack_cost),
            ("tax_percent", product.tax_percent),
        ] {
            ensure_non_negative(&product.sku, None, field, value)?;
        }

        for channel in product.channels.iter() {
            validate_channel(&product.sku, channel)?;
        }
    }

    Ok(())
}

fn validate_channel(sku: &str, channel: &ChannelConfig) -> Result<(), ConfigError> {
    let base = &channel.base;
    let common = [
        ("sale_price", base.sale_price),
        ("commission_pct", base.commission_pct),
        ("ads_pct", base.ads_pct),
        ("other_pct", base.other_pct),
        ("fixed_fee", base.fixed_fee),
        ("other_value", base.other_value),
    ];

    for (field, value) in common.into_iter().chain(channel.variant.values()) {
        ensure_non_negative(sku, Some(channel), field, value)?;
    }
    Ok(())
}

fn ensure_non_negative(
    sku: &str,
    channel: Option<&ChannelConfig>,
    field: &str,
    value: Decimal,
) -> Result<(), ConfigError> {
    if value >= Decimal::ZERO {
        return Ok(());
    }
    let location = match channel {
        Some(c) => format!("product '{sku}' channel '{}'", c.channel_type()),
        None => format!("product '{sku}'"),
    };
    Err(ConfigError::Validation(format!(
        "{location} has negative {field} {value}"
    )))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
