//! Catalog access shared by the command handlers.

use std::path::Path;

use sellerops_core::{AppConfig, Catalog, Product};

/// Load the catalog from `override_path`, falling back to the configured path.
pub(crate) fn open_catalog(
    config: &AppConfig,
    override_path: Option<&Path>,
) -> anyhow::Result<Catalog> {
    let path = override_path.unwrap_or(config.catalog_path.as_path());
    tracing::info!(path = %path.display(), "loading catalog");
    Ok(sellerops_core::load_catalog(path)?)
}

/// All products, or only the one matching `sku`.
///
/// # Errors
///
/// Returns an error if `sku` is given but not present in the catalog.
pub(crate) fn select_products<'a>(
    catalog: &'a Catalog,
    sku: Option<&str>,
) -> anyhow::Result<Vec<&'a Product>> {
    match sku {
        Some(sku) => {
            let product = catalog
                .find(sku)
                .ok_or_else(|| anyhow::anyhow!("sku '{sku}' not found in catalog"))?;
            Ok(vec![product])
        }
        None => Ok(catalog.products.iter().collect()),
    }
}
