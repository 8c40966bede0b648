use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::{calculate_all, ChannelResult};
use crate::channels::{ChannelMap, ChannelType};

/// Per-unit cost basis shared by every channel a product sells on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBasis {
    /// Unit acquisition (FOB) cost.
    pub cost_item: Decimal,
    /// Packaging cost per unit, charged on every channel.
    pub pack_cost: Decimal,
    /// Global tax rate, levied as a percentage of sale price.
    pub tax_percent: Decimal,
}

/// A catalog product with its cost basis and channel configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Product {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub cost_item: Decimal,
    #[serde(default)]
    pub pack_cost: Decimal,
    #[serde(default)]
    pub tax_percent: Decimal,
    #[serde(default)]
    pub channels: ChannelMap,
}

impl Product {
    #[must_use]
    pub fn cost_basis(&self) -> CostBasis {
        CostBasis {
            cost_item: self.cost_item,
            pack_cost: self.pack_cost,
            tax_percent: self.tax_percent,
        }
    }

    /// Results for every enabled channel of this product.
    #[must_use]
    pub fn channel_results(&self) -> BTreeMap<ChannelType, ChannelResult> {
        calculate_all(&self.cost_basis(), &self.channels)
    }
}
