//! Channel fee model: which cost fields apply to each marketplace channel and
//! the defaults a channel starts with when it is first enabled.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::ChannelInput;
use crate::product::CostBasis;
use crate::CoreError;

/// Marketplace integration a product can be listed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    SiteProprio,
    AmazonFbm,
    AmazonFbaOnSite,
    AmazonDba,
    AmazonFba,
    MercadoLivreMe1,
    MercadoLivreFlex,
    MercadoLivreEnvios,
    MercadoLivreFull,
    Shopee,
    MagaluFull,
    MagaluEnvios,
    TiktokShop,
    MarketplaceOther,
}

impl ChannelType {
    pub const ALL: [ChannelType; 14] = [
        ChannelType::SiteProprio,
        ChannelType::AmazonFbm,
        ChannelType::AmazonFbaOnSite,
        ChannelType::AmazonDba,
        ChannelType::AmazonFba,
        ChannelType::MercadoLivreMe1,
        ChannelType::MercadoLivreFlex,
        ChannelType::MercadoLivreEnvios,
        ChannelType::MercadoLivreFull,
        ChannelType::Shopee,
        ChannelType::MagaluFull,
        ChannelType::MagaluEnvios,
        ChannelType::TiktokShop,
        ChannelType::MarketplaceOther,
    ];

    /// Stable identifier used in catalog files and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelType::SiteProprio => "site_proprio",
            ChannelType::AmazonFbm => "amazon_fbm",
            ChannelType::AmazonFbaOnSite => "amazon_fba_on_site",
            ChannelType::AmazonDba => "amazon_dba",
            ChannelType::AmazonFba => "amazon_fba",
            ChannelType::MercadoLivreMe1 => "mercado_livre_me1",
            ChannelType::MercadoLivreFlex => "mercado_livre_flex",
            ChannelType::MercadoLivreEnvios => "mercado_livre_envios",
            ChannelType::MercadoLivreFull => "mercado_livre_full",
            ChannelType::Shopee => "shopee",
            ChannelType::MagaluFull => "magalu_full",
            ChannelType::MagaluEnvios => "magalu_envios",
            ChannelType::TiktokShop => "tiktok_shop",
            ChannelType::MarketplaceOther => "marketplace_other",
        }
    }

    /// Human-readable channel name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ChannelType::SiteProprio => "Site Próprio",
            ChannelType::AmazonFbm => "Amazon FBM",
            ChannelType::AmazonFbaOnSite => "Amazon FBA On-Site",
            ChannelType::AmazonDba => "Amazon DBA",
            ChannelType::AmazonFba => "Amazon FBA",
            ChannelType::MercadoLivreMe1 => "Mercado Livre ME1",
            ChannelType::MercadoLivreFlex => "Mercado Livre Flex",
            ChannelType::MercadoLivreEnvios => "Mercado Livre Envios",
            ChannelType::MercadoLivreFull => "Mercado Livre Full",
            ChannelType::Shopee => "Shopee",
            ChannelType::MagaluFull => "Magalu Full",
            ChannelType::MagaluEnvios => "Magalu Envios",
            ChannelType::TiktokShop => "TikTok Shop",
            ChannelType::MarketplaceOther => "Marketplace Other",
        }
    }

    /// Commission percentage a freshly enabled channel starts with.
    #[must_use]
    pub fn default_commission_pct(self) -> Decimal {
        let pct: i64 = match self {
            ChannelType::SiteProprio => 0,
            ChannelType::AmazonFbm
            | ChannelType::AmazonFbaOnSite
            | ChannelType::AmazonDba
            | ChannelType::AmazonFba => 15,
            ChannelType::MercadoLivreMe1
            | ChannelType::MercadoLivreFlex
            | ChannelType::MercadoLivreEnvios
            | ChannelType::MercadoLivreFull => 14,
            ChannelType::Shopee => 12,
            ChannelType::MagaluFull | ChannelType::MagaluEnvios => 16,
            ChannelType::TiktokShop => 8,
            ChannelType::MarketplaceOther => 10,
        };
        Decimal::from(pct)
    }

    /// Every key a catalog entry for this channel type may set, including the
    /// `channel_type` tag itself.
    #[must_use]
    pub fn config_keys(self) -> Vec<&'static str> {
        let mut keys = vec!["channel_type"];
        keys.extend(BaseChannel::FIELDS);
        keys.extend(self.fields().names());
        keys
    }

    /// Which optional cost fields are meaningful for this channel type.
    #[must_use]
    pub fn fields(self) -> ChannelFields {
        let none = ChannelFields::default();
        match self {
            ChannelType::SiteProprio => ChannelFields {
                gateway_pct: true,
                ..none
            },
            ChannelType::AmazonFbm
            | ChannelType::AmazonFbaOnSite
            | ChannelType::AmazonDba
            | ChannelType::MercadoLivreEnvios
            | ChannelType::Shopee
            | ChannelType::MagaluEnvios
            | ChannelType::TiktokShop => ChannelFields {
                outbound_freight: true,
                ..none
            },
            ChannelType::AmazonFba | ChannelType::MercadoLivreFull => ChannelFields {
                inbound_freight: true,
                prep_center: true,
                ..none
            },
            ChannelType::MercadoLivreFlex => ChannelFields {
                outbound_freight: true,
                flex_revenue: true,
                ..none
            },
            ChannelType::MagaluFull => ChannelFields {
                inbound_freight: true,
                ..none
            },
            ChannelType::MercadoLivreMe1 | ChannelType::MarketplaceOther => none,
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        ChannelType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| CoreError::UnknownChannelType(s.to_string()))
    }
}

/// Applicability of the channel-specific optional fields.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelFields {
    pub inbound_freight: bool,
    pub outbound_freight: bool,
    pub prep_center: bool,
    pub flex_revenue: bool,
    pub gateway_pct: bool,
}

impl ChannelFields {
    /// Names of the applicable fields, in catalog-file spelling.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        [
            (self.inbound_freight, "inbound_freight"),
            (self.outbound_freight, "outbound_freight"),
            (self.prep_center, "prep_center"),
            (self.flex_revenue, "flex_revenue"),
            (self.gateway_pct, "gateway_pct"),
        ]
        .into_iter()
        .filter_map(|(applies, name)| applies.then_some(name))
        .collect()
    }
}

/// Fields every channel carries regardless of type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseChannel {
    pub enabled: bool,
    pub sale_price: Decimal,
    pub commission_pct: Decimal,
    pub ads_pct: Decimal,
    pub other_pct: Decimal,
    pub fixed_fee: Decimal,
    pub other_value: Decimal,
}

impl BaseChannel {
    /// Field names in catalog-file spelling.
    pub const FIELDS: [&'static str; 7] = [
        "enabled",
        "sale_price",
        "commission_pct",
        "ads_pct",
        "other_pct",
        "fixed_fee",
        "other_value",
    ];

    /// Disabled, zero-priced, with the channel's default commission.
    #[must_use]
    pub fn defaults_for(channel_type: ChannelType) -> Self {
        Self {
            commission_pct: channel_type.default_commission_pct(),
            ..Self::default()
        }
    }
}

/// Channel-specific fields, one variant per [`ChannelType`]. A variant only
/// carries the fields that apply to its channel, so a channel can never read
/// a cost that does not exist for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel_type", rename_all = "snake_case")]
pub enum ChannelVariant {
    SiteProprio {
        #[serde(default)]
        gateway_pct: Decimal,
    },
    AmazonFbm {
        #[serde(default)]
        outbound_freight: Decimal,
    },
    AmazonFbaOnSite {
        #[serde(default)]
        outbound_freight: Decimal,
    },
    AmazonDba {
        #[serde(default)]
        outbound_freight: Decimal,
    },
    AmazonFba {
        #[serde(default)]
        inbound_freight: Decimal,
        #[serde(default)]
        prep_center: Decimal,
    },
    MercadoLivreMe1,
    MercadoLivreFlex {
        #[serde(default)]
        outbound_freight: Decimal,
        #[serde(default)]
        flex_revenue: Decimal,
    },
    MercadoLivreEnvios {
        #[serde(default)]
        outbound_freight: Decimal,
    },
    MercadoLivreFull {
        #[serde(default)]
        inbound_freight: Decimal,
        #[serde(default)]
        prep_center: Decimal,
    },
    Shopee {
        #[serde(default)]
        outbound_freight: Decimal,
    },
    MagaluFull {
        #[serde(default)]
        inbound_freight: Decimal,
    },
    MagaluEnvios {
        #[serde(default)]
        outbound_freight: Decimal,
    },
    TiktokShop {
        #[serde(default)]
        outbound_freight: Decimal,
    },
    MarketplaceOther,
}

/// Channel-specific costs projected onto the full field set; fields that do
/// not apply are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Logistics {
    inbound_freight: Decimal,
    outbound_freight: Decimal,
    prep_center: Decimal,
    flex_revenue: Decimal,
    gateway_pct: Decimal,
}

impl ChannelVariant {
    /// All channel-specific fields zeroed.
    #[must_use]
    pub fn zeroed(channel_type: ChannelType) -> Self {
        let z = Decimal::ZERO;
        match channel_type {
            ChannelType::SiteProprio => ChannelVariant::SiteProprio { gateway_pct: z },
            ChannelType::AmazonFbm => ChannelVariant::AmazonFbm { outbound_freight: z },
            ChannelType::AmazonFbaOnSite => ChannelVariant::AmazonFbaOnSite { outbound_freight: z },
            ChannelType::AmazonDba => ChannelVariant::AmazonDba { outbound_freight: z },
            ChannelType::AmazonFba => ChannelVariant::AmazonFba {
                inbound_freight: z,
                prep_center: z,
            },
            ChannelType::MercadoLivreMe1 => ChannelVariant::MercadoLivreMe1,
            ChannelType::MercadoLivreFlex => ChannelVariant::MercadoLivreFlex {
                outbound_freight: z,
                flex_revenue: z,
            },
            ChannelType::MercadoLivreEnvios => {
                ChannelVariant::MercadoLivreEnvios { outbound_freight: z }
            }
            ChannelType::MercadoLivreFull => ChannelVariant::MercadoLivreFull {
                inbound_freight: z,
                prep_center: z,
            },
            ChannelType::Shopee => ChannelVariant::Shopee { outbound_freight: z },
            ChannelType::MagaluFull => ChannelVariant::MagaluFull { inbound_freight: z },
            ChannelType::MagaluEnvios => ChannelVariant::MagaluEnvios { outbound_freight: z },
            ChannelType::TiktokShop => ChannelVariant::TiktokShop { outbound_freight: z },
            ChannelType::MarketplaceOther => ChannelVariant::MarketplaceOther,
        }
    }

    #[must_use]
    pub fn channel_type(&self) -> ChannelType {
        match self {
            ChannelVariant::SiteProprio { .. } => ChannelType::SiteProprio,
            ChannelVariant::AmazonFbm { .. } => ChannelType::AmazonFbm,
            ChannelVariant::AmazonFbaOnSite { .. } => ChannelType::AmazonFbaOnSite,
            ChannelVariant::AmazonDba { .. } => ChannelType::AmazonDba,
            ChannelVariant::AmazonFba { .. } => ChannelType::AmazonFba,
            ChannelVariant::MercadoLivreMe1 => ChannelType::MercadoLivreMe1,
            ChannelVariant::MercadoLivreFlex { .. } => ChannelType::MercadoLivreFlex,
            ChannelVariant::MercadoLivreEnvios { .. } => ChannelType::MercadoLivreEnvios,
            ChannelVariant::MercadoLivreFull { .. } => ChannelType::MercadoLivreFull,
            ChannelVariant::Shopee { .. } => ChannelType::Shopee,
            ChannelVariant::MagaluFull { .. } => ChannelType::MagaluFull,
            ChannelVariant::MagaluEnvios { .. } => ChannelType::MagaluEnvios,
            ChannelVariant::TiktokShop { .. } => ChannelType::TiktokShop,
            ChannelVariant::MarketplaceOther => ChannelType::MarketplaceOther,
        }
    }

    fn logistics(&self) -> Logistics {
        let none = Logistics::default();
        match self {
            ChannelVariant::SiteProprio { gateway_pct } => Logistics {
                gateway_pct: *gateway_pct,
                ..none
            },
            ChannelVariant::AmazonFbm { outbound_freight }
            | ChannelVariant::AmazonFbaOnSite { outbound_freight }
            | ChannelVariant::AmazonDba { outbound_freight }
            | ChannelVariant::MercadoLivreEnvios { outbound_freight }
            | ChannelVariant::Shopee { outbound_freight }
            | ChannelVariant::MagaluEnvios { outbound_freight }
            | ChannelVariant::TiktokShop { outbound_freight } => Logistics {
                outbound_freight: *outbound_freight,
                ..none
            },
            ChannelVariant::AmazonFba {
                inbound_freight,
                prep_center,
            }
            | ChannelVariant::MercadoLivreFull {
                inbound_freight,
                prep_center,
            } => Logistics {
                inbound_freight: *inbound_freight,
                prep_center: *prep_center,
                ..none
            },
            ChannelVariant::MercadoLivreFlex {
                outbound_freight,
                flex_revenue,
            } => Logistics {
                outbound_freight: *outbound_freight,
                flex_revenue: *flex_revenue,
                ..none
            },
            ChannelVariant::MagaluFull { inbound_freight } => Logistics {
                inbound_freight: *inbound_freight,
                ..none
            },
            ChannelVariant::MercadoLivreMe1 | ChannelVariant::MarketplaceOther => none,
        }
    }

    /// `(field name, value)` for every channel-specific field this variant carries.
    #[must_use]
    pub fn values(&self) -> Vec<(&'static str, Decimal)> {
        let l = self.logistics();
        let fields = self.channel_type().fields();
        [
            (fields.inbound_freight, "inbound_freight", l.inbound_freight),
            (fields.outbound_freight, "outbound_freight", l.outbound_freight),
            (fields.prep_center, "prep_center", l.prep_center),
            (fields.flex_revenue, "flex_revenue", l.flex_revenue),
            (fields.gateway_pct, "gateway_pct", l.gateway_pct),
        ]
        .into_iter()
        .filter_map(|(applies, name, value)| applies.then_some((name, value)))
        .collect()
    }
}

/// A product's configuration for one sales channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(flatten)]
    pub base: BaseChannel,
    #[serde(flatten)]
    pub variant: ChannelVariant,
}

impl ChannelConfig {
    #[must_use]
    pub fn channel_type(&self) -> ChannelType {
        self.variant.channel_type()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.base.enabled
    }

    /// Merge the product cost basis with this channel's fields into the
    /// channel-agnostic calculator input.
    #[must_use]
    pub fn to_input(&self, basis: &CostBasis) -> ChannelInput {
        let l = self.variant.logistics();
        ChannelInput {
            price: self.base.sale_price,
            cost_item: basis.cost_item,
            pack_cost: basis.pack_cost,
            commission_pct: self.base.commission_pct,
            ads_pct: self.base.ads_pct,
            other_pct: self.base.other_pct,
            gateway_pct: l.gateway_pct,
            fixed_fee: self.base.fixed_fee,
            other_value: self.base.other_value,
            inbound_freight: l.inbound_freight,
            outbound_freight: l.outbound_freight,
            prep_center: l.prep_center,
            flex_revenue: l.flex_revenue,
        }
    }
}

/// Fresh defaults for a channel: disabled, default commission, every money
/// field zero. Returns a new value on every call.
#[must_use]
pub fn defaults_for(channel_type: ChannelType) -> ChannelConfig {
    ChannelConfig {
        base: BaseChannel::defaults_for(channel_type),
        variant: ChannelVariant::zeroed(channel_type),
    }
}

/// A product's channel configurations, at most one per [`ChannelType`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChannelConfig>", into = "Vec<ChannelConfig>")]
pub struct ChannelMap(BTreeMap<ChannelType, ChannelConfig>);

impl ChannelMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a configuration keyed by its own channel type, returning the
    /// configuration it replaced, if any.
    pub fn insert(&mut self, config: ChannelConfig) -> Option<ChannelConfig> {
        self.0.insert(config.channel_type(), config)
    }

    #[must_use]
    pub fn get(&self, channel_type: ChannelType) -> Option<&ChannelConfig> {
        self.0.get(&channel_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelConfig> {
        self.0.values()
    }

    /// Only the channels with `enabled = true`.
    pub fn enabled(&self) -> impl Iterator<Item = &ChannelConfig> {
        self.0.values().filter(|c| c.is_enabled())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<ChannelConfig>> for ChannelMap {
    type Error = CoreError;

    fn try_from(configs: Vec<ChannelConfig>) -> Result<Self, Self::Error> {
        let mut map = ChannelMap::new();
        for config in configs {
            let channel_type = config.channel_type();
            if map.insert(config).is_some() {
                return Err(CoreError::DuplicateChannel(channel_type));
            }
        }
        Ok(map)
    }
}

impl From<ChannelMap> for Vec<ChannelConfig> {
    fn from(map: ChannelMap) -> Self {
        map.0.into_values().collect()
    }
}

impl FromIterator<ChannelConfig> for ChannelMap {
    fn from_iter<I: IntoIterator<Item = ChannelConfig>>(iter: I) -> Self {
        let mut map = ChannelMap::new();
        for config in iter {
            map.insert(config);
        }
        map
    }
}

#[cfg(test)]
#[path = "channels_test.rs"]
mod tests;
