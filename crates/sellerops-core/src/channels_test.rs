use rust_decimal_macros::dec;

use super::*;

fn basis() -> CostBasis {
    CostBasis {
        cost_item: dec!(20),
        pack_cost: dec!(2),
        tax_percent: dec!(0),
    }
}

#[test]
fn default_commissions_follow_channel_family() {
    assert_eq!(ChannelType::SiteProprio.default_commission_pct(), dec!(0));
    assert_eq!(ChannelType::AmazonFba.default_commission_pct(), dec!(15));
    assert_eq!(ChannelType::AmazonDba.default_commission_pct(), dec!(15));
    assert_eq!(ChannelType::MercadoLivreFlex.default_commission_pct(), dec!(14));
    assert_eq!(ChannelType::MercadoLivreMe1.default_commission_pct(), dec!(14));
    assert_eq!(ChannelType::Shopee.default_commission_pct(), dec!(12));
    assert_eq!(ChannelType::MagaluFull.default_commission_pct(), dec!(16));
    assert_eq!(ChannelType::TiktokShop.default_commission_pct(), dec!(8));
    assert_eq!(ChannelType::MarketplaceOther.default_commission_pct(), dec!(10));
}

#[test]
fn defaults_are_disabled_and_zeroed() {
    for channel_type in ChannelType::ALL {
        let config = defaults_for(channel_type);
        assert_eq!(config.channel_type(), channel_type);
        assert!(!config.is_enabled());
        assert_eq!(config.base.sale_price, Decimal::ZERO);
        assert_eq!(config.base.fixed_fee, Decimal::ZERO);
        assert_eq!(
            config.base.commission_pct,
            channel_type.default_commission_pct()
        );
        assert!(config.variant.values().iter().all(|(_, v)| v.is_zero()));
    }
}

#[test]
fn defaults_are_fresh_values() {
    let mut first = defaults_for(ChannelType::Shopee);
    first.base.commission_pct = dec!(99);
    let second = defaults_for(ChannelType::Shopee);
    assert_eq!(second.base.commission_pct, dec!(12));
}

#[test]
fn fields_match_wiring_table() {
    let fba = ChannelType::AmazonFba.fields();
    assert!(fba.inbound_freight && fba.prep_center);
    assert!(!fba.outbound_freight && !fba.flex_revenue && !fba.gateway_pct);

    let flex = ChannelType::MercadoLivreFlex.fields();
    assert!(flex.outbound_freight && flex.flex_revenue);
    assert!(!flex.inbound_freight);

    assert_eq!(ChannelType::SiteProprio.fields().names(), vec!["gateway_pct"]);
    assert_eq!(ChannelType::MagaluFull.fields().names(), vec!["inbound_freight"]);
    assert!(ChannelType::MercadoLivreMe1.fields().names().is_empty());
    assert!(ChannelType::MarketplaceOther.fields().names().is_empty());
}

#[test]
fn variant_values_match_declared_fields() {
    for channel_type in ChannelType::ALL {
        let names: Vec<_> = ChannelVariant::zeroed(channel_type)
            .values()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, channel_type.fields().names(), "{channel_type}");
    }
}

#[test]
fn channel_type_parses_identifiers() {
    for channel_type in ChannelType::ALL {
        assert_eq!(
            channel_type.as_str().parse::<ChannelType>().unwrap(),
            channel_type
        );
    }
    assert_eq!(
        "Amazon-FBA".parse::<ChannelType>().unwrap(),
        ChannelType::AmazonFba
    );
}

#[test]
fn channel_type_rejects_unknown() {
    let err = "ebay".parse::<ChannelType>().unwrap_err();
    assert!(err.to_string().contains("ebay"));
}

#[test]
fn serde_names_match_as_str() {
    for channel_type in ChannelType::ALL {
        let json = serde_json::to_string(&channel_type).unwrap();
        assert_eq!(json, format!("\"{}\"", channel_type.as_str()));
    }
}

#[test]
fn amazon_fba_input_carries_inbound_and_prep() {
    let config = ChannelConfig {
        base: BaseChannel {
            enabled: true,
            sale_price: dec!(80),
            commission_pct: dec!(15),
            ads_pct: dec!(5),
            ..BaseChannel::default()
        },
        variant: ChannelVariant::AmazonFba {
            inbound_freight: dec!(3),
            prep_center: dec!(1),
        },
    };
    let input = config.to_input(&basis());
    assert_eq!(input.price, dec!(80));
    assert_eq!(input.cost_item, dec!(20));
    assert_eq!(input.pack_cost, dec!(2));
    assert_eq!(input.inbound_freight, dec!(3));
    assert_eq!(input.prep_center, dec!(1));
    assert_eq!(input.outbound_freight, Decimal::ZERO);
    assert_eq!(input.flex_revenue, Decimal::ZERO);
    assert_eq!(input.gateway_pct, Decimal::ZERO);
}

#[test]
fn flex_input_carries_rebate() {
    let config = ChannelConfig {
        base: BaseChannel::defaults_for(ChannelType::MercadoLivreFlex),
        variant: ChannelVariant::MercadoLivreFlex {
            outbound_freight: dec!(9),
            flex_revenue: dec!(4),
        },
    };
    let input = config.to_input(&basis());
    assert_eq!(input.outbound_freight, dec!(9));
    assert_eq!(input.flex_revenue, dec!(4));
    assert_eq!(input.inbound_freight, Decimal::ZERO);
}

#[test]
fn site_proprio_input_carries_gateway() {
    let config = ChannelConfig {
        base: BaseChannel::defaults_for(ChannelType::SiteProprio),
        variant: ChannelVariant::SiteProprio {
            gateway_pct: dec!(4.99),
        },
    };
    let input = config.to_input(&basis());
    assert_eq!(input.gateway_pct, dec!(4.99));
    assert_eq!(input.commission_pct, Decimal::ZERO);
}

#[test]
fn channel_config_deserializes_tagged_yaml() {
    let yaml = "
channel_type: mercado_livre_flex
enabled: true
sale_price: 10
flex_revenue: 4
";
    let config: ChannelConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.channel_type(), ChannelType::MercadoLivreFlex);
    assert!(config.is_enabled());
    assert_eq!(config.base.sale_price, dec!(10));
    assert_eq!(config.base.commission_pct, Decimal::ZERO);
    assert_eq!(
        config.variant,
        ChannelVariant::MercadoLivreFlex {
            outbound_freight: Decimal::ZERO,
            flex_revenue: dec!(4),
        }
    );
}

#[test]
fn channel_config_deserializes_fieldless_variant() {
    let yaml = "
channel_type: mercado_livre_me1
enabled: true
sale_price: 35.5
commission_pct: 14
";
    let config: ChannelConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.variant, ChannelVariant::MercadoLivreMe1);
    assert_eq!(config.base.sale_price, dec!(35.5));
}

#[test]
fn channel_map_keys_by_type_and_replaces() {
    let mut map = ChannelMap::new();
    assert!(map.insert(defaults_for(ChannelType::Shopee)).is_none());
    let mut updated = defaults_for(ChannelType::Shopee);
    updated.base.sale_price = dec!(50);
    assert!(map.insert(updated).is_some());
    assert_eq!(map.len(), 1);
    assert_eq!(
        map.get(ChannelType::Shopee).unwrap().base.sale_price,
        dec!(50)
    );
}

#[test]
fn channel_map_rejects_duplicate_types_from_list() {
    let err = ChannelMap::try_from(vec![
        defaults_for(ChannelType::AmazonFba),
        defaults_for(ChannelType::AmazonFba),
    ])
    .unwrap_err();
    assert!(matches!(err, CoreError::DuplicateChannel(ChannelType::AmazonFba)));
}

#[test]
fn channel_map_enabled_filters_disabled() {
    let mut enabled = defaults_for(ChannelType::AmazonFbm);
    enabled.base.enabled = true;
    let map: ChannelMap = [enabled, defaults_for(ChannelType::Shopee)]
        .into_iter()
        .collect();
    let types: Vec<_> = map.enabled().map(ChannelConfig::channel_type).collect();
    assert_eq!(types, vec![ChannelType::AmazonFbm]);
}

#[test]
fn config_keys_cover_base_and_applicable_fields() {
    let keys = ChannelType::Shopee.config_keys();
    assert!(keys.contains(&"channel_type"));
    assert!(keys.contains(&"commission_pct"));
    assert!(keys.contains(&"outbound_freight"));
    assert!(!keys.contains(&"inbound_freight"));
    assert_eq!(
        ChannelType::MercadoLivreMe1.config_keys().len(),
        1 + BaseChannel::FIELDS.len()
    );
}
