use rust_decimal_macros::dec;

use super::*;
use crate::channels::ChannelType;

const TWO_PRODUCTS: &str = "
products:
  - sku: A-1
    name: Alpha
    cost_item: 20
    pack_cost: 2
    channels:
      - channel_type: amazon_fba
        enabled: true
        sale_price: 80
        commission_pct: 15
        ads_pct: 5
        inbound_freight: 3
        prep_center: 1
      - channel_type: shopee
        enabled: false
        sale_price: 50
  - sku: B-2
    name: Beta
    cost_item: 10
";

#[test]
fn parse_catalog_reads_products_and_channels() {
    let catalog = parse_catalog(TWO_PRODUCTS).unwrap();
    assert_eq!(catalog.products.len(), 2);

    let alpha = catalog.find("a-1").expect("sku lookup ignores case");
    assert_eq!(alpha.channels.len(), 2);
    assert_eq!(alpha.tax_percent, Decimal::ZERO);

    let results = alpha.channel_results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[&ChannelType::AmazonFba].profit, dec!(38));

    let beta = catalog.find("B-2").unwrap();
    assert!(beta.channels.is_empty());
    assert!(beta.channel_results().is_empty());
}

#[test]
fn parse_catalog_rejects_duplicate_channel_type() {
    let yaml = "
products:
  - sku: A-1
    name: Alpha
    channels:
      - channel_type: shopee
      - channel_type: shopee
";
    let err = parse_catalog(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::CatalogFileParse(_)));
    assert!(err.to_string().contains("duplicate channel type"));
}

#[test]
fn parse_catalog_rejects_unknown_channel_type() {
    let yaml = "
products:
  - sku: A-1
    name: Alpha
    channels:
      - channel_type: ebay
";
    assert!(matches!(
        parse_catalog(yaml),
        Err(ConfigError::CatalogFileParse(_))
    ));
}

#[test]
fn parse_catalog_rejects_field_not_applicable_to_channel() {
    let yaml = "
products:
  - sku: A-1
    name: Alpha
    cost_item: 10
    channels:
      - channel_type: shopee
        enabled: true
        sale_price: 50
        inbound_freight: 30
";
    let err = parse_catalog(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    let msg = err.to_string();
    assert!(msg.contains("shopee"), "{msg}");
    assert!(msg.contains("inbound_freight"), "{msg}");
}

#[test]
fn parse_catalog_rejects_misspelled_channel_field() {
    let yaml = "
products:
  - sku: A-1
    name: Alpha
    channels:
      - channel_type: shopee
        enabled: true
        sale_price: 50
        comission_pct: 12
";
    let err = parse_catalog(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("comission_pct"));
}

#[test]
fn parse_catalog_accepts_every_declared_channel_field() {
    let yaml = "
products:
  - sku: A-1
    name: Alpha
    channels:
      - channel_type: mercado_livre_flex
        enabled: true
        sale_price: 40
        commission_pct: 14
        ads_pct: 1
        other_pct: 1
        fixed_fee: 5
        other_value: 1
        outbound_freight: 9
        flex_revenue: 4
";
    let catalog = parse_catalog(yaml).unwrap();
    let channel = catalog.products[0]
        .channels
        .get(ChannelType::MercadoLivreFlex)
        .unwrap();
    assert_eq!(channel.base.fixed_fee, dec!(5));
}

#[test]
fn parse_catalog_rejects_misspelled_product_field() {
    let yaml = "
products:
  - sku: A-1
    name: Alpha
    cost_iten: 10
";
    assert!(matches!(
        parse_catalog(yaml),
        Err(ConfigError::CatalogFileParse(_))
    ));
}

#[test]
fn validate_rejects_empty_sku() {
    let yaml = "
products:
  - sku: '  '
    name: Nameless
";
    let err = parse_catalog(yaml).unwrap_err();
    assert!(err.to_string().contains("empty sku"));
}

#[test]
fn validate_rejects_duplicate_sku() {
    let yaml = "
products:
  - sku: A-1
    name: Alpha
  - sku: a-1
    name: Alpha again
";
    let err = parse_catalog(yaml).unwrap_err();
    assert!(err.to_string().contains("duplicate sku"));
}

#[test]
fn validate_rejects_negative_cost_basis() {
    let yaml = "
products:
  - sku: A-1
    name: Alpha
    pack_cost: -1
";
    let err = parse_catalog(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("negative pack_cost"));
}

#[test]
fn validate_rejects_negative_channel_field() {
    let yaml = "
products:
  - sku: A-1
    name: Alpha
    channels:
      - channel_type: mercado_livre_flex
        flex_revenue: -4
";
    let err = parse_catalog(yaml).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("mercado_livre_flex"), "{msg}");
    assert!(msg.contains("negative flex_revenue"), "{msg}");
}

#[test]
fn validate_rejects_negative_sale_price() {
    let yaml = "
products:
  - sku: A-1
    name: Alpha
    channels:
      - channel_type: tiktok_shop
        sale_price: -10
";
    let err = parse_catalog(yaml).unwrap_err();
    assert!(err.to_string().contains("negative sale_price"));
}

#[test]
fn load_catalog_missing_file_is_io_error() {
    let err = load_catalog(Path::new("/nonexistent/catalog.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::CatalogFileIo { .. }));
}

#[test]
fn load_catalog_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("catalog.yaml");
    assert!(
        path.exists(),
        "catalog.yaml missing at {path:?}, required for this test"
    );
    let result = load_catalog(&path);
    assert!(result.is_ok(), "failed to load catalog.yaml: {result:?}");
    let catalog = result.unwrap();
    assert!(!catalog.products.is_empty());

    let garrafa = catalog.find("GARRAFA-750-INOX").unwrap();
    let results = garrafa.channel_results();
    assert!(!results.contains_key(&ChannelType::Shopee));
    assert_eq!(results[&ChannelType::AmazonFba].margin, dec!(47.5));
}
