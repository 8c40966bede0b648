//! Multi-channel sales profitability engine.
//!
//! Given a product's cost basis and a marketplace channel's fee structure,
//! computes profit, margin and ROI for a sale price, and solves for the sale
//! price that yields a target margin.

pub mod app_config;
pub mod calculator;
pub mod catalog;
pub mod channels;
pub mod config;
pub mod error;
pub mod money;
pub mod product;

pub use app_config::{AppConfig, Environment};
pub use calculator::{
    breakdown, calculate, calculate_all, price_for_margin, suggest_prices, ChannelInput,
    ChannelResult, CostBreakdown, PriceSuggestion, DEFAULT_MARGIN_PRESETS,
};
pub use catalog::{load_catalog, parse_catalog, validate_catalog, Catalog};
pub use channels::{
    defaults_for, BaseChannel, ChannelConfig, ChannelFields, ChannelMap, ChannelType,
    ChannelVariant,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError, PricingError};
pub use product::{CostBasis, Product};
