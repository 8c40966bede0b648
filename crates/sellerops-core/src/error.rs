use rust_decimal::Decimal;
use thiserror::Error;

use crate::channels::ChannelType;

/// The one failure the calculator reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Percentage fees plus the target margin reach 100% or more, so no
    /// finite positive price achieves the margin.
    #[error("margin unreachable: percentage fees plus target margin total {percent_sum}% (must be below 100%)")]
    UnreachableMargin { percent_sum: Decimal },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown channel type: {0}")]
    UnknownChannelType(String),

    #[error("duplicate channel type: {0}")]
    DuplicateChannel(ChannelType),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file '{path}': {source}")]
    CatalogFileIo {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
