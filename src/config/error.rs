//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An integer setting could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    InvalidInteger {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A floating-point setting could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    InvalidFloat {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// The domain name is not one of the known presets.
    #[error("unknown domain '{value}' (expected hipaa, gdpr, ai_act or combined)")]
    UnknownDomain { value: String },

    /// Values parsed but do not form a usable configuration.
    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}
