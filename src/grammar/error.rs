use thiserror::Error;

/// Errors raised while constructing an [`IdentifierGrammar`](super::IdentifierGrammar).
#[derive(Debug, Error)]
pub enum GrammarError {
    /// The identifier pattern failed to compile.
    #[error("invalid identifier pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern as supplied.
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The pattern can match the empty string, which would never advance tokenization.
    #[error("identifier pattern '{pattern}' matches the empty string")]
    MatchesEmpty {
        /// Pattern as supplied.
        pattern: String,
    },

    /// The domain name is not one of the built-in presets.
    #[error("unknown domain: {name}")]
    UnknownDomain {
        /// Name as supplied.
        name: String,
    },
}
