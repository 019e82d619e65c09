use thiserror::Error;

/// Failures reported by an oracle call.
///
/// None of these abort a retrieval session: callers retry within their budget and then treat
/// the round as empty.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleError {
    /// Temporary failure (timeout, rate limit, dropped connection). Worth retrying as is.
    #[error("transient oracle failure: {reason}")]
    Transient { reason: String },

    /// The oracle cannot serve requests (misconfigured, out of quota, script exhausted).
    #[error("oracle unavailable: {reason}")]
    Unavailable { reason: String },

    /// The oracle answered, but the answer could not be turned into identifiers or a label.
    #[error("malformed oracle response: {reason}")]
    Malformed { reason: String },
}

impl OracleError {
    pub fn transient(reason: impl Into<String>) -> Self {
        Self::Transient {
            reason: reason.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    /// Returns `true` if repeating the identical call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}
