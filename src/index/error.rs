use thiserror::Error;

use crate::grammar::GrammarError;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to parse corpus: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("invalid BM25 parameters: {reason}")]
    InvalidParams { reason: String },
}

pub type IndexResult<T> = Result<T, IndexError>;
