//! The external decision service consulted during retrieval.
//!
//! The oracle is usually an LLM behind a prompt template and a response parser; both live
//! outside this crate. What reaches the engine is already structured: identifier lists or a
//! raw label. Three capabilities are modelled as separate traits so a deployment can back them
//! with different prompts:
//!
//! - [`Oracle`]: proposes identifiers to expand and to keep during a beam round.
//! - [`FilterOracle`]: picks the relevant identifiers out of a candidate list.
//! - [`JudgeOracle`]: returns a label (permitted / prohibited / not applicable).
//! - [`IdentifierOracle`]: names identifiers for a scenario outright, without browsing.
//! - [`RelevanceOracle`]: answers yes or no for a single candidate line.
//!
//! Calls may fail transiently; see [`RetryingOracle`] and [`attempt`].

pub mod error;
pub mod mock;
pub mod retry;


pub use error::OracleError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{
    RecordedProposal, ScriptedFilterOracle, ScriptedIdentifierOracle, ScriptedJudgeOracle,
    ScriptedOracle, ScriptedRelevanceOracle,
};
pub use retry::{RetryingOracle, attempt};

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Input for one beam round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalRequest<'a> {
    /// The scenario being assessed.
    pub scenario: &'a str,
    /// Rendered candidate lines, `identifier - content` each.
    pub candidates: &'a str,
    /// How many identifiers the oracle may ask to expand.
    pub look_up_budget: usize,
    /// How many identifiers the oracle may select this round.
    pub selected_budget: usize,
}

/// The oracle's answer for one beam round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Identifiers whose children should be shown next round.
    pub look_up: Vec<String>,
    /// Identifiers judged relevant.
    pub selected: Vec<String>,
}

impl Proposal {
    pub fn new<L, S>(look_up: L, selected: S) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            look_up: look_up.into_iter().map(Into::into).collect(),
            selected: selected.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the oracle neither expanded nor selected anything.
    pub fn is_empty(&self) -> bool {
        self.look_up.is_empty() && self.selected.is_empty()
    }
}

/// Proposes identifiers to expand and to select during beam retrieval.
pub trait Oracle: Send + Sync {
    fn propose(
        &self,
        request: &ProposalRequest<'_>,
    ) -> impl Future<Output = Result<Proposal, OracleError>> + Send;
}

/// Filters a candidate list down to the identifiers relevant to a scenario.
pub trait FilterOracle: Send + Sync {
    fn filter(
        &self,
        scenario: &str,
        candidates: &str,
    ) -> impl Future<Output = Result<Vec<String>, OracleError>> + Send;
}

/// Produces a raw decision label for a scenario given reference regulations.
pub trait JudgeOracle: Send + Sync {
    fn judge(
        &self,
        scenario: &str,
        references: &str,
    ) -> impl Future<Output = Result<String, OracleError>> + Send;
}

/// Names up to `count` identifiers relevant to a scenario from memory of the corpus.
pub trait IdentifierOracle: Send + Sync {
    fn generate(
        &self,
        scenario: &str,
        count: usize,
    ) -> impl Future<Output = Result<Vec<String>, OracleError>> + Send;
}

/// Decides whether one candidate line applies to a scenario.
pub trait RelevanceOracle: Send + Sync {
    fn is_relevant(
        &self,
        scenario: &str,
        candidate: &str,
    ) -> impl Future<Output = Result<bool, OracleError>> + Send;
}

impl<T: Oracle> Oracle for std::sync::Arc<T> {
    fn propose(
        &self,
        request: &ProposalRequest<'_>,
    ) -> impl Future<Output = Result<Proposal, OracleError>> + Send {
        (**self).propose(request)
    }
}

impl<T: FilterOracle> FilterOracle for std::sync::Arc<T> {
    fn filter(
        &self,
        scenario: &str,
        candidates: &str,
    ) -> impl Future<Output = Result<Vec<String>, OracleError>> + Send {
        (**self).filter(scenario, candidates)
    }
}

impl<T: JudgeOracle> JudgeOracle for std::sync::Arc<T> {
    fn judge(
        &self,
        scenario: &str,
        references: &str,
    ) -> impl Future<Output = Result<String, OracleError>> + Send {
        (**self).judge(scenario, references)
    }
}

impl<T: Oracle> Oracle for &T {
    fn propose(
        &self,
        request: &ProposalRequest<'_>,
    ) -> impl Future<Output = Result<Proposal, OracleError>> + Send {
        (**self).propose(request)
    }
}

impl<T: FilterOracle> FilterOracle for &T {
    fn filter(
        &self,
        scenario: &str,
        candidates: &str,
    ) -> impl Future<Output = Result<Vec<String>, OracleError>> + Send {
        (**self).filter(scenario, candidates)
    }
}

impl<T: JudgeOracle> JudgeOracle for &T {
    fn judge(
        &self,
        scenario: &str,
        references: &str,
    ) -> impl Future<Output = Result<String, OracleError>> + Send {
        (**self).judge(scenario, references)
    }
}

impl<T: IdentifierOracle> IdentifierOracle for std::sync::Arc<T> {
    fn generate(
        &self,
        scenario: &str,
        count: usize,
    ) -> impl Future<Output = Result<Vec<String>, OracleError>> + Send {
        (**self).generate(scenario, count)
    }
}

impl<T: RelevanceOracle> RelevanceOracle for std::sync::Arc<T> {
    fn is_relevant(
        &self,
        scenario: &str,
        candidate: &str,
    ) -> impl Future<Output = Result<bool, OracleError>> + Send {
        (**self).is_relevant(scenario, candidate)
    }
}

impl<T: IdentifierOracle> IdentifierOracle for &T {
    fn generate(
        &self,
        scenario: &str,
        count: usize,
    ) -> impl Future<Output = Result<Vec<String>, OracleError>> + Send {
        (**self).generate(scenario, count)
    }
}

impl<T: RelevanceOracle> RelevanceOracle for &T {
    fn is_relevant(
        &self,
        scenario: &str,
        candidate: &str,
    ) -> impl Future<Output = Result<bool, OracleError>> + Send {
        (**self).is_relevant(scenario, candidate)
    }
}
