//! Deterministic oracles that replay scripted answers.

#![cfg(any(test, feature = "mock"))]

use std::collections::VecDeque;
use std::sync::Mutex;

use super::error::OracleError;
use super::{
    FilterOracle, IdentifierOracle, JudgeOracle, Oracle, Proposal, ProposalRequest,
    RelevanceOracle,
};

/// A request observed by [`ScriptedOracle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedProposal {
    pub scenario: String,
    pub candidates: String,
    pub look_up_budget: usize,
    pub selected_budget: usize,
}

impl RecordedProposal {
    /// Candidate lines as sent to the oracle, trimmed.
    pub fn candidate_lines(&self) -> Vec<&str> {
        self.candidates
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}

/// FIFO of scripted outcomes; an exhausted script reports the oracle as unavailable.
#[derive(Debug)]
struct Script<T> {
    outcomes: Mutex<VecDeque<Result<T, OracleError>>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
        }
    }
}

impl<T> Script<T> {
    fn push(&self, outcome: Result<T, OracleError>) {
        self.outcomes
            .lock()
            .expect("lock poisoned")
            .push_back(outcome);
    }

    fn next(&self) -> Result<T, OracleError> {
        self.outcomes
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(OracleError::unavailable("script exhausted")))
    }

    fn remaining(&self) -> usize {
        self.outcomes.lock().expect("lock poisoned").len()
    }
}

/// Beam oracle replaying scripted proposals and recording every request.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    script: Script<Proposal>,
    requests: Mutex<Vec<RecordedProposal>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful answer.
    pub fn then_propose<L, S>(self, look_up: L, selected: S) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        self.script.push(Ok(Proposal::new(look_up, selected)));
        self
    }

    /// Queues a failure.
    pub fn then_fail(self, error: OracleError) -> Self {
        self.script.push(Err(error));
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedProposal> {
        self.requests.lock().expect("lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("lock poisoned").len()
    }

    pub fn remaining(&self) -> usize {
        self.script.remaining()
    }
}

impl Oracle for ScriptedOracle {
    async fn propose(&self, request: &ProposalRequest<'_>) -> Result<Proposal, OracleError> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push(RecordedProposal {
                scenario: request.scenario.to_string(),
                candidates: request.candidates.to_string(),
                look_up_budget: request.look_up_budget,
                selected_budget: request.selected_budget,
            });
        self.script.next()
    }
}

/// Filter oracle replaying scripted identifier lists.
#[derive(Debug, Default)]
pub struct ScriptedFilterOracle {
    script: Script<Vec<String>>,
    candidates_seen: Mutex<Vec<String>>,
}

impl ScriptedFilterOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_keep<I>(self, identifiers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.script
            .push(Ok(identifiers.into_iter().map(Into::into).collect()));
        self
    }

    pub fn then_fail(self, error: OracleError) -> Self {
        self.script.push(Err(error));
        self
    }

    /// Candidate texts received so far.
    pub fn candidates_seen(&self) -> Vec<String> {
        self.candidates_seen.lock().expect("lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.candidates_seen.lock().expect("lock poisoned").len()
    }
}

impl FilterOracle for ScriptedFilterOracle {
    async fn filter(&self, _scenario: &str, candidates: &str) -> Result<Vec<String>, OracleError> {
        self.candidates_seen
            .lock()
            .expect("lock poisoned")
            .push(candidates.to_string());
        self.script.next()
    }
}

/// Judge oracle replaying scripted labels.
#[derive(Debug, Default)]
pub struct ScriptedJudgeOracle {
    script: Script<String>,
    references_seen: Mutex<Vec<String>>,
}

impl ScriptedJudgeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_label(self, label: impl Into<String>) -> Self {
        self.script.push(Ok(label.into()));
        self
    }

    pub fn then_fail(self, error: OracleError) -> Self {
        self.script.push(Err(error));
        self
    }

    /// Reference texts received so far.
    pub fn references_seen(&self) -> Vec<String> {
        self.references_seen.lock().expect("lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.references_seen.lock().expect("lock poisoned").len()
    }
}

impl JudgeOracle for ScriptedJudgeOracle {
    async fn judge(&self, _scenario: &str, references: &str) -> Result<String, OracleError> {
        self.references_seen
            .lock()
            .expect("lock poisoned")
            .push(references.to_string());
        self.script.next()
    }
}

/// Identifier generator replaying scripted lists and recording requested counts.
#[derive(Debug, Default)]
pub struct ScriptedIdentifierOracle {
    script: Script<Vec<String>>,
    counts_seen: Mutex<Vec<usize>>,
}

impl ScriptedIdentifierOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_generate<I>(self, identifiers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.script
            .push(Ok(identifiers.into_iter().map(Into::into).collect()));
        self
    }

    pub fn then_fail(self, error: OracleError) -> Self {
        self.script.push(Err(error));
        self
    }

    /// The `count` argument of every call so far.
    pub fn counts_seen(&self) -> Vec<usize> {
        self.counts_seen.lock().expect("lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.counts_seen.lock().expect("lock poisoned").len()
    }
}

impl IdentifierOracle for ScriptedIdentifierOracle {
    async fn generate(&self, _scenario: &str, count: usize) -> Result<Vec<String>, OracleError> {
        self.counts_seen.lock().expect("lock poisoned").push(count);
        self.script.next()
    }
}

/// Relevance oracle replaying scripted yes/no answers.
#[derive(Debug, Default)]
pub struct ScriptedRelevanceOracle {
    script: Script<bool>,
    candidates_seen: Mutex<Vec<String>>,
}

impl ScriptedRelevanceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_answer(self, relevant: bool) -> Self {
        self.script.push(Ok(relevant));
        self
    }

    pub fn then_fail(self, error: OracleError) -> Self {
        self.script.push(Err(error));
        self
    }

    /// Candidate lines asked about so far.
    pub fn candidates_seen(&self) -> Vec<String> {
        self.candidates_seen.lock().expect("lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.candidates_seen.lock().expect("lock poisoned").len()
    }
}

impl RelevanceOracle for ScriptedRelevanceOracle {
    async fn is_relevant(&self, _scenario: &str, candidate: &str) -> Result<bool, OracleError> {
        self.candidates_seen
            .lock()
            .expect("lock poisoned")
            .push(candidate.to_string());
        self.script.next()
    }
}
