//! Lexbeam library crate: retrieval of relevant regulations for a scenario.
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Indexing
//! - [`IdentifierGrammar`], [`Domain`] - Hierarchical identifier recognition
//! - [`RegulationTrie`], [`RegulationNode`] - Prefix index over numbered text
//! - [`Bm25Ranker`], [`Bm25Params`] - Lexical ranking
//! - [`RegulationIndex`], [`CorpusRecord`] - Corpus ingestion combining both
//!
//! ## Retrieval
//! - [`Oracle`], [`FilterOracle`], [`JudgeOracle`], [`IdentifierOracle`], [`RelevanceOracle`] -
//!   External decision capabilities
//! - [`RetryingOracle`] - Transient-failure retries at the oracle boundary
//! - [`BeamSearcher`], [`BeamConfig`], [`PoolPolicy`] - Oracle-driven narrowing
//! - [`ConsensusAggregator`], [`Quorum`], [`Verdict`] - Majority-vote aggregation
//! - [`RetrievalPipeline`], [`PipelineReport`] - Collection, filtering and judgment
//!
//! ## Configuration
//! - [`EngineConfig`], [`ConfigError`] - `LEXBEAM_*` environment settings
//!
//! ## Test/Mock Support
//! Scripted oracles are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod beam;
pub mod bm25;
pub mod config;
pub mod consensus;
pub mod constants;
pub mod grammar;
pub mod index;
pub mod oracle;
pub mod pipeline;
pub mod trie;

pub use beam::{
    BeamConfig, BeamOutcome, BeamSearcher, FixedPool, GrowingPool, PoolPolicy, PoolSizes,
    Termination,
};
pub use bm25::{Bm25Params, Bm25Ranker, Document};
pub use config::{ConfigError, EngineConfig};
pub use consensus::{
    Ballot, ConsensusAggregator, Quorum, Tally, Verdict, aggregate, elect_verdict, tally,
};
pub use constants::*;
pub use grammar::{Domain, GrammarError, GrammarMatch, IdentifierGrammar, LineMatch};
pub use index::{CorpusRecord, IndexError, IndexResult, RegulationIndex};
#[cfg(any(test, feature = "mock"))]
pub use oracle::{
    RecordedProposal, ScriptedFilterOracle, ScriptedIdentifierOracle, ScriptedJudgeOracle,
    ScriptedOracle, ScriptedRelevanceOracle,
};
pub use oracle::{
    FilterOracle, IdentifierOracle, JudgeOracle, Oracle, OracleError, Proposal, ProposalRequest,
    RelevanceOracle, RetryingOracle, attempt,
};
pub use pipeline::{Decision, FilterOutcome, PipelineConfig, PipelineReport, RetrievalPipeline};
pub use trie::{BuildStats, RegulationNode, RegulationTrie};
