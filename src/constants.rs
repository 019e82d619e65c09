//! Cross-cutting, shared constants.
//!
//! These are the defaults every configurable component falls back to. Runtime overrides go
//! through [`EngineConfig`](crate::config::EngineConfig).

/// BM25 term-frequency saturation.
pub const DEFAULT_BM25_K1: f64 = 1.5;
/// BM25 document-length normalization.
pub const DEFAULT_BM25_B: f64 = 0.75;

/// Upper bound on identifiers a single beam session may select.
pub const DEFAULT_MAX_LAW_ITEMS: usize = 3;
/// Maximum number of oracle rounds in a beam session.
pub const DEFAULT_MAX_DEPTH: usize = 5;
/// Oracle attempts per beam round before the round degrades to empty.
pub const DEFAULT_GENERATION_STEPS: usize = 5;
/// Transport-level retries at the oracle boundary.
pub const DEFAULT_MAX_RETRY: usize = 5;
/// Pause between transport-level retries.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1_000;

/// Independent beam sessions run per scenario by the pipeline.
pub const DEFAULT_LAW_GENERATION_ROUNDS: usize = 3;
/// Independent filter ballots collected per scenario.
pub const DEFAULT_LAW_FILTERING_ROUNDS: usize = 3;
/// Independent judgments collected per scenario.
pub const DEFAULT_JUDGE_ROUNDS: usize = 1;
/// BM25 top-k used by content search.
pub const DEFAULT_LOOK_UP_ITEMS: usize = 3;
/// Cap on references handed to the downstream decision consumer.
pub const DEFAULT_MAX_REFERENCES: usize = 10;

/// Both pools start at one slot on the first round.
pub const INITIAL_POOL_SIZE: usize = 1;

/// Separator between identifier and content in oracle-facing candidate lines.
pub const CANDIDATE_SEPARATOR: &str = " - ";
/// Separator between identifier and content in resolved output lines.
pub const RESOLVED_SEPARATOR: &str = ": ";
/// Joiner for candidate lines sent to the oracle.
pub const CANDIDATE_JOINER: &str = " \n";
