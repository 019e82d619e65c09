//! Oracle-driven beam retrieval over the regulation trie.
//!
//! A session starts with the trie's top-level identifiers as candidates. Each round the
//! oracle sees the candidates rendered as `identifier - content` lines and answers with
//! identifiers to expand and identifiers to keep. Kept identifiers accumulate until the
//! quota is met; expanded ones become the next round's candidates through their children.
//!
//! Pool budgets follow a [`PoolPolicy`]; [`GrowingPool`] widens both by one per round with
//! the selection pool bounded by the slots still open.

pub mod config;
pub mod controller;
pub mod policy;
mod state;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::BeamConfig;
pub use controller::BeamSearcher;
pub use policy::{FixedPool, GrowingPool, PoolPolicy, PoolSizes};
pub use types::{BeamOutcome, Termination};
