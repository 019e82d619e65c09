use std::collections::HashSet;

use futures_util::future::join_all;
use tracing::{debug, info};

use super::config::BeamConfig;
use super::policy::{GrowingPool, PoolPolicy};
use super::state::SearchState;
use super::types::{BeamOutcome, Termination};
use crate::constants::CANDIDATE_JOINER;
use crate::oracle::{Oracle, ProposalRequest, attempt};
use crate::trie::RegulationTrie;

/// Runs beam sessions against a shared trie.
///
/// The searcher holds no per-session state, so one instance can serve many scenarios at once.
#[derive(Debug, Clone)]
pub struct BeamSearcher<'t, O, P = GrowingPool> {
    trie: &'t RegulationTrie,
    oracle: O,
    config: BeamConfig,
    policy: P,
}

impl<'t, O: Oracle> BeamSearcher<'t, O, GrowingPool> {
    /// Creates a searcher with the growing pool schedule.
    pub fn new(trie: &'t RegulationTrie, oracle: O, config: BeamConfig) -> Self {
        Self {
            trie,
            oracle,
            config,
            policy: GrowingPool,
        }
    }
}

impl<'t, O: Oracle, P: PoolPolicy> BeamSearcher<'t, O, P> {
    /// Replaces the pool schedule.
    pub fn with_policy<Q: PoolPolicy>(self, policy: Q) -> BeamSearcher<'t, O, Q> {
        BeamSearcher {
            trie: self.trie,
            oracle: self.oracle,
            config: self.config,
            policy,
        }
    }

    /// Session limits.
    pub fn config(&self) -> &BeamConfig {
        &self.config
    }

    /// The oracle consulted each round.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Narrows the trie to at most `max_law_items` identifiers relevant to `scenario`.
    ///
    /// Oracle failures never abort the session: a round whose attempts are all exhausted
    /// counts as an empty proposal.
    pub async fn search(&self, scenario: &str) -> BeamOutcome {
        let max = self.config.max_law_items;
        if max == 0 {
            return BeamOutcome {
                resolved: Vec::new(),
                selected: Vec::new(),
                rounds: 0,
                termination: Termination::QuotaReached,
            };
        }

        let mut state = SearchState::new(self.policy.initial(max), self.trie.children_of(""));
        let mut termination = Termination::DepthExhausted;

        while state.round < self.config.max_depth {
            if state.frontier.is_empty() {
                termination = Termination::FrontierExhausted;
                break;
            }

            let candidates = self.render(&state.frontier);
            let request = ProposalRequest {
                scenario,
                candidates: &candidates,
                look_up_budget: state.pools.look_up,
                selected_budget: state.pools.selected,
            };
            let proposal = attempt(self.config.generation_steps, "beam_propose", || {
                self.oracle.propose(&request)
            })
            .await
            .unwrap_or_default();
            state.round += 1;

            let accepted = state.merge_selected(proposal.selected, state.pools.selected, max);

            debug!(
                round = state.round,
                candidates = state.frontier.len(),
                look_up_pool = state.pools.look_up,
                selected_pool = state.pools.selected,
                look_up = proposal.look_up.len(),
                accepted = accepted,
                selected = state.selected_count(),
                "Beam round complete"
            );

            if state.selected_count() >= max {
                termination = Termination::QuotaReached;
                break;
            }
            if proposal.look_up.is_empty() {
                termination = Termination::NoLookUp;
                break;
            }

            state.pools = self.policy.next(state.pools, state.selected_count(), max);
            state.frontier = self.expand(&proposal.look_up);
        }

        let rounds = state.round;
        let selected = state.into_selected();
        let resolved: Vec<String> = selected
            .iter()
            .filter_map(|id| {
                let line = self.trie.resolved_line(id);
                if line.is_none() {
                    debug!(identifier = %id, "Selected identifier did not resolve, dropping");
                }
                line
            })
            .collect();

        info!(
            rounds = rounds,
            selected = selected.len(),
            resolved = resolved.len(),
            termination = %termination,
            "Beam search finished"
        );

        BeamOutcome {
            resolved,
            selected,
            rounds,
            termination,
        }
    }

    /// Runs one independent session per scenario concurrently, preserving input order.
    pub async fn search_many<S: AsRef<str>>(&self, scenarios: &[S]) -> Vec<BeamOutcome> {
        join_all(scenarios.iter().map(|s| self.search(s.as_ref()))).await
    }

    fn render(&self, identifiers: &[String]) -> String {
        identifiers
            .iter()
            .map(|id| self.trie.candidate_line(id))
            .collect::<Vec<_>>()
            .join(CANDIDATE_JOINER)
    }

    fn expand(&self, look_up: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        look_up
            .iter()
            .flat_map(|id| self.trie.children_of(id.trim()))
            .filter(|child| seen.insert(child.clone()))
            .collect()
    }
}
