//! End-to-end retrieval and judgment for one scenario.
//!
//! A run has three stages:
//!
//! 1. **Collect**: several beam sessions, a BM25 lookup, or an [`IdentifierOracle`] naming
//!    identifiers outright propose regulation lines.
//! 2. **Filter**: a [`FilterOracle`] picks the relevant identifiers from the candidate text
//!    several times; the picks are ballots and the [`ConsensusAggregator`] keeps those that
//!    reach quorum. Survivors are resolved through the index.
//! 3. **Decide**: a [`JudgeOracle`] labels the scenario against the references, possibly
//!    several times; the labels are normalized to [`Verdict`]s and elected the same way.
//!
//! [`screen_candidates`](RetrievalPipeline::screen_candidates) offers a per-line alternative to
//! the filter stage, asking a [`RelevanceOracle`] about each candidate separately.
//!
//! Oracle failures only shrink the stage they happen in. A run always produces a report.

pub mod config;


pub use config::PipelineConfig;

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::beam::BeamSearcher;
use crate::consensus::{Ballot, ConsensusAggregator, Verdict, elect_verdict};
use crate::index::RegulationIndex;
use crate::oracle::{
    FilterOracle, IdentifierOracle, JudgeOracle, Oracle, RelevanceOracle, attempt,
};

/// Result of the filter stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    /// One ballot per successful filter call.
    pub ballots: Vec<Ballot<String>>,
    /// Identifiers that reached quorum, most-voted first.
    pub survivors: Vec<String>,
    /// Resolved `identifier: content` lines for the survivors.
    pub references: Vec<String>,
}

/// Result of the decision stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Raw labels from successful judge calls.
    pub labels: Vec<String>,
    /// Majority label, if any reached quorum.
    pub verdict: Option<Verdict>,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub scenario: String,
    pub candidates: Vec<String>,
    pub filter: FilterOutcome,
    pub decision: Decision,
}

impl PipelineReport {
    /// The references handed to the judge, one per line.
    pub fn reference_text(&self) -> String {
        self.filter.references.join("\n")
    }

    /// The elected verdict.
    pub fn verdict(&self) -> Option<Verdict> {
        self.decision.verdict
    }
}

/// Drives collection, filtering and judgment over a shared index.
pub struct RetrievalPipeline<O, F, J> {
    index: Arc<RegulationIndex>,
    oracle: O,
    filter: F,
    judge: J,
    config: PipelineConfig,
}

impl<O, F, J> RetrievalPipeline<O, F, J>
where
    O: Oracle,
    F: FilterOracle,
    J: JudgeOracle,
{
    /// Creates a pipeline over `index`.
    pub fn new(
        index: Arc<RegulationIndex>,
        oracle: O,
        filter: F,
        judge: J,
        config: PipelineConfig,
    ) -> Self {
        Self {
            index,
            oracle,
            filter,
            judge,
            config,
        }
    }

    /// The shared index.
    pub fn index(&self) -> &RegulationIndex {
        &self.index
    }

    /// Stage settings.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Resolved lines from `law_generation_rounds` beam sessions, first-seen order, no repeats.
    ///
    /// Sessions run one after another.
    pub async fn collect_candidates(&self, scenario: &str) -> Vec<String> {
        let searcher = BeamSearcher::new(self.index.trie(), &self.oracle, self.config.beam);
        let mut lines = Vec::new();

        for _ in 0..self.config.law_generation_rounds {
            lines.extend(searcher.search(scenario).await.resolved);
        }

        let candidates = dedupe(lines);
        debug!(
            sessions = self.config.law_generation_rounds,
            candidates = candidates.len(),
            "Beam candidates collected"
        );
        candidates
    }

    /// Resolved lines for identifiers named by `generator`, first-seen order, no repeats.
    ///
    /// Each of the `law_generation_rounds` rounds asks for `max_law_items` identifiers with up
    /// to `generation_steps` attempts. Only the last `max_law_items` names of an answer are
    /// kept, and names that do not resolve are dropped.
    pub async fn collect_by_identifiers<G>(&self, generator: &G, scenario: &str) -> Vec<String>
    where
        G: IdentifierOracle,
    {
        let limit = self.config.beam.max_law_items;
        let mut lines = Vec::new();

        for _ in 0..self.config.law_generation_rounds {
            let named = attempt(self.config.beam.generation_steps, "generate", || {
                generator.generate(scenario, limit)
            })
            .await
            .unwrap_or_default();

            let skip = named.len().saturating_sub(limit);
            let named: Vec<String> = named
                .into_iter()
                .skip(skip)
                .map(|id| id.trim().to_string())
                .collect();
            lines.extend(self.index.resolve_all(&named));
        }

        let candidates = dedupe(lines);
        debug!(
            rounds = self.config.law_generation_rounds,
            candidates = candidates.len(),
            "Generated candidates collected"
        );
        candidates
    }

    /// BM25 candidates rendered `key - context`.
    pub fn lexical_candidates(&self, query: &str) -> Vec<String> {
        self.index.search_related(query, self.config.look_up_items)
    }

    /// Consolidates repeated filter calls into one reference set.
    ///
    /// With no candidates nothing is asked. With zero filter rounds the candidates pass
    /// through unchanged.
    pub async fn filter_candidates(&self, scenario: &str, candidates: &[String]) -> FilterOutcome {
        if candidates.is_empty() {
            return FilterOutcome::default();
        }
        if self.config.law_filtering_rounds == 0 {
            return FilterOutcome {
                references: self.cap(candidates.to_vec()),
                ..FilterOutcome::default()
            };
        }

        let text = candidates.join("\n");
        let mut ballots: Vec<Ballot<String>> = Vec::with_capacity(self.config.law_filtering_rounds);

        for _ in 0..self.config.law_filtering_rounds {
            let picked = attempt(self.config.beam.generation_steps, "filter", || {
                self.filter.filter(scenario, &text)
            })
            .await;

            if let Some(identifiers) = picked {
                ballots.push(
                    identifiers
                        .into_iter()
                        .map(|id| id.trim().to_string())
                        .filter(|id| !id.is_empty())
                        .collect(),
                );
            }
        }

        let survivors: Vec<String> =
            ConsensusAggregator::new(self.config.quorum).aggregate::<String, _>(&ballots);
        let references = self.cap(self.index.resolve_all(&survivors));

        debug!(
            ballots = ballots.len(),
            survivors = survivors.len(),
            references = references.len(),
            "Candidates filtered"
        );

        FilterOutcome {
            ballots,
            survivors,
            references,
        }
    }

    /// Keeps the candidates `screen` calls relevant, one call per candidate.
    ///
    /// A candidate whose every attempt fails is dropped.
    pub async fn screen_candidates<R>(
        &self,
        screen: &R,
        scenario: &str,
        candidates: &[String],
    ) -> Vec<String>
    where
        R: RelevanceOracle,
    {
        let mut kept = Vec::new();

        for candidate in candidates {
            let relevant = attempt(self.config.beam.generation_steps, "screen", || {
                screen.is_relevant(scenario, candidate)
            })
            .await;
            if relevant == Some(true) {
                kept.push(candidate.clone());
            }
        }

        debug!(
            candidates = candidates.len(),
            kept = kept.len(),
            "Candidates screened"
        );
        kept
    }

    /// Elects a verdict from `judge_rounds` judgments of the references.
    pub async fn decide(&self, scenario: &str, references: &[String]) -> Decision {
        let text = references.join("\n");
        let mut labels = Vec::with_capacity(self.config.judge_rounds);

        for _ in 0..self.config.judge_rounds {
            let label = attempt(self.config.beam.generation_steps, "judge", || {
                self.judge.judge(scenario, &text)
            })
            .await;
            if let Some(label) = label {
                labels.push(label);
            }
        }

        let verdict = elect_verdict(&labels, self.config.quorum);
        Decision { labels, verdict }
    }

    /// Beam collection, filtering and judgment for `scenario`.
    #[instrument(skip(self, scenario), fields(scenario_len = scenario.len()))]
    pub async fn run(&self, scenario: &str) -> PipelineReport {
        let candidates = self.collect_candidates(scenario).await;
        self.finish(scenario, candidates).await
    }

    /// Like [`run`](Self::run) with BM25 candidates in place of beam sessions.
    #[instrument(skip(self, scenario), fields(scenario_len = scenario.len()))]
    pub async fn run_lexical(&self, scenario: &str) -> PipelineReport {
        let candidates = self.lexical_candidates(scenario);
        self.finish(scenario, candidates).await
    }

    /// Like [`run`](Self::run) with identifiers named by `generator` in place of beam sessions.
    #[instrument(skip(self, generator, scenario), fields(scenario_len = scenario.len()))]
    pub async fn run_generated<G>(&self, generator: &G, scenario: &str) -> PipelineReport
    where
        G: IdentifierOracle,
    {
        let candidates = self.collect_by_identifiers(generator, scenario).await;
        self.finish(scenario, candidates).await
    }

    async fn finish(&self, scenario: &str, candidates: Vec<String>) -> PipelineReport {
        let filter = self.filter_candidates(scenario, &candidates).await;
        let decision = self.decide(scenario, &filter.references).await;

        info!(
            candidates = candidates.len(),
            references = filter.references.len(),
            verdict = decision.verdict.map(|v| v.as_str()).unwrap_or("none"),
            "Pipeline run complete"
        );

        PipelineReport {
            scenario: scenario.to_string(),
            candidates,
            filter,
            decision,
        }
    }

    fn cap(&self, mut references: Vec<String>) -> Vec<String> {
        references.truncate(self.config.max_references);
        references
    }
}

fn dedupe(lines: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect()
}
