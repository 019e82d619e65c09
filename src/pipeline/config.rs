use crate::beam::BeamConfig;
use crate::consensus::Quorum;
use crate::constants::{
    DEFAULT_JUDGE_ROUNDS, DEFAULT_LAW_FILTERING_ROUNDS, DEFAULT_LAW_GENERATION_ROUNDS,
    DEFAULT_LOOK_UP_ITEMS, DEFAULT_MAX_REFERENCES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Round counts and caps for one pipeline run.
pub struct PipelineConfig {
    /// Limits for every beam session.
    pub beam: BeamConfig,
    /// Independent beam sessions per scenario.
    pub law_generation_rounds: usize,
    /// Filter ballots per scenario.
    pub law_filtering_rounds: usize,
    /// Judgments per scenario.
    pub judge_rounds: usize,
    /// BM25 top-k for lexical candidates.
    pub look_up_items: usize,
    /// Cap on references handed to the judge.
    pub max_references: usize,
    /// Quorum for both filter ballots and judgments.
    pub quorum: Quorum,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            beam: BeamConfig::default(),
            law_generation_rounds: DEFAULT_LAW_GENERATION_ROUNDS,
            law_filtering_rounds: DEFAULT_LAW_FILTERING_ROUNDS,
            judge_rounds: DEFAULT_JUDGE_ROUNDS,
            look_up_items: DEFAULT_LOOK_UP_ITEMS,
            max_references: DEFAULT_MAX_REFERENCES,
            quorum: Quorum::Majority,
        }
    }
}

impl PipelineConfig {
    pub fn with_beam(mut self, beam: BeamConfig) -> Self {
        self.beam = beam;
        self
    }

    pub fn with_rounds(mut self, generation: usize, filtering: usize, judge: usize) -> Self {
        self.law_generation_rounds = generation;
        self.law_filtering_rounds = filtering;
        self.judge_rounds = judge;
        self
    }

    pub fn with_quorum(mut self, quorum: Quorum) -> Self {
        self.quorum = quorum;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        self.beam.validate()?;
        if self.law_generation_rounds == 0 {
            return Err("law_generation_rounds must be at least 1".to_string());
        }
        if self.judge_rounds == 0 {
            return Err("judge_rounds must be at least 1".to_string());
        }
        Ok(())
    }
}
