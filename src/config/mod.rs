//! Environment-backed configuration.
//!
//! Every setting has a default from [`crate::constants`]. Override with `LEXBEAM_*`
//! environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::str::FromStr;

use crate::beam::BeamConfig;
use crate::bm25::Bm25Params;
use crate::constants::{
    DEFAULT_BM25_B, DEFAULT_BM25_K1, DEFAULT_GENERATION_STEPS, DEFAULT_JUDGE_ROUNDS,
    DEFAULT_LAW_FILTERING_ROUNDS, DEFAULT_LAW_GENERATION_ROUNDS, DEFAULT_LOOK_UP_ITEMS,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_LAW_ITEMS, DEFAULT_MAX_REFERENCES, DEFAULT_MAX_RETRY,
};
use crate::grammar::{Domain, GrammarError, IdentifierGrammar};
use crate::oracle::RetryingOracle;
use crate::pipeline::PipelineConfig;

/// Engine configuration loaded from environment variables.
///
/// Use [`EngineConfig::from_env`] to read `LEXBEAM_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Corpus numbering convention. Default: `hipaa`.
    pub domain: Domain,

    /// Identifiers kept per beam session. Default: `3`.
    pub max_law_items: usize,

    /// Oracle rounds per beam session. Default: `5`.
    pub max_depth: usize,

    /// Oracle attempts per round. Default: `5`.
    pub generation_steps: usize,

    /// Transport retries at the oracle boundary. Default: `5`.
    pub max_retry: usize,

    /// Beam sessions per scenario. Default: `3`.
    pub law_generation_rounds: usize,

    /// Filter ballots per scenario. Default: `3`.
    pub law_filtering_rounds: usize,

    /// Judgments per scenario. Default: `1`.
    pub judge_rounds: usize,

    /// BM25 top-k. Default: `3`.
    pub look_up_items: usize,

    /// References handed to the judge. Default: `10`.
    pub max_references: usize,

    /// BM25 `k1`. Default: `1.5`.
    pub bm25_k1: f64,

    /// BM25 `b`. Default: `0.75`.
    pub bm25_b: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            domain: Domain::default(),
            max_law_items: DEFAULT_MAX_LAW_ITEMS,
            max_depth: DEFAULT_MAX_DEPTH,
            generation_steps: DEFAULT_GENERATION_STEPS,
            max_retry: DEFAULT_MAX_RETRY,
            law_generation_rounds: DEFAULT_LAW_GENERATION_ROUNDS,
            law_filtering_rounds: DEFAULT_LAW_FILTERING_ROUNDS,
            judge_rounds: DEFAULT_JUDGE_ROUNDS,
            look_up_items: DEFAULT_LOOK_UP_ITEMS,
            max_references: DEFAULT_MAX_REFERENCES,
            bm25_k1: DEFAULT_BM25_K1,
            bm25_b: DEFAULT_BM25_B,
        }
    }
}

impl EngineConfig {
    const ENV_DOMAIN: &'static str = "LEXBEAM_DOMAIN";
    const ENV_MAX_LAW_ITEMS: &'static str = "LEXBEAM_MAX_LAW_ITEMS";
    const ENV_MAX_DEPTH: &'static str = "LEXBEAM_MAX_DEPTH";
    const ENV_GENERATION_STEPS: &'static str = "LEXBEAM_GENERATION_STEPS";
    const ENV_MAX_RETRY: &'static str = "LEXBEAM_MAX_RETRY";
    const ENV_LAW_GENERATION_ROUNDS: &'static str = "LEXBEAM_LAW_GENERATION_ROUNDS";
    const ENV_LAW_FILTERING_ROUNDS: &'static str = "LEXBEAM_LAW_FILTERING_ROUNDS";
    const ENV_JUDGE_ROUNDS: &'static str = "LEXBEAM_JUDGE_ROUNDS";
    const ENV_LOOK_UP_ITEMS: &'static str = "LEXBEAM_LOOK_UP_ITEMS";
    const ENV_MAX_REFERENCES: &'static str = "LEXBEAM_MAX_REFERENCES";
    const ENV_BM25_K1: &'static str = "LEXBEAM_BM25_K1";
    const ENV_BM25_B: &'static str = "LEXBEAM_BM25_B";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Set but unparseable values are errors; unset or blank values use the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            domain: Self::parse_domain_from_env(defaults.domain)?,
            max_law_items: Self::parse_from_env(Self::ENV_MAX_LAW_ITEMS, defaults.max_law_items)?,
            max_depth: Self::parse_from_env(Self::ENV_MAX_DEPTH, defaults.max_depth)?,
            generation_steps: Self::parse_from_env(
                Self::ENV_GENERATION_STEPS,
                defaults.generation_steps,
            )?,
            max_retry: Self::parse_from_env(Self::ENV_MAX_RETRY, defaults.max_retry)?,
            law_generation_rounds: Self::parse_from_env(
                Self::ENV_LAW_GENERATION_ROUNDS,
                defaults.law_generation_rounds,
            )?,
            law_filtering_rounds: Self::parse_from_env(
                Self::ENV_LAW_FILTERING_ROUNDS,
                defaults.law_filtering_rounds,
            )?,
            judge_rounds: Self::parse_from_env(Self::ENV_JUDGE_ROUNDS, defaults.judge_rounds)?,
            look_up_items: Self::parse_from_env(Self::ENV_LOOK_UP_ITEMS, defaults.look_up_items)?,
            max_references: Self::parse_from_env(
                Self::ENV_MAX_REFERENCES,
                defaults.max_references,
            )?,
            bm25_k1: Self::parse_float_from_env(Self::ENV_BM25_K1, defaults.bm25_k1)?,
            bm25_b: Self::parse_float_from_env(Self::ENV_BM25_B, defaults.bm25_b)?,
        })
    }

    /// Checks cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline_config()
            .validate()
            .and_then(|()| self.bm25_params().validate())
            .map_err(|reason| ConfigError::Invalid { reason })?;

        if self.max_retry == 0 {
            return Err(ConfigError::Invalid {
                reason: "max_retry must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Beam limits from the loaded settings.
    pub fn beam_config(&self) -> BeamConfig {
        BeamConfig::new(self.max_law_items, self.max_depth, self.generation_steps)
    }

    /// Pipeline stages from the loaded settings, with the default quorum.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            beam: self.beam_config(),
            law_generation_rounds: self.law_generation_rounds,
            law_filtering_rounds: self.law_filtering_rounds,
            judge_rounds: self.judge_rounds,
            look_up_items: self.look_up_items,
            max_references: self.max_references,
            ..PipelineConfig::default()
        }
    }

    /// BM25 parameters from the loaded settings.
    pub fn bm25_params(&self) -> Bm25Params {
        Bm25Params::new(self.bm25_k1, self.bm25_b)
    }

    /// Compiles the preset grammar for [`domain`](Self::domain).
    pub fn grammar(&self) -> Result<IdentifierGrammar, GrammarError> {
        IdentifierGrammar::preset(self.domain)
    }

    /// Wraps `oracle` so transient failures are retried up to [`max_retry`](Self::max_retry)
    /// calls per request.
    pub fn retrying<O>(&self, oracle: O) -> RetryingOracle<O> {
        RetryingOracle::new(oracle, self.max_retry)
    }

    fn read_env(var_name: &'static str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_domain_from_env(default: Domain) -> Result<Domain, ConfigError> {
        match Self::read_env(Self::ENV_DOMAIN) {
            Some(value) => Domain::from_str(&value).map_err(|_| ConfigError::UnknownDomain { value }),
            None => Ok(default),
        }
    }

    fn parse_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match Self::read_env(var_name) {
            Some(value) => value.parse().map_err(|e| ConfigError::InvalidInteger {
                name: var_name,
                value,
                source: e,
            }),
            None => Ok(default),
        }
    }

    fn parse_float_from_env(var_name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match Self::read_env(var_name) {
            Some(value) => value.parse().map_err(|e| ConfigError::InvalidFloat {
                name: var_name,
                value,
                source: e,
            }),
            None => Ok(default),
        }
    }
}
