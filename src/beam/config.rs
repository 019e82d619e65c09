use crate::constants::{DEFAULT_GENERATION_STEPS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_LAW_ITEMS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Limits for one beam session.
pub struct BeamConfig {
    /// Upper bound on selected identifiers.
    pub max_law_items: usize,
    /// Maximum oracle rounds.
    pub max_depth: usize,
    /// Oracle attempts per round before the round degrades to empty.
    pub generation_steps: usize,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            max_law_items: DEFAULT_MAX_LAW_ITEMS,
            max_depth: DEFAULT_MAX_DEPTH,
            generation_steps: DEFAULT_GENERATION_STEPS,
        }
    }
}

impl BeamConfig {
    pub fn new(max_law_items: usize, max_depth: usize, generation_steps: usize) -> Self {
        Self {
            max_law_items,
            max_depth,
            generation_steps,
        }
    }

    /// Rejects limits under which no oracle call could ever happen.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("max_depth must be at least 1".to_string());
        }
        if self.generation_steps == 0 {
            return Err("generation_steps must be at least 1".to_string());
        }
        Ok(())
    }
}
