use std::collections::HashSet;

use super::policy::PoolSizes;

/// Mutable state of one beam session.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub pools: PoolSizes,
    pub round: usize,
    /// Identifiers shown to the oracle in the next round.
    pub frontier: Vec<String>,
    selected: Vec<String>,
    seen: HashSet<String>,
}

impl SearchState {
    pub fn new(pools: PoolSizes, frontier: Vec<String>) -> Self {
        Self {
            pools,
            round: 0,
            frontier,
            selected: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Adds up to `allowance` of `proposed` to the selected set, never growing it past `max`.
    /// Returns how many were new.
    pub fn merge_selected(&mut self, proposed: Vec<String>, allowance: usize, max: usize) -> usize {
        let before = self.selected.len();

        for identifier in proposed.into_iter().take(allowance) {
            if self.selected.len() >= max {
                break;
            }
            let identifier = identifier.trim().to_string();
            if identifier.is_empty() || !self.seen.insert(identifier.clone()) {
                continue;
            }
            self.selected.push(identifier);
        }

        self.selected.len() - before
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn into_selected(self) -> Vec<String> {
        self.selected
    }
}
