//! Pool-size schedules for beam rounds.

use serde::Serialize;

use crate::constants::INITIAL_POOL_SIZE;

/// Per-round oracle allowances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolSizes {
    /// Identifiers the oracle may ask to expand.
    pub look_up: usize,
    /// Identifiers the oracle may select.
    pub selected: usize,
}

impl PoolSizes {
    pub fn new(look_up: usize, selected: usize) -> Self {
        Self { look_up, selected }
    }
}

/// Decides how the pools change between rounds.
pub trait PoolPolicy: Send + Sync {
    /// Pools for the first round.
    fn initial(&self, max_items: usize) -> PoolSizes;

    /// Pools for the next round, given the current ones and the selected count so far.
    fn next(&self, current: PoolSizes, accumulated: usize, max_items: usize) -> PoolSizes;
}

/// Grows both pools by one per round.
///
/// The look-up pool is capped at `max_items`; the selection pool at the slots still free, so
/// the oracle can never overshoot the quota.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowingPool;

impl PoolPolicy for GrowingPool {
    fn initial(&self, _max_items: usize) -> PoolSizes {
        PoolSizes::new(INITIAL_POOL_SIZE, INITIAL_POOL_SIZE)
    }

    fn next(&self, current: PoolSizes, accumulated: usize, max_items: usize) -> PoolSizes {
        PoolSizes {
            look_up: max_items.min(current.look_up + 1),
            selected: max_items
                .saturating_sub(accumulated)
                .min(current.selected + 1),
        }
    }
}

/// Keeps the initial pools for every round.
#[derive(Debug, Clone, Copy)]
pub struct FixedPool(pub PoolSizes);

impl PoolPolicy for FixedPool {
    fn initial(&self, _max_items: usize) -> PoolSizes {
        self.0
    }

    fn next(&self, current: PoolSizes, _accumulated: usize, _max_items: usize) -> PoolSizes {
        current
    }
}
