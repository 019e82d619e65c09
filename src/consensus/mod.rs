//! Majority-vote aggregation over repeated noisy rounds.
//!
//! One algorithm serves every place where the engine samples an unreliable oracle more than
//! once: repeated filter rounds become one regulation set, repeated judgments become one label.
//! The aggregator does not care what the items are.
//!
//! An item's count is the number of ballots containing it (repeats inside one ballot count
//! once). Items with `count >= quorum` survive, ordered by descending count and then by the
//! order in which they were first seen.

pub mod verdict;


pub use verdict::{Verdict, elect_verdict};

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::debug;

/// One independent round's output.
pub type Ballot<T> = Vec<T>;

/// Minimum number of ballots an item must appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quorum {
    /// Strict majority: `⌊K/2⌋ + 1` of `K` ballots.
    #[default]
    Majority,
    /// A fixed count regardless of the number of ballots.
    AtLeast(usize),
}

impl Quorum {
    /// The vote count required when `ballots` ballots were cast.
    pub fn threshold(&self, ballots: usize) -> usize {
        match self {
            Quorum::Majority => ballots / 2 + 1,
            Quorum::AtLeast(n) => *n,
        }
    }
}

/// An item with the number of ballots that contained it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<T> {
    pub item: T,
    pub votes: usize,
}

/// Aggregates ballots under a fixed quorum policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsensusAggregator {
    quorum: Quorum,
}

impl ConsensusAggregator {
    pub fn new(quorum: Quorum) -> Self {
        Self { quorum }
    }

    pub fn majority() -> Self {
        Self::new(Quorum::Majority)
    }

    pub fn quorum(&self) -> Quorum {
        self.quorum
    }

    /// Items meeting the quorum, most-voted first.
    pub fn aggregate<T, B>(&self, ballots: &[B]) -> Vec<T>
    where
        T: Eq + Hash + Clone,
        B: AsRef<[T]>,
    {
        self.aggregate_with_votes::<T, B>(ballots)
            .into_iter()
            .map(|t| t.item)
            .collect()
    }

    /// Like [`aggregate`](Self::aggregate), keeping vote counts.
    pub fn aggregate_with_votes<T, B>(&self, ballots: &[B]) -> Vec<Tally<T>>
    where
        T: Eq + Hash + Clone,
        B: AsRef<[T]>,
    {
        let threshold = self.quorum.threshold(ballots.len());
        let mut tallies: Vec<Tally<T>> = tally::<T, B>(ballots)
            .into_iter()
            .filter(|t| t.votes >= threshold)
            .collect();

        // Stable: equal counts keep first-seen order.
        tallies.sort_by(|a, b| b.votes.cmp(&a.votes));

        if tallies.is_empty() {
            debug!(
                ballots = ballots.len(),
                threshold = threshold,
                "No item reached quorum"
            );
        }

        tallies
    }
}

/// Counts, per distinct item, how many ballots contain it. Items appear in first-seen order.
pub fn tally<T, B>(ballots: &[B]) -> Vec<Tally<T>>
where
    T: Eq + Hash + Clone,
    B: AsRef<[T]>,
{
    let mut tallies: Vec<Tally<T>> = Vec::new();
    let mut positions: HashMap<T, usize> = HashMap::new();

    for ballot in ballots {
        let mut seen: HashSet<&T> = HashSet::new();
        for item in ballot.as_ref() {
            if !seen.insert(item) {
                continue;
            }
            match positions.get(item) {
                Some(&i) => tallies[i].votes += 1,
                None => {
                    positions.insert(item.clone(), tallies.len());
                    tallies.push(Tally {
                        item: item.clone(),
                        votes: 1,
                    });
                }
            }
        }
    }

    tallies
}

/// Aggregates `ballots` with the given quorum.
pub fn aggregate<T, B>(ballots: &[B], quorum: Quorum) -> Vec<T>
where
    T: Eq + Hash + Clone,
    B: AsRef<[T]>,
{
    ConsensusAggregator::new(quorum).aggregate(ballots)
}
