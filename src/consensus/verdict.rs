use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ConsensusAggregator, Quorum};

/// Normalized decision label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Permitted,
    Prohibited,
    NotApplicable,
}

impl Verdict {
    /// Maps a raw oracle label to a verdict; unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().trim_matches(|c: char| c == '.' || c == '*');
        let normalized = normalized.to_lowercase();

        [Self::Permitted, Self::Prohibited, Self::NotApplicable]
            .into_iter()
            .find(|v| v.synonyms().contains(&normalized.as_str()))
    }

    /// Labels accepted as this verdict.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Verdict::Permitted => &["positive", "permit", "permitted"],
            Verdict::Prohibited => &["negative", "prohibit", "prohibited"],
            Verdict::NotApplicable => &["not applicable"],
        }
    }

    /// Returns `true` if `label` names this verdict.
    pub fn matches(&self, label: &str) -> bool {
        Self::parse(label) == Some(*self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Permitted => "permitted",
            Verdict::Prohibited => "prohibited",
            Verdict::NotApplicable => "not applicable",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Elects one verdict from raw labels, one label per judgment round.
///
/// Unrecognized labels are discarded but still count as cast ballots, so they can prevent a
/// majority. Returns the most-voted verdict meeting `quorum`.
pub fn elect_verdict<S: AsRef<str>>(labels: &[S], quorum: Quorum) -> Option<Verdict> {
    let ballots: Vec<Vec<Verdict>> = labels
        .iter()
        .map(|label| Verdict::parse(label.as_ref()).into_iter().collect())
        .collect();

    ConsensusAggregator::new(quorum)
        .aggregate::<Verdict, _>(&ballots)
        .into_iter()
        .next()
}
