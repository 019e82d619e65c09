use serde::Serialize;

/// Why a beam session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The selected set reached `max_law_items`.
    QuotaReached,
    /// The oracle asked to expand nothing.
    NoLookUp,
    /// Nothing was left to show the oracle.
    FrontierExhausted,
    /// `max_depth` rounds were used.
    DepthExhausted,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::QuotaReached => "quota_reached",
            Termination::NoLookUp => "no_look_up",
            Termination::FrontierExhausted => "frontier_exhausted",
            Termination::DepthExhausted => "depth_exhausted",
        }
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one beam session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeamOutcome {
    /// `identifier: content` lines for the selected identifiers that resolved.
    pub resolved: Vec<String>,
    /// Selected identifiers in the order they were accepted.
    pub selected: Vec<String>,
    /// Oracle rounds used.
    pub rounds: usize,
    pub termination: Termination,
}

impl BeamOutcome {
    /// Resolved lines joined for the downstream consumer.
    pub fn reference_text(&self) -> String {
        self.resolved.join("\n")
    }
}
