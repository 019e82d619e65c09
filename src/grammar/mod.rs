//! Identifier grammar: recognizes hierarchical regulation identifiers in text.
//!
//! Every corpus numbers its provisions differently, so the grammar is always supplied as a
//! pattern. [`Domain`] bundles the patterns for the corpora this crate ships presets for.
//!
//! Matching follows leftmost-first alternation semantics: the earliest match in the text wins,
//! and among alternatives starting at the same position the first listed one wins.

pub mod error;


pub use error::GrammarError;

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fragment-level HIPAA pattern: `164.502` and each `(a)` are separate levels.
pub const HIPAA_PATTERN: &str = r"[0-9]+\.[0-9]+|\([0-9A-Za-zivx]+\)";
/// GDPR recitals and articles.
pub const GDPR_PATTERN: &str = r"(?i)recital\s\d+|article\s\d+(\(\d+\))?";
/// EU AI Act dotted chapter/section/article paths.
pub const AI_ACT_PATTERN: &str =
    r"(?i)eu_ai_act\.chapter\d+(\.section\d+-\d+)?\.article\d+(\.\w+)*";
/// Union of all presets with HIPAA sub-items folded into one token.
pub const COMBINED_PATTERN: &str = r"(?i)[0-9]+\.[0-9]+(\([0-9A-Za-zivx]+\))*|recital\s\d+|article\s\d+(\(\d+\))?|eu_ai_act\.chapter\d+(\.section\d+-\d+)?\.article\d+(\.\w+)*";

/// Corpora with a built-in identifier pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    #[default]
    /// US health privacy rule (`164.502(a)(1)` style).
    Hipaa,
    /// EU data protection regulation (`article 5(1)`, `recital 39`).
    Gdpr,
    /// EU AI Act (`eu_ai_act.chapter2.article5`).
    AiAct,
    /// Every pattern above in a single alternation.
    Combined,
}

impl Domain {
    /// Returns the identifier pattern for this domain.
    pub fn pattern(&self) -> &'static str {
        match self {
            Domain::Hipaa => HIPAA_PATTERN,
            Domain::Gdpr => GDPR_PATTERN,
            Domain::AiAct => AI_ACT_PATTERN,
            Domain::Combined => COMBINED_PATTERN,
        }
    }

    /// Canonical lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Hipaa => "hipaa",
            Domain::Gdpr => "gdpr",
            Domain::AiAct => "ai_act",
            Domain::Combined => "combined",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "hipaa" => Ok(Self::Hipaa),
            "gdpr" => Ok(Self::Gdpr),
            "ai_act" | "aiact" | "eu_ai_act" => Ok(Self::AiAct),
            "combined" | "all" => Ok(Self::Combined),
            _ => Err(GrammarError::UnknownDomain {
                name: s.to_string(),
            }),
        }
    }
}

/// A single grammar match inside a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarMatch<'a> {
    /// Byte range of the identifier within the searched text.
    pub span: Range<usize>,
    /// The matched identifier.
    pub identifier: &'a str,
}

/// The identifier run recognized on one corpus line.
///
/// A run is the leftmost match followed by every match that starts exactly where the previous
/// one ended, so `1.1(a)` yields the fragments `1.1` and `(a)` under a fragment-level grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch<'a> {
    /// Byte range covered by the whole run.
    pub span: Range<usize>,
    /// Fragments of the run, in order.
    pub fragments: Vec<&'a str>,
    /// Line text with the run removed.
    pub content: String,
}

impl<'a> LineMatch<'a> {
    /// The innermost fragment.
    pub fn key(&self) -> &'a str {
        // A run always holds at least its leading match.
        self.fragments.last().copied().unwrap_or_default()
    }

    /// The full identifier text of the run.
    pub fn identifier(&self) -> String {
        self.fragments.concat()
    }
}

/// Compiled identifier pattern for one corpus.
#[derive(Debug, Clone)]
pub struct IdentifierGrammar {
    regex: Regex,
}

impl IdentifierGrammar {
    /// Compiles `pattern`.
    pub fn new(pattern: &str) -> Result<Self, GrammarError> {
        let regex = Regex::new(pattern).map_err(|source| GrammarError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        if regex.is_match("") {
            return Err(GrammarError::MatchesEmpty {
                pattern: pattern.to_string(),
            });
        }

        Ok(Self { regex })
    }

    /// Grammar for one of the built-in domains.
    pub fn preset(domain: Domain) -> Result<Self, GrammarError> {
        Self::new(domain.pattern())
    }

    /// Returns the source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Leftmost identifier in `text`, or `None` when the text holds no identifier.
    pub fn find<'t>(&self, text: &'t str) -> Option<GrammarMatch<'t>> {
        self.regex.find(text).map(|m| GrammarMatch {
            span: m.range(),
            identifier: m.as_str(),
        })
    }

    /// Rightmost identifier in `text`.
    pub fn last_match<'t>(&self, text: &'t str) -> Option<GrammarMatch<'t>> {
        self.regex.find_iter(text).last().map(|m| GrammarMatch {
            span: m.range(),
            identifier: m.as_str(),
        })
    }

    /// Returns `true` if `text` contains an identifier.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Splits an identifier path into its fragments.
    ///
    /// Each fragment is the leftmost match in the text remaining after the previous fragment;
    /// anything between matches is skipped.
    pub fn tokenize<'t>(&self, path: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(path).map(|m| m.as_str()).collect()
    }

    /// Recognizes the identifier run of a corpus line.
    pub fn match_line<'t>(&self, line: &'t str) -> Option<LineMatch<'t>> {
        let mut matches = self.regex.find_iter(line);
        let first = matches.next()?;

        let start = first.start();
        let mut end = first.end();
        let mut fragments = vec![first.as_str()];

        for m in matches {
            if m.start() != end {
                break;
            }
            fragments.push(m.as_str());
            end = m.end();
        }

        let before = line[..start].trim();
        let after = line[end..].trim();
        let content = match (before.is_empty(), after.is_empty()) {
            (true, _) => after.to_string(),
            (false, true) => before.to_string(),
            (false, false) => format!("{} {}", before, after),
        };

        Some(LineMatch {
            span: start..end,
            fragments,
            content,
        })
    }
}
