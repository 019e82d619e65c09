//! Prefix index over hierarchically numbered regulation text.
//!
//! Each corpus entry is read line by line. Every line the [`IdentifierGrammar`] recognizes
//! becomes a node nested under the previously recognized line of the same entry, so depth
//! follows document order rather than the numbering itself. A line whose identifier run has
//! several fragments gets one node per fragment the current path does not already end with:
//! `1.1(a) ...` under `1.1 ...` is stored as `(a)` below `1.1`, while `1.1(a) ...` opening an
//! entry creates `1.1` and then `(a)`. The line's content goes on the innermost node.
//!
//! Grammars that fold sub-items into one token (`Article 6(1)`) store the folded token as the
//! fragment. Such a token resolves through the nodes whose fragments it extends.
//!
//! The trie is immutable once built and can be shared across threads without locking.

pub mod node;

#[cfg(test)]
mod tests;

pub use node::RegulationNode;

use tracing::debug;

use crate::constants::{CANDIDATE_SEPARATOR, RESOLVED_SEPARATOR};
use crate::grammar::IdentifierGrammar;

/// Counts gathered while indexing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Corpus entries processed.
    pub entries: usize,
    /// Nodes created (duplicates of existing paths are not counted).
    pub nodes: usize,
    /// Non-empty lines the grammar did not recognize.
    pub skipped_lines: usize,
}

/// Trie index keyed by identifier fragments.
#[derive(Debug, Clone)]
pub struct RegulationTrie {
    root: RegulationNode,
    grammar: IdentifierGrammar,
    stats: BuildStats,
}

impl RegulationTrie {
    /// Indexes every entry of `corpus` under a shared root.
    pub fn build<I, S>(corpus: I, grammar: IdentifierGrammar) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = RegulationNode::root();
        let mut stats = BuildStats::default();

        for entry in corpus {
            insert_entry(&mut root, &grammar, entry.as_ref(), &mut stats);
            stats.entries += 1;
        }

        debug!(
            entries = stats.entries,
            nodes = stats.nodes,
            skipped_lines = stats.skipped_lines,
            "Regulation trie built"
        );

        Self {
            root,
            grammar,
            stats,
        }
    }

    /// The grammar used for both indexing and path resolution.
    pub fn grammar(&self) -> &IdentifierGrammar {
        &self.grammar
    }

    /// The root sentinel.
    pub fn root(&self) -> &RegulationNode {
        &self.root
    }

    /// Indexing counters.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Number of nodes, excluding the root.
    pub fn len(&self) -> usize {
        self.stats.nodes
    }

    /// Returns `true` if no line was indexed.
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// Identifiers of the nodes directly below `path_prefix`.
    ///
    /// Each child is reported as `path_prefix` followed by its fragment. A folded fragment
    /// that extends the prefix's last identifier replaces it instead. An empty prefix lists
    /// the root's children; a prefix with a fragment that does not resolve lists nothing.
    pub fn children_of(&self, path_prefix: &str) -> Vec<String> {
        let Some(node) = self.resolve(path_prefix) else {
            return Vec::new();
        };
        let last = self.grammar.last_match(path_prefix);

        node.children()
            .map(|child| match &last {
                Some(m) if extends(child.fragment(), m.identifier) => {
                    format!("{}{}", &path_prefix[..m.span.start], child.fragment())
                }
                _ => format!("{}{}", path_prefix, child.fragment()),
            })
            .collect()
    }

    /// Contents of the nodes along `path_prefix`, root side first.
    ///
    /// Resolution stops at the first fragment that is not found; the contents gathered up to
    /// that point are returned.
    pub fn content_of(&self, path_prefix: &str) -> Vec<&str> {
        self.walk(path_prefix)
            .0
            .into_iter()
            .map(RegulationNode::content)
            .collect()
    }

    /// Contents along `path_prefix` joined with single spaces, or `None` if nothing resolved.
    pub fn describe(&self, path_prefix: &str) -> Option<String> {
        let contents = self.content_of(path_prefix);
        if contents.is_empty() {
            None
        } else {
            Some(join_contents(&contents))
        }
    }

    /// Oracle-facing line for `identifier`: `identifier - content`.
    ///
    /// The content part is empty when nothing resolves.
    pub fn candidate_line(&self, identifier: &str) -> String {
        format!(
            "{}{}{}",
            identifier,
            CANDIDATE_SEPARATOR,
            join_contents(&self.content_of(identifier))
        )
    }

    /// Output line for `identifier`: `identifier: content`, or `None` if nothing resolves.
    pub fn resolved_line(&self, identifier: &str) -> Option<String> {
        self.describe(identifier)
            .map(|content| format!("{}{}{}", identifier, RESOLVED_SEPARATOR, content))
    }

    /// The node at `path`, if every fragment resolves.
    ///
    /// A blank path is the root. Non-blank text without any identifier resolves to nothing.
    pub fn resolve(&self, path: &str) -> Option<&RegulationNode> {
        let fragments = self.grammar.tokenize(path);
        if fragments.is_empty() && !path.trim().is_empty() {
            return None;
        }

        match self.walk(path) {
            (chain, true) => Some(chain.last().copied().unwrap_or(&self.root)),
            _ => None,
        }
    }

    /// Returns `true` if `path` names an indexed node other than the root.
    pub fn contains(&self, path: &str) -> bool {
        !path.trim().is_empty() && self.resolve(path).is_some()
    }

    /// Nodes matched along `path`, and whether every fragment resolved.
    fn walk(&self, path: &str) -> (Vec<&RegulationNode>, bool) {
        let mut chain = Vec::new();
        let mut node = &self.root;

        'fragments: for fragment in self.grammar.tokenize(path) {
            loop {
                if let Some(child) = node.child(fragment) {
                    chain.push(child);
                    node = child;
                    continue 'fragments;
                }

                // A folded token passes through the nodes it extends.
                let through = node
                    .children()
                    .filter(|child| extends(fragment, child.fragment()))
                    .max_by_key(|child| child.fragment().len());
                match through {
                    Some(child) => {
                        chain.push(child);
                        node = child;
                    }
                    None => return (chain, false),
                }
            }
        }

        (chain, true)
    }
}

/// `token` continues `base` past an identifier boundary, as `164.502(a)` does `164.502`.
fn extends(token: &str, base: &str) -> bool {
    token.len() > base.len()
        && token.starts_with(base)
        && token[base.len()..]
            .chars()
            .next()
            .is_some_and(|c| !c.is_alphanumeric() && c != '_')
}

fn join_contents(contents: &[&str]) -> String {
    contents
        .iter()
        .filter(|content| !content.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn insert_entry(
    root: &mut RegulationNode,
    grammar: &IdentifierGrammar,
    text: &str,
    stats: &mut BuildStats,
) {
    let mut cursor = root;
    let mut path: Vec<&str> = Vec::new();

    for line in text.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(found) = grammar.match_line(line) else {
            stats.skipped_lines += 1;
            continue;
        };

        let fragments = &found.fragments[covered(&path, &found.fragments)..];
        let last = fragments.len() - 1;
        for (i, fragment) in fragments.iter().enumerate() {
            let content = if i == last { found.content.as_str() } else { "" };
            let (child, created) = cursor.child_or_insert(fragment, content);
            if created {
                stats.nodes += 1;
            }
            cursor = child;
        }
        path.extend_from_slice(fragments);
    }
}

/// Length of the longest leading part of `run` that `path` already ends with.
///
/// At least the run's last fragment is always left to insert.
fn covered(path: &[&str], run: &[&str]) -> usize {
    (1..run.len())
        .rev()
        .find(|&k| path.ends_with(&run[..k]))
        .unwrap_or(0)
}
