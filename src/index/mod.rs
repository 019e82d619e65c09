//! Corpus-level index combining the trie and the BM25 ranker.
//!
//! Records are keyed by their normalized regulation id (trimmed, lower-cased). A key seen
//! twice keeps its first position and takes the later record's body.

pub mod error;
pub mod record;


pub use error::{IndexError, IndexResult};
pub use record::CorpusRecord;

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::bm25::{Bm25Params, Bm25Ranker, Document};
use crate::constants::{CANDIDATE_JOINER, CANDIDATE_SEPARATOR, RESOLVED_SEPARATOR};
use crate::grammar::{Domain, IdentifierGrammar};
use crate::trie::RegulationTrie;

#[derive(Debug, Clone)]
struct IndexedRecord {
    key: String,
    content: String,
    context: String,
    text: Option<String>,
}

/// Immutable lookup structures over one regulation corpus.
#[derive(Debug, Clone)]
pub struct RegulationIndex {
    records: Vec<IndexedRecord>,
    positions: HashMap<String, usize>,
    trie: RegulationTrie,
    bm25: Bm25Ranker,
}

impl RegulationIndex {
    pub fn build<I>(records: I, grammar: IdentifierGrammar, params: Bm25Params) -> IndexResult<Self>
    where
        I: IntoIterator<Item = CorpusRecord>,
    {
        params
            .validate()
            .map_err(|reason| IndexError::InvalidParams { reason })?;

        let mut indexed: Vec<IndexedRecord> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for record in records {
            let key = normalize_key(&record.regulation_id);
            let entry = IndexedRecord {
                context: record.regulation_content.trim().replace('\n', " "),
                content: record.regulation_content,
                text: record.text,
                key: key.clone(),
            };
            match positions.get(&key) {
                Some(&i) => {
                    debug!(key = %key, "Duplicate regulation key, keeping latest body");
                    indexed[i] = entry;
                }
                None => {
                    positions.insert(key, indexed.len());
                    indexed.push(entry);
                }
            }
        }

        let trie = RegulationTrie::build(indexed.iter().map(|r| r.content.as_str()), grammar);
        let documents = indexed
            .iter()
            .map(|r| Document::from_text(r.key.clone(), &r.context))
            .collect();
        let bm25 = Bm25Ranker::build(documents, params);

        info!(
            records = indexed.len(),
            trie_nodes = trie.len(),
            "Regulation index ready"
        );

        Ok(Self {
            records: indexed,
            positions,
            trie,
            bm25,
        })
    }

    /// Indexes `records` with the preset grammar for `domain`.
    pub fn for_domain<I>(records: I, domain: Domain, params: Bm25Params) -> IndexResult<Self>
    where
        I: IntoIterator<Item = CorpusRecord>,
    {
        Self::build(records, IdentifierGrammar::preset(domain)?, params)
    }

    /// Parses a JSON corpus (see [`CorpusRecord::from_json`]) and indexes it.
    pub fn from_json(json: &str, grammar: IdentifierGrammar, params: Bm25Params) -> IndexResult<Self> {
        Self::build(CorpusRecord::from_json(json)?, grammar, params)
    }

    pub fn trie(&self) -> &RegulationTrie {
        &self.trie
    }

    pub fn bm25(&self) -> &Bm25Ranker {
        &self.bm25
    }

    /// Number of distinct regulation keys.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalized keys in corpus order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    /// `identifier: content` for an identifier the trie resolves.
    pub fn resolve(&self, identifier: &str) -> Option<String> {
        self.trie.resolved_line(identifier)
    }

    /// Resolved lines for `identifiers` in order, without repeats. Misses are dropped.
    pub fn resolve_all<S: AsRef<str>>(&self, identifiers: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        identifiers
            .iter()
            .filter_map(|id| {
                let line = self.resolve(id.as_ref());
                if line.is_none() {
                    debug!(identifier = id.as_ref(), "Identifier did not resolve, dropping");
                }
                line
            })
            .filter(|line| seen.insert(line.clone()))
            .collect()
    }

    /// Children of every identifier in `parents`, deduplicated in first-seen order.
    pub fn frontier_children<S: AsRef<str>>(&self, parents: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        parents
            .iter()
            .flat_map(|parent| self.trie.children_of(parent.as_ref()))
            .filter(|child| seen.insert(child.clone()))
            .collect()
    }

    /// Oracle-facing candidate text for the children of `parents`.
    pub fn candidates_under<S: AsRef<str>>(&self, parents: &[S]) -> String {
        self.frontier_children(parents)
            .iter()
            .map(|child| self.trie.candidate_line(child))
            .collect::<Vec<_>>()
            .join(CANDIDATE_JOINER)
    }

    /// BM25 top-`k` records for `query`, rendered `key - context`.
    pub fn search_related(&self, query: &str, k: usize) -> Vec<String> {
        self.bm25
            .search(query, k)
            .into_iter()
            .filter_map(|(_, i)| self.records.get(i))
            .map(|r| format!("{}{}{}", r.key, CANDIDATE_SEPARATOR, r.context))
            .collect()
    }

    /// Direct lookup of a whole section by key, rendered `section: text`.
    ///
    /// A leading `§` is ignored. Records without a separate text fall back to their content.
    pub fn lookup_section(&self, section: &str) -> Option<String> {
        let key = normalize_key(section.trim().trim_start_matches('§'));
        let record = &self.records[*self.positions.get(&key)?];
        let body = record.text.as_deref().unwrap_or(&record.context);
        Some(format!("{}{}{}", key, RESOLVED_SEPARATOR, body.trim()))
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}
