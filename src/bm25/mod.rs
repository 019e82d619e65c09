//! Okapi BM25 ranking over a fixed corpus.
//!
//! All corpus statistics are computed once in [`Bm25Ranker::build`]. Scoring walks the
//! postings of each query term, so query cost grows with query length times the number of
//! matching documents rather than with corpus size.
//!
//! ```text
//! score(d, q) = Σ IDF(t) · f(t,d)·(k1+1) / (f(t,d) + k1·(1 − b + b·|d|/avgdl))
//! IDF(t)      = ln((N − n_t + 0.5) / (n_t + 0.5) + 1)
//! ```

pub mod config;


pub use config::Bm25Params;

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

/// Splits text into BM25 terms (whitespace separated, case preserved).
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// A corpus document: its regulation key and tokenized content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub key: String,
    pub tokens: Vec<String>,
}

impl Document {
    pub fn new(key: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            key: key.into(),
            tokens,
        }
    }

    /// Builds a document by whitespace-tokenizing `text`.
    pub fn from_text(key: impl Into<String>, text: &str) -> Self {
        Self::new(key, tokenize(text))
    }
}

#[derive(Debug, Clone, Copy)]
struct Posting {
    doc: usize,
    tf: u32,
}

#[derive(Debug, Clone)]
struct TermEntry {
    idf: f64,
    postings: Vec<Posting>,
}

/// Precomputed BM25 index.
#[derive(Debug, Clone)]
pub struct Bm25Ranker {
    params: Bm25Params,
    documents: Vec<Document>,
    doc_lengths: Vec<usize>,
    avgdl: f64,
    terms: HashMap<String, TermEntry>,
}

impl Bm25Ranker {
    /// Indexes `documents` in the given order; that order breaks score ties.
    pub fn build(documents: Vec<Document>, params: Bm25Params) -> Self {
        let doc_count = documents.len();
        let doc_lengths: Vec<usize> = documents.iter().map(|d| d.tokens.len()).collect();
        let total_len: usize = doc_lengths.iter().sum();
        let avgdl = if doc_count == 0 {
            0.0
        } else {
            total_len as f64 / doc_count as f64
        };

        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        for (doc, document) in documents.iter().enumerate() {
            let mut frequencies: HashMap<&str, u32> = HashMap::new();
            for token in &document.tokens {
                *frequencies.entry(token.as_str()).or_insert(0) += 1;
            }
            for (term, tf) in frequencies {
                postings
                    .entry(term.to_string())
                    .or_default()
                    .push(Posting { doc, tf });
            }
        }

        let n = doc_count as f64;
        let terms = postings
            .into_iter()
            .map(|(term, mut postings)| {
                postings.sort_by_key(|p| p.doc);
                let n_t = postings.len() as f64;
                let idf = ((n - n_t + 0.5) / (n_t + 0.5) + 1.0).ln();
                (term, TermEntry { idf, postings })
            })
            .collect::<HashMap<_, _>>();

        debug!(
            documents = doc_count,
            vocabulary = terms.len(),
            avgdl = avgdl,
            "BM25 index built"
        );

        Self {
            params,
            documents,
            doc_lengths,
            avgdl,
            terms,
        }
    }

    /// Convenience constructor over `(key, text)` pairs.
    pub fn from_texts<I, K, T>(texts: I, params: Bm25Params) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: AsRef<str>,
    {
        let documents = texts
            .into_iter()
            .map(|(key, text)| Document::from_text(key, text.as_ref()))
            .collect();
        Self::build(documents, params)
    }

    pub fn params(&self) -> Bm25Params {
        self.params
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Average document length in tokens.
    pub fn avgdl(&self) -> f64 {
        self.avgdl
    }

    pub fn document(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.terms.get(term).map_or(0, |t| t.postings.len())
    }

    /// Inverse document frequency of `term` (a term absent from the corpus gets the maximum).
    pub fn idf(&self, term: &str) -> f64 {
        match self.terms.get(term) {
            Some(entry) => entry.idf,
            None => {
                let n = self.documents.len() as f64;
                ((n + 0.5) / 0.5 + 1.0).ln()
            }
        }
    }

    /// Scores every document against `query`, returning `(score, document_index)` in corpus
    /// order. Repeated query terms contribute once per occurrence.
    pub fn get_scores<S: AsRef<str>>(&self, query: &[S]) -> Vec<(f64, usize)> {
        let mut scores = vec![0.0; self.documents.len()];
        let Bm25Params { k1, b } = self.params;

        for term in query {
            let Some(entry) = self.terms.get(term.as_ref()) else {
                continue;
            };
            for posting in &entry.postings {
                let tf = posting.tf as f64;
                let len_ratio = self.doc_lengths[posting.doc] as f64 / self.avgdl;
                let norm = tf + k1 * (1.0 - b + b * len_ratio);
                scores[posting.doc] += entry.idf * tf * (k1 + 1.0) / norm;
            }
        }

        scores
            .into_iter()
            .enumerate()
            .map(|(index, score)| (score, index))
            .collect()
    }

    /// Score of a single document, or `None` if `index` is out of range.
    pub fn score<S: AsRef<str>>(&self, query: &[S], index: usize) -> Option<f64> {
        let doc_len = *self.doc_lengths.get(index)? as f64;
        let Bm25Params { k1, b } = self.params;

        let score = query
            .iter()
            .filter_map(|term| self.terms.get(term.as_ref()))
            .filter_map(|entry| {
                let i = entry
                    .postings
                    .binary_search_by_key(&index, |p| p.doc)
                    .ok()?;
                let tf = entry.postings[i].tf as f64;
                let norm = tf + k1 * (1.0 - b + b * doc_len / self.avgdl);
                Some(entry.idf * tf * (k1 + 1.0) / norm)
            })
            .sum();

        Some(score)
    }

    /// The `k` best `(score, document_index)` pairs, highest first.
    ///
    /// The sort is stable: documents with equal scores keep corpus order.
    pub fn top_k<S: AsRef<str>>(&self, query: &[S], k: usize) -> Vec<(f64, usize)> {
        let mut scored = self.get_scores(query);
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        scored
    }

    /// [`top_k`](Self::top_k) over a whitespace-tokenized query string.
    pub fn search(&self, query: &str, k: usize) -> Vec<(f64, usize)> {
        self.top_k(&tokenize(query), k)
    }
}
