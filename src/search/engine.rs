//! Search engine - evaluates compiled queries against a corpus
//!
//! - `search`: pure evaluation over a corpus snapshot (no I/O)
//! - `SearchEngine`: fetches the corpus from a record store, then evaluates
//!
//! A record matches when any searched field matches either the literal or
//! the phonetic pattern. Results keep corpus order, appear once each and
//! stop at `RESULT_CAP`.

use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

use super::literal::LiteralPattern;
use super::phonetic::PhoneticPattern;
use super::schema::{MatchOptions, SearchField, Searchable, RESULT_CAP};
use crate::models::Book;
use crate::store::{BookFilter, RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search backend unavailable: {0}")]
    BackendUnavailable(#[source] StoreError),
}

/// Both patterns for one query
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    literal: LiteralPattern,
    phonetic: PhoneticPattern,
}

impl CompiledQuery {
    pub fn compile(query: &str, options: &MatchOptions) -> Self {
        Self {
            literal: LiteralPattern::compile(query, options),
            phonetic: PhoneticPattern::compile(query, options),
        }
    }

    pub fn literal(&self) -> &LiteralPattern {
        &self.literal
    }

    pub fn phonetic(&self) -> &PhoneticPattern {
        &self.phonetic
    }

    pub fn matches_text(&self, text: &str) -> bool {
        self.literal.is_match(text) || self.phonetic.is_match(text)
    }

    pub fn matches<R: Searchable>(&self, record: &R, fields: &[SearchField]) -> bool {
        fields
            .iter()
            .any(|field| self.matches_text(record.search_text(*field)))
    }
}

/// Insertion-ordered, deduplicated, capped result set
#[derive(Debug)]
pub struct MatchResultSet<'a, R> {
    cap: usize,
    records: Vec<&'a R>,
    seen: HashSet<&'a str>,
}

impl<'a, R: Searchable> MatchResultSet<'a, R> {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            records: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Add a record; returns false if it was already present or the set is full
    pub fn insert(&mut self, record: &'a R) -> bool {
        if self.is_full() || !self.seen.insert(record.search_id()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[&'a R] {
        &self.records
    }

    pub fn into_records(self) -> Vec<&'a R> {
        self.records
    }
}

/// Evaluate a query against a corpus snapshot
///
/// Only the empty string means "no search". Whitespace is a gap that matches
/// any text. Scanning stops as soon as the cap is reached, so the result is
/// the first `RESULT_CAP` matches in corpus order.
pub fn search<'a, R: Searchable>(
    query: &str,
    corpus: &'a [R],
    fields: &[SearchField],
    options: &MatchOptions,
) -> MatchResultSet<'a, R> {
    let mut results = MatchResultSet::new(RESULT_CAP);
    if query.is_empty() {
        return results;
    }

    let compiled = CompiledQuery::compile(query, options);
    tracing::debug!(
        "Query: {} -> phonetic pattern: {}{}",
        query,
        compiled.phonetic().as_str(),
        if compiled.phonetic().is_fallback() { " (literal fallback)" } else { "" }
    );

    for record in corpus {
        if results.is_full() {
            break;
        }
        if compiled.matches(record, fields) {
            results.insert(record);
        }
    }

    results
}

/// Store-backed search entry point
pub struct SearchEngine {
    store: Arc<dyn RecordStore>,
    fields: Vec<SearchField>,
    options: MatchOptions,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            fields: SearchField::DEFAULT.to_vec(),
            options: MatchOptions::default(),
        }
    }

    pub fn with_fields(mut self, fields: &[SearchField]) -> Self {
        self.fields = fields.to_vec();
        self
    }

    /// Search books; an empty query returns nothing without reading the store
    pub async fn search(&self, query: &str) -> Result<Vec<Book>, SearchError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let corpus = self
            .store
            .find(&BookFilter::default())
            .await
            .map_err(|e| {
                tracing::error!("Search corpus fetch failed ({}): {}", self.store.name(), e);
                SearchError::BackendUnavailable(e)
            })?;

        let results = search(query, &corpus, &self.fields, &self.options);
        tracing::debug!("Search {:?}: {} of {} books matched", query, results.len(), corpus.len());

        Ok(results.into_records().into_iter().cloned().collect())
    }
}
