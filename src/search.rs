//! Substring search over the snapshot cache

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cache::{ItemRecord, Snapshot, SnapshotCache};
use crate::error::Result;

/// Matched records keyed by category, then by item
pub type SearchResults = BTreeMap<String, BTreeMap<String, ItemRecord>>;

/// Which record fields a search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFields {
    pub title: bool,
    pub keywords: bool,
    pub description: bool,
}

impl Default for SearchFields {
    fn default() -> Self {
        Self {
            title: true,
            keywords: true,
            description: true,
        }
    }
}

/// A search phrase with its options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub phrase: String,
    pub case_sensitive: bool,
    pub fields: SearchFields,
}

impl SearchQuery {
    /// Case-insensitive search over every field
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            case_sensitive: false,
            fields: SearchFields::default(),
        }
    }

    /// Search restricted to keywords
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self::new(keyword).with_fields(SearchFields {
            title: false,
            keywords: true,
            description: false,
        })
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_fields(mut self, fields: SearchFields) -> Self {
        self.fields = fields;
        self
    }

    fn matches(&self, needle: &str, haystack: &str) -> bool {
        if self.case_sensitive {
            haystack.contains(needle)
        } else {
            haystack.to_lowercase().contains(needle)
        }
    }

    /// Whether any enabled field of the record contains the phrase
    pub fn matches_record(&self, record: &ItemRecord) -> bool {
        let phrase = self.phrase.trim();
        let needle = if self.case_sensitive {
            phrase.to_string()
        } else {
            phrase.to_lowercase()
        };

        (self.fields.title && self.matches(&needle, &record.title))
            || (self.fields.keywords && record.keywords.iter().any(|k| self.matches(&needle, k)))
            || (self.fields.description && self.matches(&needle, &record.description))
    }
}

/// Run a query against an already loaded snapshot.
///
/// An empty phrase matches nothing.
pub fn search_snapshot(snapshot: &Snapshot, query: &SearchQuery) -> SearchResults {
    let mut results = SearchResults::new();
    if query.phrase.trim().is_empty() {
        return results;
    }

    for record in snapshot.records.iter().filter(|r| query.matches_record(r)) {
        results
            .entry(record.category.clone())
            .or_default()
            .insert(record.script.clone(), record.clone());
    }
    results
}

/// Search engine reading through the snapshot cache
pub struct SearchEngine<'a> {
    cache: &'a SnapshotCache,
}

impl<'a> SearchEngine<'a> {
    pub fn new(cache: &'a SnapshotCache) -> Self {
        Self { cache }
    }

    /// Load the current snapshot (rebuilding it if expired) and search it
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        let snapshot = self.cache.get_snapshot()?;
        let results = search_snapshot(&snapshot, query);
        tracing::debug!(
            phrase = %query.phrase,
            categories = results.len(),
            "Search finished"
        );
        Ok(results)
    }
}

/// Number of records across all categories
pub fn result_count(results: &SearchResults) -> usize {
    results.values().map(BTreeMap::len).sum()
}
