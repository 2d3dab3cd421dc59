//! IndexCache: memoized entity indexes
//!
//! Keyed by a content hash of the record list plus the excluded id. Any
//! change to the records drops every cached index, so annotating through
//! the cache gives exactly what a fresh `annotate` call would.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tracing::trace;

use super::blocks::Annotation;
use super::config::AnnotateConfig;
use super::index::EntityIndex;
use crate::record::Record;

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        (self.hits as f64 / total as f64) * 100.0
    }
}

fn fingerprint(records: &[Record]) -> u64 {
    let mut hasher = DefaultHasher::new();
    records.hash(&mut hasher);
    hasher.finish()
}

pub struct IndexCache {
    config: AnnotateConfig,
    fingerprint: Option<u64>,
    entries: HashMap<String, EntityIndex>,
    hits: u64,
    misses: u64,
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::new(AnnotateConfig::default())
    }
}

impl IndexCache {
    pub fn new(config: AnnotateConfig) -> Self {
        Self {
            config,
            fingerprint: None,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn config(&self) -> &AnnotateConfig {
        &self.config
    }

    /// Replace settings; cached indexes were built with the old ones
    pub fn set_config(&mut self, config: AnnotateConfig) {
        self.config = config;
        self.clear();
    }

    fn ensure(&mut self, records: &[Record], exclude_id: &str) {
        let current = fingerprint(records);
        if self.fingerprint != Some(current) {
            if !self.entries.is_empty() {
                trace!(dropped = self.entries.len(), "record list changed, dropping indexes");
            }
            self.entries.clear();
            self.fingerprint = Some(current);
        }

        if self.entries.contains_key(exclude_id) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let index = EntityIndex::build(records, exclude_id, &self.config);
            self.entries.insert(exclude_id.to_string(), index);
        }
    }

    /// Index for `(records, exclude_id)`, building it on first use
    pub fn index_for(&mut self, records: &[Record], exclude_id: &str) -> &EntityIndex {
        self.ensure(records, exclude_id);
        &self.entries[exclude_id]
    }

    /// Same result as `annotate_with(text, records, exclude_id, config)`
    pub fn annotate<'a, 'i>(
        &'i mut self,
        text: &'a str,
        records: &'a [Record],
        exclude_id: &str,
    ) -> Annotation<'a, 'i> {
        self.ensure(records, exclude_id);
        let this: &'i Self = self;
        Annotation::new(
            text,
            records,
            Cow::Borrowed(&this.entries[exclude_id]),
            Cow::Borrowed(&this.config),
        )
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.fingerprint = None;
    }
}
