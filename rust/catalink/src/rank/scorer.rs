//! Tiered substring scoring and deterministic ordering

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{Points, RankConfig, RankWeights};
use crate::record::Record;

// =============================================================================
// Types
// =============================================================================

/// Which name tier a record hit. Tiers are exclusive: the best one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameTier {
    Exact,
    Prefix,
    Substring,
}

impl NameTier {
    pub fn points(&self, weights: &RankWeights) -> Points {
        match self {
            NameTier::Exact => weights.exact_name,
            NameTier::Prefix => weights.name_prefix,
            NameTier::Substring => weights.name_substring,
        }
    }
}

/// A record paired with its score for one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord<'a> {
    pub record: &'a Record,
    pub score: Points,
}

// =============================================================================
// Scoring
// =============================================================================

/// Trimmed, lower-cased query, or `None` for the browse-all case
pub fn normalize_query(query: &str) -> Option<String> {
    let q = query.trim().to_lowercase();
    (!q.is_empty()).then_some(q)
}

#[inline]
pub(crate) fn field_contains(value: &str, q: &str) -> bool {
    !value.is_empty() && value.to_lowercase().contains(q)
}

/// Best name tier across every configured name field
pub fn name_tier(record: &Record, q: &str, config: &RankConfig) -> Option<NameTier> {
    let names: Vec<String> = config
        .name_fields
        .iter()
        .map(|field| record.get(field).to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    if names.iter().any(|n| n == q) {
        Some(NameTier::Exact)
    } else if names.iter().any(|n| n.starts_with(q)) {
        Some(NameTier::Prefix)
    } else if names.iter().any(|n| n.contains(q)) {
        Some(NameTier::Substring)
    } else {
        None
    }
}

/// Score one record against a normalized query
pub fn score(record: &Record, q: &str, config: &RankConfig) -> Points {
    let weights = &config.weights;
    let mut total = name_tier(record, q, config).map_or(0, |tier| tier.points(weights));

    // Weights come from user config, so totals saturate instead of wrapping
    if field_contains(record.get(&config.alias_field), q) {
        total = total.saturating_add(weights.alias);
    }
    if field_contains(record.get(&config.short_description_field), q) {
        total = total.saturating_add(weights.short_description);
    }
    for (field, value) in record.fields() {
        if config.is_long_form(field) && field_contains(value, q) {
            total = total.saturating_add(weights.long_form);
        }
    }

    total
}

// =============================================================================
// Ranking
// =============================================================================

/// Rank with default tiers. Empty query returns every record in input order.
pub fn rank<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    rank_with(records, query, &RankConfig::default())
}

pub fn rank_with<'a>(records: &'a [Record], query: &str, config: &RankConfig) -> Vec<&'a Record> {
    match normalize_query(query) {
        None => records.iter().collect(),
        Some(q) => scored(records, &q, config)
            .into_iter()
            .map(|s| s.record)
            .collect(),
    }
}

/// Ranked records with their scores. For an empty query every record is
/// returned in input order with score 0.
pub fn rank_scored<'a>(records: &'a [Record], query: &str, config: &RankConfig) -> Vec<ScoredRecord<'a>> {
    match normalize_query(query) {
        None => records
            .iter()
            .map(|record| ScoredRecord { record, score: 0 })
            .collect(),
        Some(q) => scored(records, &q, config),
    }
}

fn scored<'a>(records: &'a [Record], q: &str, config: &RankConfig) -> Vec<ScoredRecord<'a>> {
    let start = instant::Instant::now();

    let mut results: Vec<ScoredRecord<'a>> = records
        .iter()
        .filter_map(|record| {
            let score = score(record, q, config);
            (score > 0).then_some(ScoredRecord { record, score })
        })
        .collect();

    // Stable: full ties keep input order
    results.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.record.numeric_id().cmp(&b.record.numeric_id()))
    });

    debug!(
        query = q,
        matched = results.len(),
        total = records.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "ranked records"
    );

    results
}

// =============================================================================
// Tests
// =============================================================================
