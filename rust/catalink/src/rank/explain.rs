//! Per-record score breakdown for debugging search results

use serde::Serialize;

use super::config::{Points, RankConfig};
use super::scorer::{field_contains, name_tier, normalize_query, NameTier};
use crate::record::Record;

/// Which tiers fired for one record and query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreExplanation {
    pub record_id: String,
    pub query: String,
    pub name_tier: Option<NameTier>,
    pub name_points: Points,
    pub alias_hit: bool,
    pub short_description_hit: bool,
    /// Long-form and guide fields that contained the query
    pub long_form_hits: Vec<String>,
    pub total: Points,
}

pub fn explain(record: &Record, query: &str, config: &RankConfig) -> ScoreExplanation {
    let weights = &config.weights;
    let mut explanation = ScoreExplanation {
        record_id: record.id().to_string(),
        query: query.trim().to_lowercase(),
        name_tier: None,
        name_points: 0,
        alias_hit: false,
        short_description_hit: false,
        long_form_hits: Vec::new(),
        total: 0,
    };

    let Some(q) = normalize_query(query) else {
        return explanation;
    };

    explanation.name_tier = name_tier(record, &q, config);
    explanation.name_points = explanation.name_tier.map_or(0, |t| t.points(weights));
    explanation.alias_hit = field_contains(record.get(&config.alias_field), &q);
    explanation.short_description_hit = field_contains(record.get(&config.short_description_field), &q);
    explanation.long_form_hits = record
        .fields()
        .filter(|(field, value)| config.is_long_form(field) && field_contains(value, &q))
        .map(|(field, _)| field.to_string())
        .collect();

    let long_form_count = Points::try_from(explanation.long_form_hits.len()).unwrap_or(Points::MAX);
    explanation.total = explanation
        .name_points
        .saturating_add(if explanation.alias_hit { weights.alias } else { 0 })
        .saturating_add(if explanation.short_description_hit { weights.short_description } else { 0 })
        .saturating_add(weights.long_form.saturating_mul(long_form_count));

    explanation
}
