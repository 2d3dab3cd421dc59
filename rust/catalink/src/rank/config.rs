//! Configuration types and defaults for catalog ranking

use serde::{Deserialize, Serialize};

pub type Points = u32;

// =============================================================================
// Tier Weights
// =============================================================================

/// Points awarded per signal tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankWeights {
    /// Name equals the query. Default: 1000
    pub exact_name: Points,
    /// Name starts with the query. Default: 500
    pub name_prefix: Points,
    /// Name contains the query. Default: 100
    pub name_substring: Points,
    /// Aliases contain the query. Default: 50
    pub alias: Points,
    /// Short description contains the query. Default: 25
    pub short_description: Points,
    /// Per long-form field containing the query. Default: 10
    pub long_form: Points,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            exact_name: 1000,
            name_prefix: 500,
            name_substring: 100,
            alias: 50,
            short_description: 25,
            long_form: 10,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Which fields feed which tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    pub weights: RankWeights,
    /// Fields checked for the name tiers, all of them per tier
    pub name_fields: Vec<String>,
    pub alias_field: String,
    pub short_description_field: String,
    /// Long-form fields, each scored independently
    pub long_form_fields: Vec<String>,
    /// Any field whose name starts with this prefix is a written-guide
    /// section and scores like a long-form field. Empty disables.
    pub guide_section_prefix: String,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            weights: RankWeights::default(),
            name_fields: vec!["Display Name".to_string(), "code name".to_string()],
            alias_field: "Aliases".to_string(),
            short_description_field: "Short Description".to_string(),
            long_form_fields: [
                "Long Description",
                "Benefits",
                "Parent Skills",
                "Child Skills",
                "Alternatives",
                "Sub-Techniques",
                "Related Tools",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            guide_section_prefix: "Guide: ".to_string(),
        }
    }
}

impl RankConfig {
    /// Only the name tiers score; everything else is ignored
    pub fn names_only() -> Self {
        Self {
            weights: RankWeights {
                alias: 0,
                short_description: 0,
                long_form: 0,
                ..RankWeights::default()
            },
            long_form_fields: Vec::new(),
            guide_section_prefix: String::new(),
            ..Self::default()
        }
    }

    pub(crate) fn is_long_form(&self, field: &str) -> bool {
        self.long_form_fields.iter().any(|f| f == field)
            || (!self.guide_section_prefix.is_empty() && field.starts_with(&self.guide_section_prefix))
    }
}
