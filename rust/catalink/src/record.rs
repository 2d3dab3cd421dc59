//! Catalog records
//!
//! A record is a flat field-name → value mapping parsed from the catalog
//! export. Absent fields read as the empty string, so every accessor here
//! is total.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Field Names
// =============================================================================

pub const FIELD_ID: &str = "id";
pub const FIELD_DISPLAY_NAME: &str = "Display Name";
pub const FIELD_CODE_NAME: &str = "code name";
pub const FIELD_LIBRARY: &str = "Library";

// =============================================================================
// Library Discriminator
// =============================================================================

/// Which collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Library {
    Activities,
    Tools,
    Unknown,
}

impl Library {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Activities" => Library::Activities,
            "Tools" => Library::Tools,
            _ => Library::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Library::Activities => "activities",
            Library::Tools => "tools",
            Library::Unknown => "unknown",
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// One catalog entry (activity or tool)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }

    /// Field value, or "" when absent
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn id(&self) -> &str {
        self.get(FIELD_ID)
    }

    /// Sort key for the id. Non-numeric or missing ids sort as 0.
    pub fn numeric_id(&self) -> i64 {
        self.id().trim().parse().unwrap_or(0)
    }

    /// Canonical label: `Display Name`, falling back to `code name`
    pub fn display_name(&self) -> &str {
        match self.get(FIELD_DISPLAY_NAME) {
            "" => self.get(FIELD_CODE_NAME),
            name => name,
        }
    }

    pub fn library(&self) -> Library {
        Library::parse(self.get(FIELD_LIBRARY))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
