//! CatalogLinker - one handle per loaded catalog
//!
//! Owns the record list, configuration and an index cache so the browser
//! side can annotate every visible card without rebuilding the entity index
//! each time.
//!
//! # Usage (JavaScript)
//! ```javascript
//! import init, { CatalogLinker } from 'catalink';
//!
//! await init();
//! const linker = new CatalogLinker(null);
//! linker.hydrateExport(tsvText);
//! const blocks = linker.annotate(record['Long Description'], record.id);
//! const ids = linker.rank(searchBox.value);
//! ```

use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use tracing::debug;
use wasm_bindgen::prelude::*;

use super::export::parse_export;
use super::CatalogConfig;
use crate::annotate::{Annotation, CacheStats, IndexCache};
use crate::error::CatalogError;
use crate::rank::{explain, rank_scored, rank_with, ScoreExplanation};
use crate::record::Record;

/// Loaded-catalog status for the JS side
#[derive(Debug, Clone, Serialize)]
pub struct LinkerStatus {
    pub record_count: usize,
    pub cache: CacheStats,
    pub cache_hit_rate: f64,
}

#[wasm_bindgen]
pub struct CatalogLinker {
    records: Vec<Record>,
    config: CatalogConfig,
    cache: IndexCache,
}

impl Default for CatalogLinker {
    fn default() -> Self {
        Self::with_config(CatalogConfig::default())
    }
}

// ==================== NATIVE API ====================

impl CatalogLinker {
    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            records: Vec::new(),
            cache: IndexCache::new(config.annotate.clone()),
            config,
        }
    }

    pub fn try_with_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Replace the record list
    pub fn hydrate(&mut self, records: Vec<Record>) {
        debug!(records = records.len(), "hydrating catalog");
        self.records = records;
        self.cache.clear();
    }

    /// Parse a tab-separated export and load it. Returns the record count.
    pub fn hydrate_export(&mut self, tsv: &str) -> Result<usize, CatalogError> {
        let records = parse_export(tsv, &self.config.export)?;
        let count = records.len();
        self.hydrate(records);
        Ok(count)
    }

    /// Annotate `text`, never linking to `exclude_id`
    pub fn annotate<'a>(&'a mut self, text: &'a str, exclude_id: &str) -> Annotation<'a, 'a> {
        self.cache.annotate(text, &self.records, exclude_id)
    }

    pub fn rank(&self, query: &str) -> Vec<&Record> {
        rank_with(&self.records, query, &self.config.rank)
    }

    pub fn explain(&self, id: &str, query: &str) -> Result<ScoreExplanation, CatalogError> {
        let record = self
            .records
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| CatalogError::UnknownRecord(id.to_string()))?;
        Ok(explain(record, query, &self.config.rank))
    }

    pub fn status(&self) -> LinkerStatus {
        let cache = self.cache.stats();
        LinkerStatus {
            record_count: self.records.len(),
            cache_hit_rate: cache.hit_rate(),
            cache,
        }
    }
}

// ==================== JS BINDINGS ====================

/// Records are field maps; JS expects plain objects, not `Map`s
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&Serializer::json_compatible())
}

#[wasm_bindgen]
impl CatalogLinker {
    /// Create a linker with an optional JSON configuration object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CatalogLinker, JsValue> {
        let config: CatalogConfig = if config.is_null() || config.is_undefined() {
            CatalogConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| CatalogError::InvalidConfig(e.to_string()))?
        };
        Ok(Self::try_with_config(config)?)
    }

    /// Load records from an array of flat `{ field: value }` objects
    #[wasm_bindgen(js_name = hydrateRecords)]
    pub fn js_hydrate_records(&mut self, records: JsValue) -> Result<(), JsValue> {
        let records: Vec<Record> = serde_wasm_bindgen::from_value(records)
            .map_err(|e| JsValue::from_str(&format!("Invalid records: {}", e)))?;
        self.hydrate(records);
        Ok(())
    }

    /// Load records from the tab-separated export text
    #[wasm_bindgen(js_name = hydrateExport)]
    pub fn js_hydrate_export(&mut self, tsv: &str) -> Result<usize, JsValue> {
        Ok(self.hydrate_export(tsv)?)
    }

    #[wasm_bindgen(js_name = recordCount)]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Annotate a text field; returns an array of blocks
    #[wasm_bindgen(js_name = annotate)]
    pub fn js_annotate(&mut self, text: &str, exclude_id: &str) -> JsValue {
        let start = instant::Instant::now();
        let blocks: Vec<_> = self.annotate(text, exclude_id).collect();
        let result = to_js(&blocks);
        debug!(
            blocks = blocks.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "annotated text"
        );

        match result {
            Ok(v) => v,
            Err(e) => {
                web_sys::console::error_1(&format!("[CatalogLinker] Serialization failed: {:?}", e).into());
                JsValue::NULL
            }
        }
    }

    /// Ranked record ids for `query`
    #[wasm_bindgen(js_name = rank)]
    pub fn js_rank(&self, query: &str) -> js_sys::Array {
        self.rank(query)
            .into_iter()
            .map(|record| JsValue::from_str(record.id()))
            .collect()
    }

    /// Ranked `{ record, score }` pairs for `query`
    #[wasm_bindgen(js_name = rankRecords)]
    pub fn js_rank_records(&self, query: &str) -> Result<JsValue, JsValue> {
        let scored = rank_scored(&self.records, query, &self.config.rank);
        Ok(to_js(&scored)?)
    }

    /// Score breakdown for one record
    #[wasm_bindgen(js_name = explain)]
    pub fn js_explain(&self, id: &str, query: &str) -> Result<JsValue, JsValue> {
        let explanation = self.explain(id, query)?;
        Ok(to_js(&explanation)?)
    }

    #[wasm_bindgen(js_name = getStatus)]
    pub fn js_get_status(&self) -> Result<JsValue, JsValue> {
        Ok(to_js(&self.status())?)
    }
}

// ==================== TESTS ====================
