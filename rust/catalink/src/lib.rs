//! Catalink: Entity-Aware Annotation + Tiered Catalog Search
//!
//! A Rust/WASM core for the activities & tools catalog browser.
//!
//! # Architecture
//!
//! ## Annotation
//! - `annotate/index.rs` - EntityIndex: known names, longest first, self/"other" excluded
//! - `annotate/inline.rs` - Entity pass + URL pass over one line, lossless segments
//! - `annotate/blocks.rs` - Lazy paragraph / bullet list / spacer splitting
//! - `annotate/cache.rs` - IndexCache: memoized indexes per (records, excluded id)
//!
//! ## Search
//! - `rank/config.rs` - Tier weights and field lists
//! - `rank/scorer.rs` - Exclusive name tiers + additive field tiers, id tie-break
//! - `rank/explain.rs` - Per-record score breakdown
//!
//! ## Catalog
//! - `record.rs` - Flat field map with total accessors
//! - `catalog/export.rs` - Tab-separated export parsing
//! - `catalog/linker.rs` - CatalogLinker: the WASM-facing handle
//!
//! # Usage (Rust)
//! ```
//! use catalink::{annotate, rank, Record, Segment};
//!
//! let records = vec![
//!     Record::new().with("id", "1").with("Display Name", "Go"),
//!     Record::new().with("id", "2").with("Display Name", "Go Pro"),
//! ];
//!
//! let linked: Vec<&str> = annotate("I use Go Pro daily", &records, "")
//!     .flat_map(|block| block.segments().filter_map(Segment::record).map(Record::id).collect::<Vec<_>>())
//!     .collect();
//! assert_eq!(linked, vec!["2"]);
//!
//! let ranked: Vec<&str> = rank(&records, "go").into_iter().map(Record::id).collect();
//! assert_eq!(ranked, vec!["1", "2"]);
//! ```

pub mod annotate;
pub mod catalog;
pub mod error;
pub mod rank;
pub mod record;

pub use annotate::{
    annotate, annotate_with, Annotation, AnnotateConfig, Block, CacheStats, EntityIndex,
    IndexCache, Segment,
};
pub use catalog::{
    parse_export, split_libraries, CatalogConfig, CatalogLinker, ExportConfig, LibrarySplit,
    LinkerStatus,
};
pub use error::CatalogError;
pub use rank::{
    explain, rank, rank_scored, rank_with, NameTier, RankConfig, RankWeights, ScoreExplanation,
    ScoredRecord,
};
pub use record::{Library, Record};

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Install panic hook and route `tracing` output to the browser console
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("catalink v{}", env!("CARGO_PKG_VERSION"))
}
