//! Entity-aware text annotation
//!
//! Turns a free-text field into blocks of plain text, links to other catalog
//! entries (matched by display name) and external URLs.
//!
//! ```ignore
//! let blocks: Vec<Block> = annotate(description, &records, current.id()).collect();
//! ```

pub mod blocks;
pub mod cache;
pub mod config;
pub mod index;
pub mod inline;

pub use blocks::*;
pub use cache::*;
pub use config::*;
pub use index::*;
pub use inline::*;

use std::borrow::Cow;

use crate::record::Record;

/// Annotate `text` against `records` with default settings.
///
/// The record whose id equals `exclude_id` is never linked. Empty text
/// yields no blocks.
pub fn annotate<'a>(
    text: &'a str,
    records: &'a [Record],
    exclude_id: &str,
) -> Annotation<'a, 'static> {
    annotate_with(text, records, exclude_id, AnnotateConfig::default())
}

/// Annotate with explicit settings. Builds a fresh index for this call.
pub fn annotate_with<'a>(
    text: &'a str,
    records: &'a [Record],
    exclude_id: &str,
    config: AnnotateConfig,
) -> Annotation<'a, 'static> {
    let index = EntityIndex::build(records, exclude_id, &config);
    Annotation::new(text, records, Cow::Owned(index), Cow::Owned(config))
}
