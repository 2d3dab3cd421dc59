//! Block splitting: paragraphs, single-level bullet lists, blank spacers
//!
//! `Annotation` is a lazy iterator over blocks. Lines are linked as they are
//! pulled, so a caller that only renders a preview pays for what it reads.

use serde::Serialize;
use std::borrow::Cow;
use std::str::Split;

use super::config::AnnotateConfig;
use super::index::EntityIndex;
use super::inline::{link_line, Segment};
use crate::record::Record;

/// Block-level node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block<'a> {
    Paragraph { segments: Vec<Segment<'a>> },
    List { items: Vec<Vec<Segment<'a>>> },
    Spacer,
}

impl<'a> Block<'a> {
    /// Every inline segment in this block, in order
    pub fn segments(&self) -> Box<dyn Iterator<Item = &Segment<'a>> + '_> {
        match self {
            Block::Paragraph { segments } => Box::new(segments.iter()),
            Block::List { items } => Box::new(items.iter().flatten()),
            Block::Spacer => Box::new(std::iter::empty()),
        }
    }
}

/// Lazy block sequence for one text blob
pub struct Annotation<'a, 'i> {
    /// Every `\n`-separated line, trailing empty one included
    lines: Split<'a, char>,
    records: &'a [Record],
    index: Cow<'i, EntityIndex>,
    config: Cow<'i, AnnotateConfig>,
    pending_items: Vec<Vec<Segment<'a>>>,
    queued: Option<Block<'a>>,
    emitted: bool,
}

impl<'a, 'i> Annotation<'a, 'i> {
    pub(crate) fn new(
        text: &'a str,
        records: &'a [Record],
        index: Cow<'i, EntityIndex>,
        config: Cow<'i, AnnotateConfig>,
    ) -> Self {
        Self {
            lines: text.split('\n'),
            records,
            index,
            config,
            pending_items: Vec::new(),
            queued: None,
            emitted: false,
        }
    }

    pub fn index(&self) -> &EntityIndex {
        &self.index
    }

    fn link(&self, text: &'a str) -> Vec<Segment<'a>> {
        link_line(text, self.records, &self.index, self.config.link_urls)
    }

    fn flush_list(&mut self) -> Option<Block<'a>> {
        if self.pending_items.is_empty() {
            return None;
        }
        Some(Block::List {
            items: std::mem::take(&mut self.pending_items),
        })
    }

    fn emit(&mut self, block: Block<'a>) -> Option<Block<'a>> {
        self.emitted = true;
        Some(block)
    }
}

impl<'a> Iterator for Annotation<'a, '_> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        if let Some(block) = self.queued.take() {
            return self.emit(block);
        }

        loop {
            let Some(line) = self.lines.next() else {
                let list = self.flush_list()?;
                return self.emit(list);
            };

            let trimmed = line.trim();
            if let Some(item) = self.config.strip_list_marker(trimmed) {
                let segments = self.link(item);
                self.pending_items.push(segments);
                continue;
            }

            let list = self.flush_list();
            let block = if trimmed.is_empty() {
                if !self.emitted && list.is_none() {
                    continue;
                }
                Block::Spacer
            } else {
                Block::Paragraph {
                    segments: self.link(trimmed),
                }
            };

            return match list {
                Some(list) => {
                    self.queued = Some(block);
                    self.emit(list)
                }
                None => self.emit(block),
            };
        }
    }
}
