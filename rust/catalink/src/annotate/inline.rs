//! Inline linking within a single line
//!
//! Two passes over still-plain fragments: entity names (longest first), then
//! bare `http(s)://` URLs. Every segment borrows from the input line, so the
//! segment texts concatenate back to it exactly.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::sync::OnceLock;

use super::index::{Candidate, EntityIndex};
use crate::record::{Library, Record};

// =============================================================================
// Segment
// =============================================================================

/// One piece of a linked line
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    /// Untouched text
    Text(&'a str),
    /// Occurrence of a known catalog name, as written in the text
    Entity { text: &'a str, record: &'a Record },
    /// Bare URL; label and target are the same text
    Url(&'a str),
}

impl<'a> Segment<'a> {
    /// Literal text this segment covers
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Text(text) | Segment::Url(text) => *text,
            Segment::Entity { text, .. } => *text,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Segment::Text(_))
    }

    /// Target record for entity links
    pub fn record(&self) -> Option<&'a Record> {
        match self {
            Segment::Entity { record, .. } => Some(*record),
            _ => None,
        }
    }
}

/// Wire shape handed to the rendering layer
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum SegmentView<'a> {
    Text { text: &'a str },
    Entity { text: &'a str, id: &'a str, library: Library, label: &'a str },
    Link { url: &'a str },
}

impl Serialize for Segment<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let view = match self {
            Segment::Text(text) => SegmentView::Text { text },
            Segment::Entity { text, record } => SegmentView::Entity {
                text,
                id: record.id(),
                library: record.library(),
                label: record.display_name(),
            },
            Segment::Url(url) => SegmentView::Link { url },
        };
        view.serialize(serializer)
    }
}

// =============================================================================
// Word Boundaries
// =============================================================================

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Match must sit between non-word characters or fragment edges
fn is_word_bounded(hay: &str, start: usize, end: usize) -> bool {
    let before = hay[..start].chars().next_back();
    let after = hay[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Non-overlapping, left-to-right, word-bounded matches of `pattern`.
///
/// A rejected match only advances the search by one character so a valid
/// occurrence starting inside it is still found.
fn word_bounded_matches(pattern: &Regex, hay: &str) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut at = 0;

    while at <= hay.len() {
        let Some(m) = pattern.find_at(hay, at) else {
            break;
        };
        if m.start() == m.end() {
            break;
        }
        if is_word_bounded(hay, m.start(), m.end()) {
            found.push((m.start(), m.end()));
            at = m.end();
        } else {
            let step = hay[m.start()..].chars().next().map_or(1, char::len_utf8);
            at = m.start() + step;
        }
    }

    found
}

// =============================================================================
// Passes
// =============================================================================

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"))
}

/// Split a plain fragment around every occurrence of one candidate
fn split_on_candidate<'a>(
    fragment: &'a str,
    candidate: &Candidate,
    record: &'a Record,
    out: &mut Vec<Segment<'a>>,
) {
    let mut last = 0;
    for (start, end) in word_bounded_matches(candidate.pattern(), fragment) {
        if start > last {
            out.push(Segment::Text(&fragment[last..start]));
        }
        out.push(Segment::Entity { text: &fragment[start..end], record });
        last = end;
    }
    if last < fragment.len() {
        out.push(Segment::Text(&fragment[last..]));
    }
}

fn split_on_urls<'a>(fragment: &'a str, out: &mut Vec<Segment<'a>>) {
    let mut last = 0;
    for m in url_pattern().find_iter(fragment) {
        if m.start() > last {
            out.push(Segment::Text(&fragment[last..m.start()]));
        }
        out.push(Segment::Url(m.as_str()));
        last = m.end();
    }
    if last < fragment.len() {
        out.push(Segment::Text(&fragment[last..]));
    }
}

/// Link entity names, then URLs, inside one line.
///
/// `records` must be the slice `index` was built from.
pub fn link_line<'a>(
    line: &'a str,
    records: &'a [Record],
    index: &EntityIndex,
    link_urls: bool,
) -> Vec<Segment<'a>> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut segments = vec![Segment::Text(line)];
    let possible = index.possible_in(line);

    for (candidate, _) in index
        .candidates()
        .iter()
        .zip(possible)
        .filter(|(_, possible)| *possible)
    {
        let Some(record) = records.get(candidate.record) else {
            continue;
        };
        let hit = segments.iter().any(|s| match s {
            Segment::Text(text) => candidate.pattern().is_match(text),
            _ => false,
        });
        if !hit {
            continue;
        }

        let mut next = Vec::with_capacity(segments.len() + 2);
        for segment in segments {
            match segment {
                Segment::Text(text) => split_on_candidate(text, candidate, record, &mut next),
                linked => next.push(linked),
            }
        }
        segments = next;
    }

    if link_urls && segments.iter().any(|s| matches!(s, Segment::Text(t) if t.contains("http"))) {
        let mut next = Vec::with_capacity(segments.len() + 2);
        for segment in segments {
            match segment {
                Segment::Text(text) => split_on_urls(text, &mut next),
                linked => next.push(linked),
            }
        }
        segments = next;
    }

    segments
}

// =============================================================================
// Tests
// =============================================================================
