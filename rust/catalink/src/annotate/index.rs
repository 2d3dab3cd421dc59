//! EntityIndex: known catalog names, ordered for longest-first linking
//!
//! Built fresh from the record list for every annotation pass (or pulled
//! from an `IndexCache`). Each candidate carries a compiled case-insensitive
//! literal pattern; an Aho-Corasick automaton over the ASCII names lets the
//! linker skip candidates that cannot occur in a line at all.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::config::AnnotateConfig;
use crate::record::Record;

// =============================================================================
// Types
// =============================================================================

/// One linkable name
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Lower-cased display name
    pub name: String,
    /// Position of the target record in the slice the index was built from
    pub record: usize,
    pattern: Regex,
}

impl Candidate {
    pub(crate) fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

/// Lower-cased display name → record, sorted by descending name length
#[derive(Debug, Clone)]
pub struct EntityIndex {
    candidates: Vec<Candidate>,
    by_name: HashMap<String, usize>,
    prefilter: Option<AhoCorasick>,
    /// Automaton pattern id → candidate position
    prefilter_slots: Vec<usize>,
    /// Length of the record slice this index addresses
    source_len: usize,
}

// =============================================================================
// Build
// =============================================================================

impl EntityIndex {
    /// Build the index for `records`, skipping the record with `exclude_id`
    /// (an empty `exclude_id` excludes nothing) and ignored names.
    ///
    /// When two records share a lower-cased display name the later one takes
    /// the slot; the earlier one becomes unreachable for linking.
    pub fn build(records: &[Record], exclude_id: &str, config: &AnnotateConfig) -> Self {
        // Insertion-ordered slots so equal-length names keep record order
        let mut slots: Vec<(String, usize)> = Vec::new();
        let mut slot_of: HashMap<String, usize> = HashMap::new();

        for (position, record) in records.iter().enumerate() {
            if !exclude_id.is_empty() && record.id() == exclude_id {
                continue;
            }
            let name = record.display_name();
            if name.trim().is_empty() {
                continue;
            }
            let lower = name.to_lowercase();
            if config.is_ignored(&lower) {
                continue;
            }

            match slot_of.get(&lower) {
                Some(&slot) => {
                    warn!(
                        name = %lower,
                        previous_id = records[slots[slot].1].id(),
                        winning_id = record.id(),
                        "duplicate display name, later record wins"
                    );
                    slots[slot].1 = position;
                }
                None => {
                    slot_of.insert(lower.clone(), slots.len());
                    slots.push((lower, position));
                }
            }
        }

        // Stable: ties stay in first-seen order
        slots.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

        let mut candidates = Vec::with_capacity(slots.len());
        for (name, record) in slots {
            match RegexBuilder::new(&regex::escape(&name))
                .case_insensitive(true)
                .build()
            {
                Ok(pattern) => candidates.push(Candidate { name, record, pattern }),
                Err(e) => warn!(name = %name, error = %e, "skipping unmatchable name"),
            }
        }

        let by_name = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();

        let (prefilter, prefilter_slots) = build_prefilter(&candidates);

        debug!(
            candidates = candidates.len(),
            records = records.len(),
            exclude_id,
            "entity index built"
        );

        Self {
            candidates,
            by_name,
            prefilter,
            prefilter_slots,
            source_len: records.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates in match priority order (longest name first)
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Record position for a lower-cased name
    pub fn lookup(&self, lower_name: &str) -> Option<usize> {
        self.by_name
            .get(lower_name)
            .map(|&i| self.candidates[i].record)
    }

    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Per-candidate flags: `false` means the candidate certainly does not
    /// occur in `line`. Only ASCII lines are filtered; anything else keeps
    /// every candidate so Unicode case folding is left to the regex.
    pub(crate) fn possible_in(&self, line: &str) -> Vec<bool> {
        let automaton = match &self.prefilter {
            Some(a) if line.is_ascii() => a,
            _ => return vec![true; self.candidates.len()],
        };

        let mut possible: Vec<bool> = self.candidates.iter().map(|c| !c.name.is_ascii()).collect();
        for mat in automaton.find_overlapping_iter(line) {
            possible[self.prefilter_slots[mat.pattern().as_usize()]] = true;
        }
        possible
    }
}

fn build_prefilter(candidates: &[Candidate]) -> (Option<AhoCorasick>, Vec<usize>) {
    let (names, slots): (Vec<&str>, Vec<usize>) = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.name.is_ascii())
        .map(|(i, c)| (c.name.as_str(), i))
        .unzip();

    if names.is_empty() {
        return (None, Vec::new());
    }

    match AhoCorasickBuilder::new()
        .match_kind(MatchKind::Standard)
        .ascii_case_insensitive(true)
        .build(&names)
    {
        Ok(automaton) => (Some(automaton), slots),
        Err(e) => {
            warn!(error = %e, "prefilter build failed, scanning every candidate");
            (None, Vec::new())
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> Record {
        Record::new().with("id", id).with("Display Name", name)
    }

    fn names(index: &EntityIndex) -> Vec<&str> {
        index.candidates().iter().map(|c| c.name.as_str()).collect()
    }

    // -------------------------------------------------------------------------
    // Requirement 1: Longest names first, ties in record order
    // -------------------------------------------------------------------------
    #[test]
    fn test_candidates_sorted_longest_first() {
        let records = vec![
            record("1", "Go"),
            record("2", "Go Pro"),
            record("3", "Anki"),
            record("4", "Zoom"),
        ];
        let index = EntityIndex::build(&records, "", &AnnotateConfig::default());
        assert_eq!(names(&index), vec!["go pro", "anki", "zoom", "go"]);
    }

    // -------------------------------------------------------------------------
    // Requirement 2: Self and "other" excluded at build time
    // -------------------------------------------------------------------------
    #[test]
    fn test_excludes_self_and_other() {
        let records = vec![record("1", "Anki"), record("2", "Other"), record("3", "Quizlet")];
        let index = EntityIndex::build(&records, "1", &AnnotateConfig::default());
        assert_eq!(names(&index), vec!["quizlet"]);
    }

    // -------------------------------------------------------------------------
    // Requirement 3: Duplicate lower-cased names - later record wins
    // -------------------------------------------------------------------------
    #[test]
    fn test_duplicate_name_later_wins() {
        let records = vec![record("1", "Anki"), record("2", "ANKI")];
        let index = EntityIndex::build(&records, "", &AnnotateConfig::default());
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("anki"), Some(1));
    }

    // -------------------------------------------------------------------------
    // Requirement 4: Code name fallback and blank names
    // -------------------------------------------------------------------------
    #[test]
    fn test_code_name_fallback_and_blank_names() {
        let records = vec![
            Record::new().with("id", "1").with("code name", "pomodoro"),
            Record::new().with("id", "2"),
            record("3", "   "),
        ];
        let index = EntityIndex::build(&records, "", &AnnotateConfig::default());
        assert_eq!(names(&index), vec!["pomodoro"]);
        assert_eq!(index.lookup("pomodoro"), Some(0));
    }

    // -------------------------------------------------------------------------
    // Requirement 5: Empty exclude id excludes nothing
    // -------------------------------------------------------------------------
    #[test]
    fn test_empty_exclude_id() {
        let records = vec![Record::new().with("Display Name", "Anki")];
        let index = EntityIndex::build(&records, "", &AnnotateConfig::default());
        assert_eq!(index.len(), 1);
    }

    // -------------------------------------------------------------------------
    // Requirement 6: Prefilter never hides a present name
    // -------------------------------------------------------------------------
    #[test]
    fn test_prefilter_flags() {
        let records = vec![record("1", "Anki"), record("2", "Zoom"), record("3", "Café")];
        let index = EntityIndex::build(&records, "", &AnnotateConfig::default());

        let possible = index.possible_in("I review ANKI cards");
        let flagged: Vec<&str> = index
            .candidates()
            .iter()
            .zip(possible)
            .filter(|(_, p)| *p)
            .map(|(c, _)| c.name.as_str())
            .collect();
        // Non-ASCII names are always scanned
        assert_eq!(flagged, vec!["anki", "café"]);

        // Non-ASCII line: no filtering
        assert!(index.possible_in("Zoom über alles").iter().all(|p| *p));
    }
}
