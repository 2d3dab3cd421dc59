//! Property tests for the annotator and ranker invariants

use catalink::annotate::link_line;
use catalink::{annotate, rank, AnnotateConfig, Block, EntityIndex, Record};
use proptest::prelude::*;

const VOCAB: &[&str] = &["Go", "Go Pro", "Anki", "AnkiMobile", "Pro", "Other", "note", "é"];

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(prop::sample::select(VOCAB), 0..6).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                Record::new()
                    .with("id", &i.to_string())
                    .with("Display Name", name)
            })
            .collect()
    })
}

fn arb_line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(VOCAB).prop_map(str::to_string),
            "[a-zA-Z_ .,!()/:-]{0,6}",
            Just("https://x.io/Go".to_string()),
            Just("GO PRO".to_string()),
        ],
        0..10,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn segments_concatenate_to_line(records in arb_records(), line in arb_line()) {
        let index = EntityIndex::build(&records, "", &AnnotateConfig::default());
        let segments = link_line(&line, &records, &index, true);
        let rebuilt: String = segments.iter().map(|s| s.text()).collect();
        prop_assert_eq!(rebuilt, line);
    }

    #[test]
    fn never_links_excluded_record(records in arb_records(), line in arb_line()) {
        let text = format!("{}\n- {}", line, line);
        for excluded in records.iter().map(Record::id) {
            let linked_to_self = annotate(&text, &records, excluded)
                .any(|block: Block| block.segments().any(|s| s.record().map(Record::id) == Some(excluded)));
            prop_assert!(!linked_to_self);
        }
    }

    #[test]
    fn entity_links_are_word_bounded(records in arb_records(), line in arb_line()) {
        let index = EntityIndex::build(&records, "", &AnnotateConfig::default());
        let segments = link_line(&line, &records, &index, false);

        let mut offset = 0;
        for segment in &segments {
            let text = segment.text();
            if segment.record().is_some() {
                let before = line[..offset].chars().next_back();
                let after = line[offset + text.len()..].chars().next();
                let is_word = |c: char| c.is_alphanumeric() || c == '_';
                // Neighbours inside the same line are either non-word or
                // belong to another link
                if let Some(c) = before {
                    prop_assert!(!is_word(c) || !segments_plain_at(&segments, offset - c.len_utf8()));
                }
                if let Some(c) = after {
                    prop_assert!(!is_word(c) || !segments_plain_at(&segments, offset + text.len()));
                }
            }
            offset += text.len();
        }
    }

    #[test]
    fn empty_query_is_identity(records in arb_records(), blank in "[ \t]{0,3}") {
        let ranked: Vec<&Record> = rank(&records, &blank);
        let original: Vec<&Record> = records.iter().collect();
        prop_assert_eq!(ranked, original);
    }

    #[test]
    fn ranked_records_all_contain_query(records in arb_records(), query in prop::sample::select(VOCAB)) {
        let q = query.to_lowercase();
        for record in rank(&records, query) {
            prop_assert!(record.display_name().to_lowercase().contains(&q));
        }
    }
}

/// True when byte `at` falls inside a plain-text segment
fn segments_plain_at(segments: &[catalink::Segment<'_>], at: usize) -> bool {
    let mut offset = 0;
    for segment in segments {
        let end = offset + segment.text().len();
        if at >= offset && at < end {
            return segment.is_plain();
        }
        offset = end;
    }
    false
}
