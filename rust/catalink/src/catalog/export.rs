//! Tab-separated catalog export parsing
//!
//! Rows are framed by the `csv` reader with quoting off, since the export
//! never quotes cells. The first non-blank row names the fields. Cells are
//! trimmed, carriage returns are dropped, and the export's newline glyph is
//! expanded back into `\n`.

use csv::{ReaderBuilder, StringRecord, Terminator};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::record::{Library, Record};

/// Export format settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Column separator, a single ASCII character. Default: tab
    pub delimiter: char,
    /// Stand-in the export writes for line breaks inside a cell.
    /// Default: U+000B (vertical tab)
    pub newline_glyph: char,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            newline_glyph: '\u{000B}',
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.delimiter.is_ascii() {
            return Err(CatalogError::InvalidConfig(format!(
                "delimiter {:?} is not a single-byte ASCII character",
                self.delimiter
            )));
        }
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(CatalogError::InvalidConfig(
                "delimiter cannot be a line break".to_string(),
            ));
        }
        if self.delimiter == self.newline_glyph {
            return Err(CatalogError::InvalidConfig(
                "delimiter and newline glyph must differ".to_string(),
            ));
        }
        Ok(())
    }
}

fn clean_cell(raw: &str, glyph: char) -> String {
    let without_cr: String = raw.chars().filter(|&c| c != '\r').collect();
    without_cr.trim().replace(glyph, "\n")
}

/// Cleaned cells, or `None` for a row with nothing in it
fn clean_row(row: &StringRecord, glyph: char) -> Option<Vec<String>> {
    let cells: Vec<String> = row.iter().map(|cell| clean_cell(cell, glyph)).collect();
    cells.iter().any(|c| !c.is_empty()).then_some(cells)
}

/// Parse an export into records
pub fn parse_export(input: &str, config: &ExportConfig) -> Result<Vec<Record>, CatalogError> {
    config.validate()?;

    // Only `\n` ends a row; stray `\r` stays in the cell and is cleaned there
    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(input.as_bytes());

    let mut header: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for row in reader.records() {
        let Some(cells) = clean_row(&row?, config.newline_glyph) else {
            continue;
        };
        match &header {
            None => header = Some(cells),
            Some(names) => records.push(
                names
                    .iter()
                    .zip(cells)
                    .filter(|(name, _)| !name.is_empty())
                    .map(|(name, cell)| (name.clone(), cell))
                    .collect::<Record>(),
            ),
        }
    }

    let columns = header.ok_or(CatalogError::MissingHeader)?.len();
    debug!(columns, records = records.len(), "parsed catalog export");
    Ok(records)
}

/// Records grouped by library discriminator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibrarySplit {
    pub activities: Vec<Record>,
    pub tools: Vec<Record>,
    pub unassigned: Vec<Record>,
}

pub fn split_libraries(records: Vec<Record>) -> LibrarySplit {
    let mut split = LibrarySplit::default();
    for record in records {
        match record.library() {
            Library::Activities => split.activities.push(record),
            Library::Tools => split.tools.push(record),
            Library::Unknown => split.unassigned.push(record),
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "id\tDisplay Name\tLibrary\tLong Description\r\n\
                          1\t Anki \tTools\tFlashcards\u{000B}with spacing\r\n\
                          \r\n\
                          2\tSpaced Repetition\tActivities\r\n";

    #[test]
    fn test_parse_export() {
        let records = parse_export(EXPORT, &ExportConfig::default()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].id(), "1");
        assert_eq!(records[0].display_name(), "Anki");
        assert_eq!(records[0].get("Long Description"), "Flashcards\nwith spacing");

        // Short row: missing trailing cells read as empty
        assert_eq!(records[1].display_name(), "Spaced Repetition");
        assert_eq!(records[1].get("Long Description"), "");
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            parse_export("", &ExportConfig::default()),
            Err(CatalogError::MissingHeader)
        );
        assert_eq!(
            parse_export("\n \n", &ExportConfig::default()),
            Err(CatalogError::MissingHeader)
        );
    }

    #[test]
    fn test_empty_header_columns_skipped() {
        let records = parse_export("id\t\tDisplay Name\n7\tjunk\tZoom", &ExportConfig::default()).unwrap();
        assert_eq!(records[0].fields().count(), 2);
        assert_eq!(records[0].display_name(), "Zoom");
    }

    #[test]
    fn test_blank_rows_and_stray_carriage_returns() {
        let input = "\t\t\nid\tDisplay Name\n\r\n3\tPomo\rdoro\r\n\t \t\n";
        let records = parse_export(input, &ExportConfig::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "3");
        assert_eq!(records[0].display_name(), "Pomodoro");
    }

    #[test]
    fn test_surplus_cells_ignored() {
        let records = parse_export("id\tDisplay Name\n1\tAnki\textra\tmore", &ExportConfig::default()).unwrap();
        assert_eq!(records[0].fields().count(), 2);
    }

    #[test]
    fn test_quotes_are_literal() {
        let records = parse_export("id\tDisplay Name\n1\t\"Deep\" Work", &ExportConfig::default()).unwrap();
        assert_eq!(records[0].display_name(), "\"Deep\" Work");
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let config = ExportConfig { delimiter: '¦', ..ExportConfig::default() };
        assert!(matches!(config.validate(), Err(CatalogError::InvalidConfig(_))));

        let semicolons = ExportConfig { delimiter: ';', ..ExportConfig::default() };
        let records = parse_export("id;Display Name\n4;Zoom", &semicolons).unwrap();
        assert_eq!(records[0].display_name(), "Zoom");
    }

    #[test]
    fn test_invalid_config() {
        let config = ExportConfig { delimiter: '\n', ..ExportConfig::default() };
        assert!(matches!(
            parse_export("id", &config),
            Err(CatalogError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_split_libraries() {
        let records = parse_export(EXPORT, &ExportConfig::default()).unwrap();
        let split = split_libraries(records);
        assert_eq!(split.tools.len(), 1);
        assert_eq!(split.activities.len(), 1);
        assert!(split.unassigned.is_empty());
    }
}
