//! Configuration for the annotator

use serde::{Deserialize, Serialize};

/// Annotator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotateConfig {
    /// Display names that are never linked (compared lower-cased)
    #[serde(default = "default_ignored_names")]
    pub ignored_names: Vec<String>,
    /// Turn `http(s)://` runs into external links
    #[serde(default = "default_true")]
    pub link_urls: bool,
    /// Line prefixes (after trim) that mark a bullet list item
    #[serde(default = "default_list_markers")]
    pub list_markers: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_ignored_names() -> Vec<String> {
    vec!["other".to_string()]
}

fn default_list_markers() -> Vec<String> {
    vec!["- ".to_string(), "* ".to_string()]
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            ignored_names: default_ignored_names(),
            link_urls: true,
            list_markers: default_list_markers(),
        }
    }
}

impl AnnotateConfig {
    pub(crate) fn is_ignored(&self, lower_name: &str) -> bool {
        self.ignored_names
            .iter()
            .any(|n| n.to_lowercase() == lower_name)
    }

    /// Strip a list marker from an already-trimmed line
    pub(crate) fn strip_list_marker<'a>(&self, trimmed: &'a str) -> Option<&'a str> {
        self.list_markers
            .iter()
            .find_map(|marker| trimmed.strip_prefix(marker.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnnotateConfig::default();
        assert!(config.link_urls);
        assert!(config.is_ignored("other"));
        assert!(!config.is_ignored("anki"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AnnotateConfig = serde_json::from_str(r#"{"link_urls": false}"#).unwrap();
        assert!(!config.link_urls);
        assert_eq!(config.ignored_names, vec!["other".to_string()]);
        assert_eq!(config.list_markers.len(), 2);
    }

    #[test]
    fn test_strip_list_marker() {
        let config = AnnotateConfig::default();
        assert_eq!(config.strip_list_marker("- item"), Some("item"));
        assert_eq!(config.strip_list_marker("* item"), Some("item"));
        assert_eq!(config.strip_list_marker("-item"), None);
        assert_eq!(config.strip_list_marker("+ item"), None);
    }
}
