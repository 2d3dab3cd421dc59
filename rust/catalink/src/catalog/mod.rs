pub mod export;
pub mod linker;

pub use export::*;
pub use linker::*;

use serde::{Deserialize, Serialize};

use crate::annotate::AnnotateConfig;
use crate::error::CatalogError;
use crate::rank::RankConfig;

/// Top-level configuration accepted by `CatalogLinker`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub annotate: AnnotateConfig,
    pub rank: RankConfig,
    pub export: ExportConfig,
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.export.validate()?;
        if self.annotate.list_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(CatalogError::InvalidConfig(
                "list markers must contain a visible character".to_string(),
            ));
        }
        if self.rank.name_fields.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "at least one name field is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.annotate.link_urls);
        assert_eq!(config.export.delimiter, '\t');
    }

    #[test]
    fn test_config_parsing() {
        let json = r#"{"annotate": {"ignored_names": ["other", "misc"]}, "rank": {"weights": {"exact_name": 2000}}}"#;
        let config: CatalogConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.annotate.ignored_names.len(), 2);
        assert_eq!(config.rank.weights.exact_name, 2000);
        assert_eq!(config.rank.weights.name_prefix, 500);
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CatalogConfig::default();
        config.annotate.list_markers = vec![" ".to_string()];
        assert!(matches!(config.validate(), Err(CatalogError::InvalidConfig(_))));

        let mut config = CatalogConfig::default();
        config.rank.name_fields.clear();
        assert!(config.validate().is_err());
    }
}
