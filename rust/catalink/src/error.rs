use wasm_bindgen::JsValue;

/// Errors surfaced at the loading and JS boundaries.
///
/// The annotation and ranking engines themselves are total and never
/// produce these.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Export text had no header row.
    #[error("export has no header row")]
    MissingHeader,
    /// The export reader could not frame a row.
    #[error("export read failed: {0}")]
    ExportRead(String),
    /// Configuration object could not be used.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Value coming from or going to JS did not have the expected shape.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// No record with the given id is loaded.
    #[error("unknown record id: {0}")]
    UnknownRecord(String),
}

impl From<serde_wasm_bindgen::Error> for CatalogError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}

impl From<csv::Error> for CatalogError {
    fn from(e: csv::Error) -> Self {
        CatalogError::ExportRead(e.to_string())
    }
}

impl From<CatalogError> for JsValue {
    fn from(e: CatalogError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
