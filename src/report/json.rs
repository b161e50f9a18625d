//! Structured JSON export.
//!
//! The document is `{ "results": AnalysisResult, "conflicts": [...] }`. It
//! parses back into an identical [`JsonExport`].

use {
    crate::{AnalysisResult, Conflict, Result},
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonExport {
    pub results: AnalysisResult,
    pub conflicts: Vec<Conflict>,
}

impl From<&AnalysisResult> for JsonExport {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            results: result.clone(),
            conflicts: result.conflicts.clone(),
        }
    }
}

/// Renders the export as pretty-printed JSON.
pub fn render(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonExport::from(result))?)
}

/// Parses a previously rendered export.
pub fn parse(text: &str) -> Result<JsonExport> {
    Ok(serde_json::from_str(text)?)
}
