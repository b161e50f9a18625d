use crate::{Error, Result};
use serde::Deserialize;

/// Metadata stamped onto generated OpenAPI documents.
///
/// ```toml
/// [report]
/// title = "Movies API"
/// version = "2.3.0"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
    #[serde(default = "ReportConfig::default_title")]
    pub title: String,
    #[serde(default = "ReportConfig::default_version")]
    pub version: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            version: Self::default_version(),
        }
    }
}

impl ReportConfig {
    fn default_title() -> String {
        "Route Audit".into()
    }

    fn default_version() -> String {
        "1.0.0".into()
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::config("Report title cannot be empty"));
        }
        if self.version.trim().is_empty() {
            return Err(Error::config("Report version cannot be empty"));
        }
        Ok(())
    }
}
