//! Report synthesis.
//!
//! Every renderer is a pure function of an [`AnalysisResult`]. The export
//! format is chosen from the output file name:
//!
//! | File name | Format |
//! |-----------|--------|
//! | `*.openapi.json` | OpenAPI 3 document, JSON |
//! | `*.yaml`, `*.yml` | OpenAPI 3 document, YAML |
//! | `*.json` | Structured export `{ results, conflicts }` |
//! | `*.md`, `*.markdown` | Markdown report |
//!
//! Anything else fails with [`ErrorKind::UnsupportedFormat`](crate::ErrorKind::UnsupportedFormat).

pub mod ci;
pub mod console;
pub mod json;
pub mod markdown;
pub mod openapi;

use {
    crate::{AnalysisResult, Error, ReportConfig, Result},
    std::{fs, path::Path},
};

/// A supported export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
    OpenApiJson,
    OpenApiYaml,
}

impl ReportFormat {
    /// Picks the format for an output file name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();

        if file_name.ends_with(".openapi.json") {
            return Ok(ReportFormat::OpenApiJson);
        }
        match extension.as_str() {
            ".json" => Ok(ReportFormat::Json),
            ".md" | ".markdown" => Ok(ReportFormat::Markdown),
            ".yaml" | ".yml" => Ok(ReportFormat::OpenApiYaml),
            _ => Err(Error::unsupported_format(extension)),
        }
    }

    /// Renders `result` in this format.
    pub fn render(self, result: &AnalysisResult, report: &ReportConfig) -> Result<String> {
        match self {
            ReportFormat::Json => json::render(result),
            ReportFormat::Markdown => Ok(markdown::render(result, &report.title)),
            ReportFormat::OpenApiJson => openapi::render_json(result, report),
            ReportFormat::OpenApiYaml => openapi::render_yaml(result, report),
        }
    }
}

/// Renders `result` in the format implied by `output` and writes it there.
pub fn export_to_file(
    result: &AnalysisResult,
    report: &ReportConfig,
    output: impl AsRef<Path>,
) -> Result<ReportFormat> {
    let output = output.as_ref();
    let format = ReportFormat::from_path(output)?;
    let content = format.render(result, report)?;
    fs::write(output, content).map_err(|e| {
        Error::io(format!("Failed to write {}: {e}", output.display()))
    })?;

    tracing::info!(output = %output.display(), ?format, "Report exported");
    Ok(format)
}
