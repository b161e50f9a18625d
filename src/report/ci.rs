use {
    crate::{AnalysisResult, Conflict, GlobalMiddlewareEntry, Result, RouteEntry, Warning},
    serde::Serialize,
    std::process::ExitCode,
};

/// Machine-readable summary printed in CI mode.
///
/// A run fails when it found any conflict or any security warning; coverage
/// findings are informational only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CiSummary<'a> {
    pub global_middleware: &'a [GlobalMiddlewareEntry],
    pub routes: &'a [RouteEntry],
    pub warnings: &'a [Warning],
    pub conflicts: &'a [Conflict],
}

impl<'a> From<&'a AnalysisResult> for CiSummary<'a> {
    fn from(result: &'a AnalysisResult) -> Self {
        Self {
            global_middleware: result.route_table.global_middleware(),
            routes: result.route_table.routes(),
            warnings: &result.warnings,
            conflicts: &result.conflicts,
        }
    }
}

impl CiSummary<'_> {
    pub fn is_failure(&self) -> bool {
        !self.conflicts.is_empty() || !self.warnings.is_empty()
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_failure() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
