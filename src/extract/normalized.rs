use {
    super::RouteTableProvider,
    crate::{Error, Result, RouteTable},
    serde::Deserialize,
    serde_json::Value,
};

/// Reads a table that is already normalized:
/// `{ "globalMiddleware": ["logger"], "routes": [{ "path", "methods", "handlers" }] }`.
///
/// This is also the `results` shape of a JSON export, minus the analysis fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedProvider;

impl RouteTableProvider for NormalizedProvider {
    fn name(&self) -> &'static str {
        "normalized"
    }

    fn extract(&self, document: &Value) -> Option<Result<RouteTable>> {
        document.get("routes")?;
        Some(
            RouteTable::deserialize(document)
                .map_err(|e| Error::extraction(format!("Invalid route table: {e}"))),
        )
    }
}
