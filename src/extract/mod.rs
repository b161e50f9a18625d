//! Route table extraction.
//!
//! The analysis engine never looks at a framework's router directly. Instead a
//! router dump (JSON) is handed to a list of [`RouteTableProvider`]s, one per
//! supported shape. Each provider probes the document structurally and declines
//! with `None` when the shape is not its own, so framework-version churn stays
//! isolated here.
//!
//! Supported shapes, tried in order:
//!
//! | Provider | Shape |
//! |----------|-------|
//! | [`ExpressRouterProvider::legacy`] | `{ "_router": { "stack": [...] } }` (Express 4) |
//! | [`ExpressRouterProvider::current`] | `{ "router": { "stack": [...] } }` (Express 5) |
//! | [`NormalizedProvider`] | `{ "globalMiddleware": [...], "routes": [...] }` |
//!
//! ```rust
//! use route_audit::extract_route_table;
//!
//! let dump = serde_json::json!({
//!     "_router": { "stack": [
//!         { "name": "jsonParser" },
//!         { "name": "bound dispatch", "route": {
//!             "path": "/movies",
//!             "methods": { "get": true },
//!             "stack": [{ "name": "getAllMovies" }]
//!         }}
//!     ]}
//! });
//!
//! let table = extract_route_table(&dump).unwrap();
//! assert_eq!(table.global_middleware()[0].name, "jsonParser");
//! assert_eq!(table.routes()[0].path(), "/movies");
//! ```

mod express;
mod normalized;

pub use express::ExpressRouterProvider;
pub use normalized::NormalizedProvider;

use {
    crate::{Error, Result, RouteTable},
    serde_json::Value,
    std::{fs, path::Path},
};

/// Name substituted for handlers and middleware without a name.
pub const ANONYMOUS: &str = "anonymous";

/// Produces a normalized [`RouteTable`] from one particular router shape.
pub trait RouteTableProvider {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns `None` when `document` does not have this provider's shape,
    /// otherwise the extraction result.
    fn extract(&self, document: &Value) -> Option<Result<RouteTable>>;
}

/// The providers tried by [`extract_route_table`], in order.
pub fn default_providers() -> Vec<Box<dyn RouteTableProvider>> {
    vec![
        Box::new(ExpressRouterProvider::legacy()),
        Box::new(ExpressRouterProvider::current()),
        Box::new(NormalizedProvider),
    ]
}

/// Extracts a route table using the first of `providers` that recognizes the document.
pub fn extract_with(
    document: &Value,
    providers: &[Box<dyn RouteTableProvider>],
) -> Result<RouteTable> {
    for provider in providers {
        if let Some(result) = provider.extract(document) {
            let table = result?;
            tracing::debug!(
                provider = provider.name(),
                routes = table.routes().len(),
                global_middleware = table.global_middleware().len(),
                "Route table extracted"
            );
            return Ok(table);
        }
    }
    Err(Error::extraction(
        "Unrecognized router shape: expected `_router.stack`, `router.stack`, or `routes`",
    ))
}

/// Extracts a route table using [`default_providers`].
pub fn extract_route_table(document: &Value) -> Result<RouteTable> {
    extract_with(document, &default_providers())
}

/// Reads a JSON router dump from `path` and extracts its route table.
///
/// Every failure (missing file, invalid JSON, unknown shape) is reported as an
/// [`ErrorKind::Extraction`](crate::ErrorKind::Extraction) error naming the file.
pub fn load_route_table(path: impl AsRef<Path>) -> Result<RouteTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        Error::extraction(format!("Failed to load {}: {e}", path.display()))
    })?;
    let document: Value = serde_json::from_str(&text).map_err(|e| {
        Error::extraction(format!("{} is not valid JSON: {e}", path.display()))
    })?;
    extract_route_table(&document)
        .map_err(|e| Error::extraction(format!("{}: {e}", path.display())))
}

/// A handler name, or [`ANONYMOUS`] when missing or blank.
pub(crate) fn name_or_anonymous(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(ANONYMOUS)
        .to_string()
}
