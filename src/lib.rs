//! # route-audit
//!
//! Static analysis for web application route tables.
//!
//! Given a snapshot of an application's routing state (global middleware plus
//! an ordered list of routes, each with HTTP methods and a handler chain),
//! route-audit finds duplicate registrations, sensitive routes without an
//! authentication handler, and middleware that is never used. Results export
//! as JSON, Markdown or an OpenAPI 3 document, and every route can be
//! dry-run against a live or in-process server.
//!
//! # Quick Start
//!
//! ```rust
//! use route_audit::{Analyzer, Config, extract_route_table, report::ReportFormat};
//!
//! let dump = serde_json::json!({
//!     "_router": { "stack": [
//!         { "name": "jsonParser" },
//!         { "route": { "path": "/movies", "methods": { "post": true },
//!                      "stack": [{ "name": "createMovie" }] } },
//!         { "route": { "path": "/movies", "methods": { "post": true },
//!                      "stack": [{ "name": "createAnotherMovie" }] } }
//!     ]}
//! });
//!
//! let config = Config::default();
//! let table = extract_route_table(&dump).unwrap();
//! let result = Analyzer::new(config.security.clone()).analyze(table);
//!
//! assert_eq!(result.conflicts[0].key(), "POST:/movies");
//!
//! let markdown = ReportFormat::Markdown.render(&result, &config.report).unwrap();
//! assert!(markdown.contains("- POST:/movies"));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! router dump ──► RouteTableProvider ──► RouteTable ──┬─► detect_conflicts ────────┐
//!                                                     ├─► find_unprotected_routes ─┼─► AnalysisResult ──► report
//!                                                     └─► middleware_coverage ─────┘          │
//!                                                                                             └─► DryRunner
//! ```
//!
//! # Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`extract`] | Router dumps to [`RouteTable`] ([`RouteTableProvider`](extract::RouteTableProvider)) |
//! | [`analysis`] | The three analyzers and [`Analyzer`] |
//! | [`report`] | JSON, Markdown, OpenAPI, console and CI output |
//! | [`dry_run`] | Sequential probing ([`DryRunner`](dry_run::DryRunner)) |
//!
//! Configuration ([`Config`]), errors ([`Error`]) and the data model are
//! re-exported at the crate root.
//!
//! # Configuration
//!
//! ```rust
//! use route_audit::Config;
//! use std::time::Duration;
//!
//! let config: Config = r#"
//!     [security]
//!     sensitive_paths = ["/admin", "/billing"]
//!
//!     [dry_run]
//!     timeout = "3s"
//! "#.parse().unwrap();
//! assert!(config.security.is_sensitive("/billing"));
//!
//! let config = Config::default()
//!     .with_auth_handler_names(["requireUser"])
//!     .with_probe_timeout(Duration::from_secs(5));
//! assert!(config.security.is_auth_handler("requireUser"));
//! ```
//!
//! # Error Handling
//!
//! The library uses a custom [`Result`] type. In CI mode errors are printed as
//! structured JSON:
//!
//! ```json
//! {
//!   "error_code": "EXTRACTION_ERROR",
//!   "message": "Unrecognized router shape: expected `_router.stack`, `router.stack`, or `routes`",
//!   "details": "Please check the file path and ensure it contains a router dump (`_router.stack`, `router.stack`) or a normalized route table."
//! }
//! ```

mod config;
mod error;
mod model;
mod utils;

pub mod analysis;
pub mod dry_run;
pub mod extract;
pub mod report;

pub use analysis::Analyzer;
pub use config::*;
pub use error::*;
pub use extract::{extract_route_table, load_route_table};
pub use model::*;
pub use utils::*;

pub type Result<T> = std::result::Result<T, Error>;
