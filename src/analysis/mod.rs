//! Static checks over an immutable [`RouteTable`].
//!
//! The three analyzers are independent single-pass functions; none observes
//! another's output. [`Analyzer`] runs all of them and aggregates the results
//! into an [`AnalysisResult`], the single value handed to reporting.
//!
//! ```rust
//! use route_audit::{Analyzer, HttpMethod, RouteEntry, RouteTable, SecurityConfig};
//!
//! let table = RouteTable::new(
//!     vec![],
//!     vec![RouteEntry::new("/admin", [HttpMethod::Get], ["adminRoute"]).unwrap()],
//! );
//!
//! let result = Analyzer::new(SecurityConfig::default()).analyze(table);
//! assert_eq!(result.warnings.len(), 1);
//! assert!(result.conflicts.is_empty());
//! ```

mod conflicts;
mod coverage;
mod security;

pub use conflicts::detect_conflicts;
pub use coverage::middleware_coverage;
pub use security::find_unprotected_routes;

use crate::{AnalysisResult, RouteTable, SecurityConfig};

/// Runs every analyzer over a route table.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    security: SecurityConfig,
}

impl Analyzer {
    pub fn new(security: SecurityConfig) -> Self {
        Self { security }
    }

    pub fn security_config(&self) -> &SecurityConfig {
        &self.security
    }

    /// Analyzes `table`, taking ownership of it: the table lives on inside the
    /// returned result and is not touched again.
    pub fn analyze(&self, table: RouteTable) -> AnalysisResult {
        let conflicts = detect_conflicts(table.routes());
        let warnings = find_unprotected_routes(table.routes(), &self.security);
        let coverage = middleware_coverage(&table);

        tracing::info!(
            routes = table.routes().len(),
            global_middleware = table.global_middleware().len(),
            conflicts = conflicts.len(),
            warnings = warnings.len(),
            unused_middleware = coverage.unused_middleware.len(),
            "Route table analyzed"
        );

        AnalysisResult {
            route_table: table,
            conflicts,
            warnings,
            coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GlobalMiddlewareEntry, HttpMethod, RouteEntry};

    fn movies_table() -> RouteTable {
        RouteTable::new(
            vec![GlobalMiddlewareEntry::new("jsonParser")],
            vec![
                RouteEntry::new("/movies", [HttpMethod::Get], ["getAllMovies"]).unwrap(),
                RouteEntry::new(
                    "/movies",
                    [HttpMethod::Post],
                    ["validateRequestBody", "createMovie"],
                )
                .unwrap(),
                RouteEntry::new("/movies", [HttpMethod::Post], ["createAnotherMovie"]).unwrap(),
            ],
        )
    }

    #[test]
    fn test_duplicate_post_scenario() {
        let result = Analyzer::default().analyze(movies_table());

        let keys: Vec<_> = result.conflicts.iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["POST:/movies"]);
        assert_eq!(
            result.coverage.routes_without_middleware,
            vec!["GET /movies".to_string(), "POST /movies".to_string()]
        );
        assert_eq!(
            result.coverage.unused_middleware,
            vec!["jsonParser".to_string()]
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_admin_scenario() {
        let unprotected = RouteTable::new(
            vec![],
            vec![RouteEntry::new("/admin", [HttpMethod::Get], ["adminRoute"]).unwrap()],
        );
        let result = Analyzer::default().analyze(unprotected);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, "/admin");
        assert!(!result.is_clean());

        let protected = RouteTable::new(
            vec![],
            vec![
                RouteEntry::new("/admin", [HttpMethod::Get], ["authenticate", "adminRoute"])
                    .unwrap(),
            ],
        );
        let result = Analyzer::default().analyze(protected);
        assert!(result.warnings.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn test_result_keeps_table() {
        let table = movies_table();
        let result = Analyzer::default().analyze(table.clone());
        assert_eq!(result.route_table, table);
    }

    #[test]
    fn test_injected_security_config_used() {
        let analyzer = Analyzer::new(SecurityConfig {
            sensitive_paths: vec!["/movies".into()],
            auth_handler_names: vec!["validateRequestBody".into()],
        });
        let result = analyzer.analyze(movies_table());
        assert_eq!(result.warnings.len(), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn method() -> impl Strategy<Value = HttpMethod> {
            prop::sample::select(vec![
                HttpMethod::Get,
                HttpMethod::Post,
                HttpMethod::Put,
                HttpMethod::Delete,
            ])
        }

        fn route() -> impl Strategy<Value = RouteEntry> {
            (
                prop::sample::select(vec!["/a", "/b", "/c", "/admin"]),
                prop::collection::vec(method(), 1..3),
                prop::collection::vec(
                    prop::sample::select(vec!["auth", "log", "cors", "handler"]),
                    1..4,
                ),
            )
                .prop_map(|(path, methods, handlers)| {
                    RouteEntry::new(path, methods, handlers).unwrap()
                })
        }

        fn table() -> impl Strategy<Value = RouteTable> {
            (
                prop::collection::vec(
                    prop::sample::select(vec!["auth", "log", "cors", "helmet", "anonymous"]),
                    0..5,
                ),
                prop::collection::vec(route(), 0..12),
            )
                .prop_map(|(globals, routes)| {
                    RouteTable::new(
                        globals.into_iter().map(GlobalMiddlewareEntry::new).collect(),
                        routes,
                    )
                })
        }

        proptest! {
            /// k registrations of a key produce exactly k - 1 conflicts
            #[test]
            fn conflicts_are_registrations_minus_one(table in table()) {
                let conflicts = detect_conflicts(table.routes());
                for target in table.probe_targets() {
                    let registrations = table
                        .probe_targets()
                        .iter()
                        .filter(|t| **t == target)
                        .count();
                    let reported = conflicts
                        .iter()
                        .filter(|c| c.method == target.method && c.path == target.path)
                        .count();
                    prop_assert_eq!(reported, registrations - 1);
                }
            }

            /// Tables without repeated keys never conflict
            #[test]
            fn unique_keys_never_conflict(
                methods in prop::collection::vec(method(), 1..4),
                paths in prop::collection::btree_set("/[a-z]{1,6}", 0..6)
            ) {
                let routes: Vec<_> = paths
                    .iter()
                    .map(|p| RouteEntry::new(p.as_str(), methods.clone(), ["h"]).unwrap())
                    .collect();
                prop_assert!(detect_conflicts(&routes).is_empty());
            }

            /// A global middleware name used by any route is never unused
            #[test]
            fn used_globals_never_unused(table in table()) {
                let coverage = middleware_coverage(&table);
                for route in table.routes() {
                    for handler in route.handlers() {
                        prop_assert!(!coverage.unused_middleware.contains(handler));
                    }
                }
            }

            /// Single-handler routes are listed; multi-handler routes never are
            #[test]
            fn routes_without_middleware_match_handler_count(table in table()) {
                let coverage = middleware_coverage(&table);
                let expected: Vec<String> = table
                    .routes()
                    .iter()
                    .filter(|r| r.handlers().len() == 1)
                    .map(|r| r.label())
                    .collect();
                prop_assert_eq!(coverage.routes_without_middleware, expected);
            }
        }
    }
}
