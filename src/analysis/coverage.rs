use {
    crate::{CoverageReport, RouteTable},
    std::collections::HashSet,
};

/// Computes middleware usage coverage.
///
/// A global middleware entry is unused when no route lists a handler with the
/// same name. This is a naming heuristic: two different functions sharing a
/// name are indistinguishable. Unused names are reported once each, in
/// registration order.
///
/// A route is "without middleware" when it has a single handler, the terminal one.
pub fn middleware_coverage(table: &RouteTable) -> CoverageReport {
    let used: HashSet<&str> = table
        .routes()
        .iter()
        .flat_map(|route| route.handlers().iter().map(String::as_str))
        .collect();

    let mut reported = HashSet::new();
    let unused_middleware: Vec<String> = table
        .global_middleware()
        .iter()
        .map(|entry| entry.name.as_str())
        .filter(|name| !used.contains(name) && reported.insert(*name))
        .map(str::to_string)
        .collect();

    let routes_without_middleware: Vec<String> = table
        .routes()
        .iter()
        .filter(|route| route.handlers().len() <= 1)
        .map(|route| route.label())
        .collect();

    tracing::debug!(
        unused_middleware = unused_middleware.len(),
        routes_without_middleware = routes_without_middleware.len(),
        "Middleware coverage computed"
    );

    CoverageReport {
        unused_middleware,
        routes_without_middleware,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GlobalMiddlewareEntry, HttpMethod, RouteEntry};

    fn table(globals: &[&str], routes: Vec<RouteEntry>) -> RouteTable {
        RouteTable::new(
            globals.iter().map(|g| GlobalMiddlewareEntry::new(*g)).collect(),
            routes,
        )
    }

    fn route(path: &str, methods: &[HttpMethod], handlers: &[&str]) -> RouteEntry {
        RouteEntry::new(path, methods.iter().copied(), handlers.iter().copied()).unwrap()
    }

    #[test]
    fn test_unreferenced_global_is_unused() {
        let table = table(
            &["jsonParser", "cors"],
            vec![route("/movies", &[HttpMethod::Get], &["cors", "getAllMovies"])],
        );
        let coverage = middleware_coverage(&table);
        assert_eq!(coverage.unused_middleware, vec!["jsonParser".to_string()]);
    }

    #[test]
    fn test_unused_names_reported_once_in_order() {
        let table = table(&["anonymous", "logger", "anonymous"], vec![]);
        let coverage = middleware_coverage(&table);
        assert_eq!(
            coverage.unused_middleware,
            vec!["anonymous".to_string(), "logger".to_string()]
        );
    }

    #[test]
    fn test_single_handler_routes_lack_middleware() {
        let table = table(
            &[],
            vec![
                route("/movies", &[HttpMethod::Get], &["getAllMovies"]),
                route("/movies", &[HttpMethod::Post], &["validate", "createMovie"]),
                route("/items", &[HttpMethod::Get, HttpMethod::Put], &["items"]),
            ],
        );
        let coverage = middleware_coverage(&table);
        assert_eq!(
            coverage.routes_without_middleware,
            vec!["GET /movies".to_string(), "GET, PUT /items".to_string()]
        );
    }

    #[test]
    fn test_empty_table() {
        let coverage = middleware_coverage(&RouteTable::default());
        assert_eq!(coverage, CoverageReport::default());
    }
}
