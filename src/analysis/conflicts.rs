use {
    crate::{Conflict, RouteEntry},
    std::collections::HashSet,
};

/// Finds duplicate `(method, path)` registrations.
///
/// The first registration of a key is the original; every later registration
/// of the same key yields one [`Conflict`], in encounter order. A key
/// registered `k` times therefore produces `k - 1` conflicts.
pub fn detect_conflicts(routes: &[RouteEntry]) -> Vec<Conflict> {
    let mut seen = HashSet::new();
    let mut conflicts = Vec::new();

    for route in routes {
        for &method in route.methods() {
            if !seen.insert((method, route.path())) {
                conflicts.push(Conflict::new(method, route.path()));
            }
        }
    }

    tracing::debug!(conflicts = conflicts.len(), "Conflict detection finished");
    conflicts
}
