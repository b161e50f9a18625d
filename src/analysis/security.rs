use crate::{RouteEntry, SecurityConfig, Warning};

/// Flags sensitive routes that have no recognized authentication handler.
///
/// A route is sensitive when its path is exactly one of
/// [`SecurityConfig::sensitive_paths`]; it is protected when any of its handlers
/// is exactly one of [`SecurityConfig::auth_handler_names`]. Each unprotected
/// sensitive route produces one warning.
pub fn find_unprotected_routes(routes: &[RouteEntry], config: &SecurityConfig) -> Vec<Warning> {
    routes
        .iter()
        .filter(|route| config.is_sensitive(route.path()))
        .filter(|route| {
            !route
                .handlers()
                .iter()
                .any(|handler| config.is_auth_handler(handler))
        })
        .map(|route| {
            tracing::warn!(path = route.path(), "Sensitive route lacks authentication middleware");
            Warning::missing_authentication(route)
        })
        .collect()
}
