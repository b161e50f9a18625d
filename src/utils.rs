//!
//! Small helpers shared by the configuration and reporting layers.
//!
//! - [`replace_handlebars_with_env`] - `{{ VAR }}` substitution in config text
//! - [`join_methods`] - the `"GET, POST"` label used across reports
//!

use {
    crate::HttpMethod,
    regex::{Captures, Regex},
    std::{env, sync::LazyLock},
};

/// Matches `{{ VAR_NAME }}` with optional whitespace around an uppercase variable name.
static HANDLEBAR_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Z0-9_]+)\s*\}\}").unwrap());

/// Replaces every `{{ VAR_NAME }}` in `input` with the value of the environment
/// variable `VAR_NAME`. Unset variables become empty strings and are logged.
///
/// ```
/// use route_audit::replace_handlebars_with_env;
///
/// let result = replace_handlebars_with_env("base_url = \"{{ ROUTE_AUDIT_UNSET_VAR }}\"");
/// assert_eq!(result, "base_url = \"\"");
/// ```
///
/// This keeps probe targets (`[dry_run].base_url`) and similar per-environment
/// values out of checked-in config files.
pub fn replace_handlebars_with_env(input: &str) -> String {
    HANDLEBAR_REGEXP
        .replace_all(input, |caps: &Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!(
                    variable = %var_name,
                    "Environment variable not found, substituting with empty string"
                );
                String::new()
            })
        })
        .to_string()
}

/// Joins methods the way every report labels a route: `"GET, POST"`.
pub fn join_methods(methods: &[HttpMethod]) -> String {
    methods
        .iter()
        .map(HttpMethod::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
