//! Security coverage configuration.
//!
//! # Example
//!
//! ```toml
//! [security]
//! sensitive_paths = ["/admin", "/delete", "/billing"]
//! auth_handler_names = ["authenticate", "requireSession"]
//! ```
//!
//! Both lists are matched as exact, case-sensitive strings.

use crate::{Error, Result};
use serde::Deserialize;

/// Which routes count as sensitive, and which handler names count as authentication.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SecurityConfig {
    /// Route paths that must be guarded by an authentication handler.
    /// Defaults to `["/admin", "/delete"]`.
    #[serde(default = "SecurityConfig::default_sensitive_paths")]
    pub sensitive_paths: Vec<String>,

    /// Handler names recognized as authentication middleware.
    /// Defaults to `["authenticate", "isAuthenticated", "auth"]`.
    #[serde(default = "SecurityConfig::default_auth_handler_names")]
    pub auth_handler_names: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            sensitive_paths: Self::default_sensitive_paths(),
            auth_handler_names: Self::default_auth_handler_names(),
        }
    }
}

impl SecurityConfig {
    fn default_sensitive_paths() -> Vec<String> {
        vec!["/admin".into(), "/delete".into()]
    }

    fn default_auth_handler_names() -> Vec<String> {
        vec![
            "authenticate".into(),
            "isAuthenticated".into(),
            "auth".into(),
        ]
    }

    /// True when `path` is exactly one of the sensitive paths.
    pub fn is_sensitive(&self, path: &str) -> bool {
        self.sensitive_paths.iter().any(|p| p == path)
    }

    /// True when `handler` is exactly one of the authentication handler names.
    pub fn is_auth_handler(&self, handler: &str) -> bool {
        self.auth_handler_names.iter().any(|name| name == handler)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(path) = self.sensitive_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(Error::config(format!(
                "Sensitive path \"{path}\" must start with '/'"
            )));
        }
        if self.auth_handler_names.iter().any(|n| n.trim().is_empty()) {
            return Err(Error::config(
                "Authentication handler names cannot be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SecurityConfig::default();
        assert!(config.is_sensitive("/admin"));
        assert!(config.is_sensitive("/delete"));
        assert!(!config.is_sensitive("/admin/users"));
        assert!(config.is_auth_handler("isAuthenticated"));
        assert!(!config.is_auth_handler("Authenticate"));
    }

    #[test]
    fn test_partial_toml_keeps_other_default() {
        let config: SecurityConfig = toml::from_str(r#"sensitive_paths = ["/billing"]"#).unwrap();
        assert_eq!(config.sensitive_paths, vec!["/billing".to_string()]);
        assert_eq!(
            config.auth_handler_names,
            SecurityConfig::default().auth_handler_names
        );
    }

    #[test]
    fn test_validate_relative_path_fails() {
        let config = SecurityConfig {
            sensitive_paths: vec!["admin".into()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn test_validate_blank_auth_name_fails() {
        let config = SecurityConfig {
            auth_handler_names: vec!["auth".into(), "  ".into()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_lists_ok() {
        let config = SecurityConfig {
            sensitive_paths: vec![],
            auth_handler_names: vec![],
        };
        assert!(config.validate().is_ok());
    }
}
