//! Dry-run configuration.
//!
//! # Example
//!
//! ```toml
//! [dry_run]
//! base_url = "{{ APP_BASE_URL }}"
//! timeout = "5s"
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct DryRunConfig {
    /// Base URL of a running application to probe, e.g. `http://localhost:3000`.
    /// An empty string (an unset `{{ VAR }}`) counts as unset.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Deadline for each individual probe. No deadline when unset.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl DryRunConfig {
    /// The configured base URL, ignoring blank values.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = self.base_url() {
            let url = Url::parse(base_url)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::config(format!(
                    "Dry-run base URL must use http or https, got \"{}\"",
                    url.scheme()
                )));
            }
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(Error::config("Dry-run timeout must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_humantime_timeout() {
        let config: DryRunConfig = toml::from_str(
            r#"
base_url = "http://localhost:3000"
timeout = "250ms"
"#,
        )
        .unwrap();
        assert_eq!(config.base_url(), Some("http://localhost:3000"));
        assert_eq!(config.timeout, Some(Duration::from_millis(250)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_base_url_is_unset() {
        let config = DryRunConfig {
            base_url: Some("  ".into()),
            timeout: None,
        };
        assert_eq!(config.base_url(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = DryRunConfig {
            base_url: Some("ftp://example.com".into()),
            timeout: None,
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_validate_rejects_unparseable_url() {
        let config = DryRunConfig {
            base_url: Some("localhost:3000/no scheme".into()),
            timeout: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = DryRunConfig {
            base_url: None,
            timeout: Some(Duration::ZERO),
        };
        assert!(config.validate().is_err());
    }
}
