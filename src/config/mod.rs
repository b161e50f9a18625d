//!
//! Configuration structures for an audit run.
//!
//! A configuration can be created in several ways:
//! - From a TOML file via `Config::from_toml_file`
//! - From a TOML string via `Config::from_toml` or `str::parse`
//! - Constructed programmatically via the builder methods on `Config`
//!
//! In the TOML-based methods, environment variables can be referenced using the
//! {{ VAR_NAME }} syntax and are substituted before parsing (see
//! `replace_handlebars_with_env`). This keeps per-environment values such as
//! the dry-run base URL out of checked-in files.
//!
//! Configuration is split into logical sections, each represented by their own struct:
//!
//! - `SecurityConfig` for sensitive paths and authentication handler names
//! - `DryRunConfig` for the probe target and per-probe deadline
//! - `ReportConfig` for OpenAPI document metadata
//! - `LoggingConfig` for logging and tracing settings
//!
mod dry_run;
mod logging;
mod report;
mod security;

pub use dry_run::*;
pub use logging::*;
pub use report::*;
pub use security::*;

use {
    crate::{Error, Result, utils::replace_handlebars_with_env},
    serde::Deserialize,
    std::{fs, path::Path, str::FromStr, time::Duration},
};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub dry_run: DryRunConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    ///
    /// Loads the configuration file at `path`, substitutes any environment
    /// variables, and returns a Config struct.
    ///
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&text)
    }

    ///
    /// Parses a configuration string in TOML format into a Config struct.
    ///
    pub fn from_toml(toml_str: &str) -> Result<Config> {
        toml_str.parse()
    }

    /// Replaces the sensitive paths of the SecurityConfig.
    pub fn with_sensitive_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.security.sensitive_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the authentication handler names of the SecurityConfig.
    pub fn with_auth_handler_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.security.auth_handler_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the base URL probed by the dry run.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.dry_run.base_url = Some(url.into());
        self
    }

    /// Sets the per-probe deadline of the dry run.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.dry_run.timeout = Some(timeout);
        self
    }

    /// Sets the title stamped onto OpenAPI documents.
    pub fn with_report_title(mut self, title: impl Into<String>) -> Self {
        self.report.title = title.into();
        self
    }

    /// Sets the log format of the LoggingConfig.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.logging.format = format;
        self
    }

    /// Sets the log filter directives of the LoggingConfig.
    pub fn with_log_filter(mut self, directives: impl Into<String>) -> Self {
        self.logging.filter = Some(directives.into());
        self
    }

    /// Ensures that the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        self.security.validate()?;
        self.dry_run.validate()?;
        self.report.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    ///
    /// Sets up the tracing subscriber for logging based on the LoggingConfig.
    /// Logs go to stderr so that reports printed to stdout stay machine-readable.
    /// The filter comes from `RUST_LOG`, then `[logging].filter`, falling back
    /// to `route_audit=info`.
    ///
    /// NOTE: This should be called early during startup to ensure logging is configured
    ///       before any log messages are emitted.
    ///
    pub fn setup_tracing(&self) {
        use tracing_subscriber::prelude::*;
        let env_filter = self.logging.env_filter();
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        match self.logging.format {
            LogFormat::Json => {
                let _ = tracing_subscriber::registry()
                    .with(layer.json())
                    .with(env_filter)
                    .try_init();
            }
            LogFormat::Default => {
                let _ = tracing_subscriber::registry()
                    .with(layer)
                    .with(env_filter)
                    .try_init();
            }
            LogFormat::Compact => {
                let _ = tracing_subscriber::registry()
                    .with(layer.compact())
                    .with(env_filter)
                    .try_init();
            }
            LogFormat::Pretty => {
                let _ = tracing_subscriber::registry()
                    .with(layer.pretty())
                    .with(env_filter)
                    .try_init();
            }
        }
    }
}

///
/// Parses a configuration string with references to environment variables
/// into a Config struct by substituting the environment variables and then
/// parsing the resulting TOML.
///
impl FromStr for Config {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let config_file = replace_handlebars_with_env(s);
        let config = toml::from_str::<Config>(&config_file)?;
        Ok(config)
    }
}
