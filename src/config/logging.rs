use {
    crate::{Error, Result},
    serde::Deserialize,
    std::{fmt, str::FromStr},
    tracing_subscriber::EnvFilter,
};

/// Filter used when neither `RUST_LOG` nor `[logging].filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "route_audit=info";

/// `[logging]`: how audit runs log to stderr.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format: `default`, `json`, `compact` or `pretty`.
    #[serde(default)]
    pub format: LogFormat,

    /// `tracing_subscriber` filter directives, e.g. `"route_audit=debug"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default)]
    pub filter: Option<String>,
}

impl LoggingConfig {
    /// The filter to install: `RUST_LOG`, then `filter`, then [`DEFAULT_LOG_FILTER`].
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            self.filter
                .as_deref()
                .and_then(|directives| EnvFilter::try_new(directives).ok())
                .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(directives) = &self.filter {
            EnvFilter::try_new(directives).map_err(|e| {
                Error::config(format!("Invalid [logging].filter \"{directives}\": {e}"))
            })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Default,
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Default => "default",
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "default" | "full" => Ok(LogFormat::Default),
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(Error::config(format!("Unknown log format: {s}"))),
        }
    }
}
