//! Logging configuration and subscriber setup

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for local runs.
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive. `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Installs the global subscriber. Call once, before anything logs.
    pub fn init(&self) {
        let builder = tracing_subscriber::fmt().with_env_filter(self.filter());
        match self.format {
            LogFormat::Json => builder.json().init(),
            LogFormat::Text => builder.init(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,gym_ledger=debug,sqlx=warn,tower_http=info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_are_lowercase() {
        let json: LogFormat = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(json, LogFormat::Json);
        assert!(serde_json::from_str::<LogFormat>(r#""JSON""#).is_err());
    }

    #[test]
    fn default_level_is_quiet_for_dependencies() {
        let config = LoggingConfig::default();
        assert!(config.level.contains("gym_ledger=debug"));
        assert!(config.level.contains("sqlx=warn"));
    }
}
