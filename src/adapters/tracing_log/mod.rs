// Tracing log adapter - Structured logging using tracing crate

use tracing_subscriber::EnvFilter;

use crate::adapters::toml_config::LoggingConfig;

/// Logging options resolved from CLI and configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Default directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl From<&LoggingConfig> for LogSettings {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            json: config.json,
        }
    }
}

/// Tracing log adapter
pub struct TracingLogAdapter;

impl TracingLogAdapter {
    /// Build the filter: `RUST_LOG` wins, otherwise the configured level
    pub fn env_filter(settings: &LogSettings) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level))
    }

    /// Install the global subscriber, writing to stderr.
    ///
    /// Safe to call more than once; later calls are ignored.
    pub fn init(settings: &LogSettings) {
        let filter = Self::env_filter(settings);
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        let result = if settings.json {
            builder.json().try_init()
        } else {
            builder.compact().try_init()
        };

        if result.is_err() {
            tracing::debug!("Tracing subscriber already initialized");
        }
    }
}
