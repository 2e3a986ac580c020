use crate::primitives::*;
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global logger instance - ensures single initialization
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Handle to the process-wide tracing subscriber
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        // RUST_LOG wins; otherwise skillpack at the configured level and
        // everything else capped at warn
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directives(config.level)));

        let fmt_layer = match (config.output, config.format) {
            (LogOutput::Stderr, LogFormat::Text) => fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.color)
                .compact()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Json) => fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Pretty) => fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.color)
                .pretty()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Text) => fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(config.color)
                .compact()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Json) => fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Pretty) => fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(config.color)
                .pretty()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        let logger = Logger {
            level: config.level,
        };

        GLOBAL_LOGGER
            .set(logger)
            .map_err(|_| LoggerError::AlreadyInitialized)?;

        tracing::debug!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            color = config.color,
            "Logger initialized"
        );

        GLOBAL_LOGGER.get().ok_or(LoggerError::AlreadyInitialized)
    }

    /// Get reference to the global logger instance
    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    /// Check if logger is initialized
    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    /// Level the logger was configured with
    pub fn level(&self) -> LogLevel {
        self.level
    }
}

/// Default `EnvFilter` directives for a verbosity level
pub fn filter_directives(level: LogLevel) -> String {
    let level_str = level.as_directive();
    format!(
        "skillpack={level},skillpack_lib={level},tokio=warn,mio=warn,{level}",
        level = level_str
    )
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
