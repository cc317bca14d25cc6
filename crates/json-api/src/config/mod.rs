//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Venda JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "venda-json", about = "Venda JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from `.env`, the environment and CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;
    use venda_app::database::PoolSettings;

    use super::*;
    use crate::config::observability::LogFormat;

    #[test]
    fn flags_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "venda-json",
            "--port",
            "9000",
            "--log-format",
            "json",
            "--slow-request-threshold-ms",
            "250",
            "--database-url",
            "postgres://localhost/venda",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
        assert!(matches!(config.logging.log_format, LogFormat::Json));
        assert_eq!(config.observability.slow_request_threshold_ms, 250);
        assert_eq!(config.database.database_url, "postgres://localhost/venda");

        Ok(())
    }

    #[test]
    fn pool_and_grace_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "venda-json",
            "--database-url",
            "postgres://localhost/venda",
        ])?;

        assert_eq!(config.database.pool_settings(), PoolSettings::default());
        assert_eq!(config.server.shutdown_grace(), Duration::from_secs(30));

        Ok(())
    }

    #[test]
    fn pool_flags_shape_the_pool() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "venda-json",
            "--database-url",
            "postgres://localhost/venda",
            "--database-max-connections",
            "32",
            "--database-acquire-timeout-secs",
            "2",
            "--shutdown-grace-secs",
            "5",
        ])?;

        assert_eq!(
            config.database.pool_settings(),
            PoolSettings {
                max_connections: 32,
                acquire_timeout: Duration::from_secs(2),
            }
        );
        assert_eq!(config.server.shutdown_grace(), Duration::from_secs(5));

        Ok(())
    }

    #[test]
    fn empty_pool_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "venda-json",
            "--database-url",
            "postgres://localhost/venda",
            "--database-max-connections",
            "0",
        ]);

        assert!(result.is_err());
    }
}
