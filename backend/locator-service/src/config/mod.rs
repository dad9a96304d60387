use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // HTTP server config
    pub http_host: String,
    pub http_port: u16,

    // SQLite inventory snapshot
    pub database_url: String,
    pub database_max_connections: u32,

    // Observability
    pub log_format: String,

    pub ranking: RankingConfig,
}

/// Tunables for the pharmacy ranker.
///
/// Weights and exponents are starting points, not calibrated constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankingConfig {
    pub max_radius_km: f64,
    pub default_limit: usize,
    pub max_limit: usize,
    pub stock_weight: f64,
    pub distance_weight: f64,
    pub freshness_weight: f64,
    /// Exponent applied to the stock signal (alpha)
    pub stock_exponent: f64,
    /// Exponent applied to the proximity signal (beta)
    pub distance_exponent: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_radius_km: 50.0,
            default_limit: 10,
            max_limit: 50,
            stock_weight: 0.4,
            distance_weight: 0.4,
            freshness_weight: 0.2,
            stock_exponent: 1.0,
            distance_exponent: 2.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("HTTP port must be greater than 0")]
    InvalidPort,

    #[error("Database URL is required")]
    MissingDatabaseUrl,

    #[error("Database pool needs at least one connection")]
    EmptyPool,

    #[error("Unsupported log format: {0}")]
    UnsupportedLogFormat(String),

    #[error("Max radius must be a positive number of kilometres, got {0}")]
    InvalidRadius(f64),

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("Result limits must satisfy 1 <= default_limit ({default_limit}) <= max_limit ({max_limit})")]
    InvalidLimits {
        default_limit: usize,
        max_limit: usize,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = RankingConfig::default();

        let config = config::Config::builder()
            .set_default("http_host", "0.0.0.0")?
            .set_default("http_port", 8012)?
            .set_default("database_url", "sqlite://locator.db?mode=rwc")?
            .set_default("database_max_connections", 5)?
            .set_default("log_format", "pretty")?
            .set_default("ranking.max_radius_km", defaults.max_radius_km)?
            .set_default("ranking.default_limit", defaults.default_limit as u64)?
            .set_default("ranking.max_limit", defaults.max_limit as u64)?
            .set_default("ranking.stock_weight", defaults.stock_weight)?
            .set_default("ranking.distance_weight", defaults.distance_weight)?
            .set_default("ranking.freshness_weight", defaults.freshness_weight)?
            .set_default("ranking.stock_exponent", defaults.stock_exponent)?
            .set_default("ranking.distance_exponent", defaults.distance_exponent)?
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http_port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        if self.database_max_connections == 0 {
            return Err(ConfigError::EmptyPool);
        }

        if !matches!(self.log_format.as_str(), "pretty" | "json") {
            return Err(ConfigError::UnsupportedLogFormat(self.log_format.clone()));
        }

        self.ranking.validate()
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_radius_km.is_finite() || self.max_radius_km <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.max_radius_km));
        }

        let tunables = [
            ("stock_weight", self.stock_weight),
            ("distance_weight", self.distance_weight),
            ("freshness_weight", self.freshness_weight),
            ("stock_exponent", self.stock_exponent),
            ("distance_exponent", self.distance_exponent),
        ];
        for (name, value) in tunables {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(ConfigError::InvalidLimits {
                default_limit: self.default_limit,
                max_limit: self.max_limit,
            });
        }

        Ok(())
    }

    /// Resolve a caller-supplied limit against the configured bounds.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn base_config() -> Config {
        Config {
            http_host: "127.0.0.1".to_string(),
            http_port: 8012,
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            log_format: "pretty".to_string(),
            ranking: RankingConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_ok!(base_config().validate());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let mut config = base_config();
        config.ranking.max_radius_km = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidRadius(0.0)));

        config.ranking.max_radius_km = -5.0;
        assert_err!(config.validate());

        config.ranking.max_radius_km = f64::NAN;
        assert_err!(config.validate());
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut config = base_config();
        config.ranking.freshness_weight = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight {
                name: "freshness_weight",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_inconsistent_limits() {
        let mut config = base_config();
        config.ranking.default_limit = 100;
        config.ranking.max_limit = 20;
        assert_err!(config.validate());

        config.ranking.default_limit = 0;
        assert_err!(config.validate());
    }

    #[test]
    fn test_rejects_bad_server_settings() {
        let mut config = base_config();
        config.http_port = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPort));

        let mut config = base_config();
        config.database_url = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::MissingDatabaseUrl));

        let mut config = base_config();
        config.log_format = "xml".to_string();
        assert_err!(config.validate());
    }

    #[test]
    fn test_effective_limit() {
        let ranking = RankingConfig::default();
        assert_eq!(ranking.effective_limit(None), 10);
        assert_eq!(ranking.effective_limit(Some(3)), 3);
        assert_eq!(ranking.effective_limit(Some(0)), 1);
        assert_eq!(ranking.effective_limit(Some(500)), 50);
    }
}
