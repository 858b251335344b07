use serde::Deserialize;

/// Environment prefix for every configuration key.
pub const ENV_PREFIX: &str = "RAGA_WELLNESS";

/// Root application configuration. Loaded from environment variables
/// with the prefix `RAGA_WELLNESS__` (nested keys separated by `__`).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

/// Recommendation engine tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Probability of exploring a uniformly random cluster instead of the
    /// best-scoring one. Must lie in `[0, 1]`.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default functions
fn default_node_id() -> String {
    "node-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_epsilon() -> f64 {
    0.1
}
fn default_metrics_enabled() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            engine: EngineConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_prefix(ENV_PREFIX)
    }

    fn load_with_prefix(prefix: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix(prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.node_id, "node-01");
        assert_eq!(config.api.http_port, 8080);
        assert!((config.engine.epsilon - 0.1).abs() < f64::EPSILON);
        assert!(config.metrics.enabled);
        assert_eq!(config.metrics.port, 9091);
    }

    #[test]
    fn test_empty_environment_falls_back_to_defaults() {
        let config = AppConfig::load_with_prefix("RAGA_TEST_UNSET_PREFIX").unwrap();
        assert_eq!(config.api.host, "0.0.0.0");
        assert!((config.engine.epsilon - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_environment_overrides() {
        std::env::set_var("RAGA_TEST_OVERRIDE__ENGINE__EPSILON", "0.25");
        std::env::set_var("RAGA_TEST_OVERRIDE__API__HTTP_PORT", "8181");
        std::env::set_var("RAGA_TEST_OVERRIDE__NODE_ID", "wellness-02");

        let config = AppConfig::load_with_prefix("RAGA_TEST_OVERRIDE").unwrap();
        assert!((config.engine.epsilon - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.api.http_port, 8181);
        assert_eq!(config.node_id, "wellness-02");
        assert_eq!(config.metrics.port, 9091);
    }
}
