use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub auth: AuthConfig,

    pub security: SecurityConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/sweetshop.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            cors_allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for signing session tokens. Overridable via the
    /// SWEETSHOP_JWT_SECRET environment variable.
    pub jwt_secret: String,

    /// Token validity window in hours (default: 24)
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            token_ttl_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB (default: 8192 = 8MB)
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (default: 1)
    pub argon2_parallelism: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            security: SecurityConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });

        if let Ok(secret) = std::env::var("SWEETSHOP_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }

        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("sweetshop").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".sweetshop").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            anyhow::bail!("auth.jwt_secret cannot be empty");
        }

        if self.auth.token_ttl_hours < 1 {
            anyhow::bail!("auth.token_ttl_hours must be at least 1");
        }

        if self.general.max_db_connections < self.general.min_db_connections {
            anyhow::bail!("general.max_db_connections must be >= min_db_connections");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.security.argon2_time_cost, 3);
        assert!(config.observability.metrics_enabled);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[auth]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [auth]
            token_ttl_hours = 8
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.auth.token_ttl_hours, 8);

        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let mut config = Config::default();
        config.auth.jwt_secret = String::new();
        assert!(config.validate().is_err());
    }
}
