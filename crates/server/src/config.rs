use shared_types::{AppConfig, CityTalukaMap};
use std::fmt;
use std::net::SocketAddr;

/// Path to the config file when `APP_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0} must be set")]
    MissingEnv(&'static str),
    #[error("invalid bind address {addr}: {source}")]
    BindAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("config defines no regions; at least one city with talukas is required")]
    NoRegions,
}

/// Everything the service needs at runtime, resolved once at startup.
#[derive(Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub razorpay_key_secret: Option<String>,
    pub regions: CityTalukaMap,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("bind_addr", &self.bind_addr)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("database_max_connections", &self.database_max_connections)
            .field("razorpay_configured", &self.razorpay_key_secret.is_some())
            .field("regions", &self.regions.len())
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Load `.env`, read the config file (`APP_CONFIG` or `config.toml`),
    /// and combine it with secrets from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignored in production where env vars are set directly).
        let _ = dotenvy::dotenv();

        let path = std::env::var("APP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: AppConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?;

        Self::from_config(config, |key| std::env::var(key).ok())
    }

    /// Build settings from a parsed config and an environment lookup.
    pub fn from_config<F>(config: AppConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if config.regions.is_empty() {
            return Err(ConfigError::NoRegions);
        }

        let bind_addr = config
            .server
            .bind_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::BindAddr {
                addr: config.server.bind_addr.clone(),
                source,
            })?;

        let database_url =
            non_empty("DATABASE_URL").ok_or(ConfigError::MissingEnv("DATABASE_URL"))?;
        let jwt_secret = non_empty("JWT_SECRET").ok_or(ConfigError::MissingEnv("JWT_SECRET"))?;

        let database_max_connections = env("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Ok(Self {
            bind_addr,
            max_body_bytes: config.server.max_body_bytes,
            database_url,
            database_max_connections,
            jwt_secret,
            razorpay_key_secret: non_empty("RAZORPAY_KEY_SECRET"),
            regions: config.regions,
        })
    }
}
