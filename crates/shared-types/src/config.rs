use serde::{Deserialize, Serialize};

use crate::region::CityTalukaMap;

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

/// `[server]` section of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Largest request body the scope gates will buffer.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
///
/// `[regions]` is the city → taluka table; it is validated while parsing,
/// so a successfully loaded config always carries a usable map.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub regions: CityTalukaMap,
}
