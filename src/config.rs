use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_dir::{app_user_data_dir_path, app_user_data_file_path};
use crate::ui::theme::ThemeMode;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "CRT_";
pub const DEFAULT_DATABASE_FILE: &str = "tokens.db";
pub const DEFAULT_GAS_LIMIT: u64 = 250_000;
pub const DEFAULT_GAS_PRICE: &str = "0.0000004";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    LoadError(String),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] envy::Error),
}

/// Chain the wallet tracks tokens on. Tokens are stored per network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

fn default_gas_price() -> String {
    DEFAULT_GAS_PRICE.to_string()
}

/// Settings read from `CRT_*` environment variables, optionally seeded from
/// the `.env` file in the app data directory.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub network: Network,
    /// Relative names resolve inside the app data directory
    #[serde(default = "default_database_file")]
    pub database_file: String,
    /// `tracing_subscriber::EnvFilter` directives
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    #[serde(default = "default_gas_price")]
    pub gas_price: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::default(),
            database_file: default_database_file(),
            log_filter: default_log_filter(),
            theme: ThemeMode::default(),
            gas_limit: DEFAULT_GAS_LIMIT,
            gas_price: default_gas_price(),
        }
    }
}

impl Config {
    /// Load the `.env` file if one exists, then read the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let env_file_path =
            app_user_data_file_path(".env").map_err(|e| ConfigError::LoadError(e.to_string()))?;
        if env_file_path.exists() {
            if let Err(err) = dotenvy::from_path_override(&env_file_path) {
                tracing::warn!(
                    ?err,
                    "Failed to load .env file. Continuing with environment variables."
                );
            } else {
                tracing::info!(path = %env_file_path.display(), "Loaded .env file");
            }
        }

        Ok(envy::prefixed(ENV_PREFIX).from_env::<Config>()?)
    }

    /// Build a config from explicit `CRT_*` pairs instead of the process environment.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter::<_, Config>(pairs)?)
    }

    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let path = Path::new(&self.database_file);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let dir = app_user_data_dir_path().map_err(|e| ConfigError::LoadError(e.to_string()))?;
        Ok(dir.join(path))
    }

    /// Write the current configuration back to the `.env` file so that
    /// subsequent calls to `Config::load()` will reflect changes.
    pub fn save(&self) -> Result<(), ConfigError> {
        let env_file_path =
            app_user_data_file_path(".env").map_err(|e| ConfigError::LoadError(e.to_string()))?;
        self.write_env_file(&env_file_path)
    }

    fn write_env_file(&self, path: &Path) -> Result<(), ConfigError> {
        let mut env_file = File::create(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        let lines = [
            ("NETWORK", self.network.as_str().to_string()),
            ("DATABASE_FILE", self.database_file.clone()),
            ("LOG_FILTER", self.log_filter.clone()),
            ("THEME", self.theme.as_str().to_string()),
            ("GAS_LIMIT", self.gas_limit.to_string()),
            ("GAS_PRICE", self.gas_price.clone()),
        ];
        for (key, value) in lines {
            writeln!(env_file, "{}{}={}", ENV_PREFIX, key, value)
                .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        }
        Ok(())
    }
}
