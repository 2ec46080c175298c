use config::{Config, File};
use dotenv::dotenv;
use eyre::{eyre, Result};
use serde::{de::DeserializeOwned, Deserialize};

fn config_from_env() -> Result<AppConfig> {
    dotenv().ok();

    let settings = Config::builder()
        .add_source(File::with_name("config.yaml").required(false))
        .add_source(
            config::Environment::default()
                .separator("__")
                .list_separator(","),
        )
        .build()?;

    settings.try_deserialize().map_err(eyre::Error::from)
}

pub trait LoadFromEnv: Sized + DeserializeOwned {
    fn load() -> Result<Self>;
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub executor: Option<ExecutorConfig>,
    pub api: Option<ApiConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiConfig {
    pub database: DatabaseConfig,
    pub port: u16,
}

/// REST endpoints and polling cadence for one bridge deployment.
#[derive(Deserialize, Debug, Clone)]
pub struct ChainConfig {
    pub l1_rest_url: String,
    pub l2_rest_url: String,
    pub bridge_id: u64,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExecutorSettings {
    /// Fraction of the bridge's submission interval that must elapse before
    /// a new output is finalized, in (0, 1].
    pub submission_threshold: f64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExecutorConfig {
    pub database: DatabaseConfig,
    pub chain: ChainConfig,
    pub settings: ExecutorSettings,
}

impl LoadFromEnv for ExecutorConfig {
    fn load() -> Result<Self> {
        config_from_env()?
            .executor
            .ok_or_else(|| eyre!("Configuration for the 'executor' service is missing."))
    }
}

impl LoadFromEnv for ApiConfig {
    fn load() -> Result<Self> {
        config_from_env()?
            .api
            .ok_or_else(|| eyre!("Configuration for the 'api' service is missing."))
    }
}
