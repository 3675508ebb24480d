use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Default listen port, matching the original deployment.
const DEFAULT_PORT: u16 = 5000;

/// Default Gemini model for analysis requests.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub common: CommonConfig,
    pub gemini: GeminiSettings,
}

/// Settings shared by every deployment: file-based with `APP__` env
/// overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl AnalyzerConfig {
    /// Load configuration from `.env`, an optional `configuration` file, and
    /// the environment. The Gemini API key has no default anywhere: without
    /// it the process must not start.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let common: CommonConfig = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(AnalyzerConfig {
            common,
            gemini: GeminiSettings {
                api_key: get_env("GEMINI_API_KEY", None)?,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_MODEL))?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}
