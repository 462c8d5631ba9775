use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::pagination::DEFAULT_PAGE_SIZE;

const DEFAULT_BASE_URL: &str = "https://api.coinranking.com/v2";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub host: String,
    pub port: u16,
    pub page_size: u32,
    pub request_timeout: Duration,
    pub session_idle: Duration,
    pub session_sweep: Duration,
}

impl Config {
    pub fn init() -> Result<Self, ConfigError> {
        dotenv().ok();

        let base_url = env::var("COINRANKING_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let api_key = env::var("COINRANKING_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let host = env::var("DASHBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Self {
            base_url,
            api_key,
            host,
            port: numeric_var("DASHBOARD_PORT", 3000)?,
            page_size: numeric_var("DASHBOARD_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            request_timeout: Duration::from_secs(numeric_var("REQUEST_TIMEOUT_SECS", 5)?),
            session_idle: Duration::from_secs(numeric_var("SESSION_IDLE_SECS", 900)?),
            session_sweep: Duration::from_secs(numeric_var::<u64>("SESSION_SWEEP_SECS", 60)?.max(1)),
        })
    }
}

fn numeric_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::NotANumber { name, value }),
        Err(_) => Ok(default),
    }
}
