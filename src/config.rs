use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub session_file: PathBuf,
    pub http_timeout: Duration,
    pub log_level: String,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let session_file = match env::var("NOMADS_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_file()?,
        };
        let timeout_secs = get_env_parse_or("HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            api_base_url: parse_base_url(&api_base_url)?,
            session_file,
            http_timeout: Duration::from_secs(timeout_secs),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    /// Configuration pointing at an explicit backend, used by embedders and tests.
    pub fn for_base_url(base_url: &str, session_file: PathBuf) -> Result<Self> {
        Ok(Self {
            api_base_url: parse_base_url(base_url)?,
            session_file,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: "info".to_string(),
            log_json: false,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid value for API_BASE_URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "API_BASE_URL must be http(s), got {}",
            url.scheme()
        )));
    }
    Ok(url)
}

fn default_session_file() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("remote-nomads").join("session.json"))
        .ok_or_else(|| {
            Error::Config("Could not determine a config directory; set NOMADS_SESSION_FILE".to_string())
        })
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
