use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_DOWNLOAD_SERVICE_URL: &str = "http://localhost:5000/";
pub const DEFAULT_USER_API_URL: &str = "http://localhost:3000/";

pub const DOWNLOAD_SERVICE_URL_VAR: &str = "DOWNLOAD_SERVICE_URL";
pub const USER_API_URL_VAR: &str = "USER_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Where the two external services live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub download_service: Url,
    pub user_api: Url,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            download_service: Url::parse(DEFAULT_DOWNLOAD_SERVICE_URL)
                .expect("default download service URL is valid"),
            user_api: Url::parse(DEFAULT_USER_API_URL).expect("default user API URL is valid"),
        }
    }
}

impl ServiceConfig {
    /// Read overrides from the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("loaded environment from {}", path.display());
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(DOWNLOAD_SERVICE_URL_VAR) {
            config.download_service = parse_base_url(DOWNLOAD_SERVICE_URL_VAR, &raw)?;
        }
        if let Some(raw) = lookup(USER_API_URL_VAR) {
            config.user_api = parse_base_url(USER_API_URL_VAR, &raw)?;
        }

        Ok(config)
    }
}

/// Parse a base URL, forcing a trailing slash so relative joins keep its path.
pub fn parse_base_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { var, source })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
