//! Bot configuration

use reprezzent_shared_config::{
    parse_env, CommonConfig, ConfigError, ConfigResult,
};

/// Default number of items shown per page
const DEFAULT_PAGE_SIZE: usize = 10;

/// Full bot configuration, assembled from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub common: CommonConfig,

    /// Items per browsing page
    pub page_size: usize,

    /// OpenWeatherMap key; weather command disabled when absent
    pub weather_api_key: Option<String>,

    /// Balaboba base URL; text generation disabled when absent
    pub balaboba_url: Option<String>,
}

impl Config {
    pub fn from_env() -> ConfigResult<Self> {
        let config = Self {
            common: CommonConfig::from_env()?,
            page_size: parse_env("BROWSER_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            weather_api_key: std::env::var("OPENWEATHER_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            balaboba_url: std::env::var("BALABOBA_URL")
                .ok()
                .filter(|url| !url.is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "BROWSER_PAGE_SIZE must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
