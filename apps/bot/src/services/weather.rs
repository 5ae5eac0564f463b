//! Weather lookup via OpenWeatherMap
//!
//! Two-step flow: geocode the city name into coordinates, then fetch the
//! current conditions for those coordinates in metric units.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("an API key is required for weather access")]
    MissingApiKey,

    #[error("no location found for city '{0}'")]
    UnknownCity(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("weather API returned status {0}")]
    Api(u16),
}

pub type WeatherResult<T> = Result<T, WeatherError>;

/// Current conditions for one location
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub description: String,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub wind_speed_ms: f64,
    pub wind_gust_ms: Option<f64>,
}

impl WeatherReport {
    /// Multi-line reply text mirroring the table-free detail card style
    pub fn render(&self) -> String {
        let mut out = format!(
            "{}: {}\nWeather:\n    Temperature: {}C\n    Feels like: {}C\n    Diapason: from {}C to {}C\nWind:\n    Speed: {} meter/sec",
            self.city,
            capitalize(&self.description),
            self.temp_c,
            self.feels_like_c,
            self.temp_min_c,
            self.temp_max_c,
            self.wind_speed_ms,
        );
        if let Some(gust) = self.wind_gust_ms {
            out.push_str(&format!("\n    Gust: {} meter/sec", gust));
        }
        out
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// Wire types.

#[derive(Debug, Deserialize)]
struct GeoLocation {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    weather: Vec<WeatherCondition>,
    main: WeatherMain,
    wind: WeatherWind,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherWind {
    speed: f64,
    gust: Option<f64>,
}

/// OpenWeatherMap client
#[derive(Clone)]
pub struct WeatherClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl WeatherClient {
    /// # Errors
    /// Returns `WeatherError::MissingApiKey` if the key is empty.
    pub fn new(api_key: impl Into<String>) -> WeatherResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> WeatherResult<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(WeatherError::MissingApiKey);
        }
        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("Reprezzent/1.0")
            .build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> WeatherResult<T> {
        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(WeatherError::Api(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Geocode a city name, with an optional ISO country code qualifier
    async fn geocode(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> WeatherResult<GeoLocation> {
        let query = match country_code {
            Some(code) => format!("{},{}", city, code),
            None => city.to_string(),
        };
        let url = format!(
            "{}/geo/1.0/direct?q={}&limit=1&appid={}",
            self.base_url, query, self.api_key
        );
        let mut locations: Vec<GeoLocation> = self.get_json(&url).await?;
        if locations.is_empty() {
            return Err(WeatherError::UnknownCity(city.to_string()));
        }
        Ok(locations.remove(0))
    }

    /// Fetch current conditions for a city, metric units
    #[instrument(skip(self))]
    pub async fn current_weather(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> WeatherResult<WeatherReport> {
        let location = self.geocode(city, country_code).await?;
        debug!(lat = location.lat, lon = location.lon, "geocoded city");

        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, location.lat, location.lon, self.api_key
        );
        let current: CurrentWeather = self.get_json(&url).await?;

        Ok(WeatherReport {
            city: city.to_string(),
            description: current
                .weather
                .first()
                .map(|c| c.description.clone())
                .unwrap_or_default(),
            temp_c: current.main.temp,
            feels_like_c: current.main.feels_like,
            temp_min_c: current.main.temp_min,
            temp_max_c: current.main.temp_max,
            wind_speed_ms: current.wind.speed,
            wind_gust_ms: current.wind.gust,
        })
    }
}
