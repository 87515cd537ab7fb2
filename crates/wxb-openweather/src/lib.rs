//! OpenWeatherMap adapter (current weather).
//!
//! Implements the `wxb-core` WeatherProvider port over the
//! `data/2.5/weather` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use wxb_core::{
    config::Config,
    errors::Error,
    weather::{LookupError, WeatherProvider, WeatherReport},
    Result,
};

#[derive(Clone, Debug)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    lang: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    main: MainReadings,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

impl OpenWeatherClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        lang: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::External(format!("http client build error: {e}")))?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            lang: lang.into(),
            http,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(
            cfg.weather_api_key.clone(),
            cfg.weather_api_url.clone(),
            cfg.weather_lang.clone(),
            cfg.weather_timeout,
        )
    }

    async fn fetch(&self, city: &str) -> std::result::Result<WeatherReport, LookupError> {
        debug!(city = %city, lang = %self.lang, "requesting current weather");
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
            .map_err(classify_transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::CityNotFound(city.to_string()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LookupError::Transport(format!(
                "{status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let bytes = resp.bytes().await.map_err(classify_transport)?;
        parse_report(&bytes)
    }
}

fn classify_transport(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        return LookupError::Timeout;
    }
    // Strip the URL: it carries the API key.
    LookupError::Transport(e.without_url().to_string())
}

fn parse_report(body: &[u8]) -> std::result::Result<WeatherReport, LookupError> {
    let data: CurrentWeatherResponse = serde_json::from_slice(body)
        .map_err(|e| LookupError::MalformedResponse(e.to_string()))?;

    let Some(condition) = data.weather.into_iter().next() else {
        return Err(LookupError::MalformedResponse(
            "empty `weather` list".to_string(),
        ));
    };

    Ok(WeatherReport {
        city: data.name,
        temperature: data.main.temp,
        feels_like: data.main.feels_like,
        humidity: data.main.humidity,
        description: condition.description,
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> std::result::Result<WeatherReport, LookupError> {
        self.fetch(city).await
    }

    fn name(&self) -> &'static str {
        "OpenWeatherMap"
    }
}
