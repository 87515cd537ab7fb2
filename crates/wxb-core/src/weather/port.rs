use async_trait::async_trait;

use crate::weather::types::{LookupError, WeatherReport};

/// Hexagonal port for a current-weather data source.
///
/// Implementations perform exactly one attempt per call and classify every
/// failure into a [`LookupError`].
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, LookupError>;

    fn name(&self) -> &'static str;
}
