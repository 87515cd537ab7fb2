/// Current weather for one location, as normalized by the provider.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Perceived temperature, degrees Celsius.
    pub feels_like: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    pub description: String,
}

/// Closed set of lookup failures. Each kind maps to one fixed reply.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("weather request timed out")]
    Timeout,

    #[error("weather request failed: {0}")]
    Transport(String),

    #[error("city not found: {0}")]
    CityNotFound(String),

    #[error("error parsing weather data: {0}")]
    MalformedResponse(String),
}

pub const TIMEOUT_MESSAGE: &str = "⚠️ Превышено время ожидания ответа от сервера погоды";
pub const TRANSPORT_MESSAGE: &str = "❌ Ошибка при получении данных о погоде";
pub const CITY_NOT_FOUND_MESSAGE: &str =
    "🔍 Город не найден. Проверьте название и попробуйте снова";
pub const MALFORMED_MESSAGE: &str = "❌ Ошибка при обработке данных о погоде";

impl LookupError {
    /// User-facing reply for this failure kind.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Timeout => TIMEOUT_MESSAGE,
            Self::Transport(_) => TRANSPORT_MESSAGE,
            Self::CityNotFound(_) => CITY_NOT_FOUND_MESSAGE,
            Self::MalformedResponse(_) => MALFORMED_MESSAGE,
        }
    }
}
