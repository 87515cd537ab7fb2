use tracing::{error, info, warn};

use crate::weather::{format::format_report, port::WeatherProvider, types::LookupError};

/// Look up current weather for `city` and render the chat reply.
///
/// Never fails: every [`LookupError`] is logged and mapped to its fixed
/// user-facing message.
pub async fn lookup(provider: &dyn WeatherProvider, city: &str) -> String {
    match provider.current_weather(city).await {
        Ok(report) => format_report(&report),
        Err(e) => {
            let name = provider.name();
            match &e {
                LookupError::Timeout => warn!(city = %city, provider = name, "{e}"),
                LookupError::CityNotFound(_) => info!(city = %city, provider = name, "{e}"),
                LookupError::Transport(_) => {
                    error!(city = %city, provider = name, "Weather API error: {e}")
                }
                LookupError::MalformedResponse(_) => {
                    error!(city = %city, provider = name, "{e}")
                }
            }
            e.user_message().to_string()
        }
    }
}
