//! Update handlers.
//!
//! Each handler is a pure function of the update and the weather provider
//! returning the reply text, so they can be exercised without a live bot.

use tracing::debug;

use crate::{
    bot::messages::{HELP_MESSAGE, MISSING_CITY_MESSAGE, START_MESSAGE},
    messaging::types::{Command, IncomingUpdate, TextMessage},
    weather::{lookup, WeatherProvider},
};

/// Produce the reply for one update, or `None` when the update is ignored.
pub async fn reply_for(update: &IncomingUpdate, provider: &dyn WeatherProvider) -> Option<String> {
    match update {
        IncomingUpdate::Command(cmd) => handle_command(cmd, provider).await,
        IncomingUpdate::Text(msg) => Some(handle_text(msg, provider).await),
    }
}

async fn handle_command(cmd: &Command, provider: &dyn WeatherProvider) -> Option<String> {
    match cmd.name.as_str() {
        "start" => Some(handle_start()),
        "help" => Some(handle_help()),
        "weather" => Some(handle_weather(&cmd.args, provider).await),
        other => {
            debug!(command = other, chat_id = cmd.chat_id.0, "ignoring unknown command");
            None
        }
    }
}

pub fn handle_start() -> String {
    START_MESSAGE.to_string()
}

pub fn handle_help() -> String {
    HELP_MESSAGE.to_string()
}

/// `/weather <city...>`: arguments are re-joined with single spaces.
pub async fn handle_weather(args: &str, provider: &dyn WeatherProvider) -> String {
    let city = args.split_whitespace().collect::<Vec<_>>().join(" ");
    if city.is_empty() {
        return MISSING_CITY_MESSAGE.to_string();
    }
    lookup(provider, &city).await
}

/// Free text: the whole message body is the city.
pub async fn handle_text(msg: &TextMessage, provider: &dyn WeatherProvider) -> String {
    lookup(provider, &msg.text).await
}
