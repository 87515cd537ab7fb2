use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{errors::Error, Result};

pub const DEFAULT_WEATHER_API_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_WEATHER_LANG: &str = "ru";
pub const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Typed configuration for the bot.
///
/// Built once at startup and shared read-only (behind `Arc`) for the lifetime
/// of the process.
#[derive(Clone, Debug)]
pub struct Config {
    // Credentials
    pub bot_token: String,
    pub weather_api_key: String,

    // Weather provider
    pub weather_api_url: String,
    pub weather_lang: String,
    pub weather_timeout: Duration,

    // Logging
    pub log_dir: PathBuf,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first.
    ///
    /// Values already present in the environment win over `.env`.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Required
        let bot_token = lookup("BOT_TOKEN").and_then(non_empty);
        let weather_api_key = lookup("WEATHER_API_KEY").and_then(non_empty);

        let Some(bot_token) = bot_token else {
            return Err(Error::Config(
                "BOT_TOKEN environment variable is required".to_string(),
            ));
        };
        let Some(weather_api_key) = weather_api_key else {
            return Err(Error::Config(
                "WEATHER_API_KEY environment variable is required".to_string(),
            ));
        };

        // Provider
        let weather_api_url = lookup("WEATHER_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_string());
        let weather_lang = lookup("WEATHER_LANG")
            .and_then(non_empty)
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|| DEFAULT_WEATHER_LANG.to_string());
        let weather_timeout = Duration::from_secs(
            parse_u64(lookup("WEATHER_TIMEOUT_SECS"))
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_WEATHER_TIMEOUT_SECS),
        );

        let log_dir = lookup("LOG_DIR")
            .and_then(non_empty)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Ok(Self {
            bot_token,
            weather_api_key,
            weather_api_url,
            weather_lang,
            weather_timeout,
            log_dir,
        })
    }
}

/// Log directory from the environment alone.
///
/// Used at startup so a configuration error can still be written to the log
/// file before the full [`Config`] exists.
pub fn log_dir_from_env() -> PathBuf {
    env::var("LOG_DIR")
        .ok()
        .and_then(non_empty)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_u64(v: Option<String>) -> Option<u64> {
    v.and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
