//! Core domain + application logic for the weather bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and the weather
//! provider live behind ports (traits) implemented in adapter crates.

pub mod bot;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod weather;

pub use errors::{Error, Result};

#[cfg(test)]
pub(crate) mod testing;
