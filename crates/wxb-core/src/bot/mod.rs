//! Bot behavior: command handlers and the per-update error boundary.

pub mod handlers;
pub mod messages;
pub mod service;

pub use service::WeatherBot;
