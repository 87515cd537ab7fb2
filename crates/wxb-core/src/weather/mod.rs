//! Weather lookup: provider port, report types and reply formatting.

pub mod format;
pub mod lookup;
pub mod port;
pub mod types;

pub use lookup::lookup;
pub use port::WeatherProvider;
pub use types::{LookupError, WeatherReport};
