use std::sync::Arc;

use tracing::error;

use wxb_core::config::{self, Config};
use wxb_openweather::OpenWeatherClient;

#[tokio::main]
async fn main() -> Result<(), wxb_core::Error> {
    let cfg = Config::load();
    let log_dir = match &cfg {
        Ok(cfg) => cfg.log_dir.clone(),
        Err(_) => config::log_dir_from_env(),
    };
    wxb_core::logging::init("wxb", &log_dir)?;

    let cfg = match cfg {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Required tokens not found in environment: {e}");
            std::process::exit(1);
        }
    };

    let provider = Arc::new(OpenWeatherClient::from_config(&cfg)?);

    wxb_telegram::router::run_polling(cfg, provider)
        .await
        .map_err(|e| wxb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
