use std::{future::Future, pin::Pin, sync::Arc};

use teloxide::{
    dispatching::{Dispatcher, UpdateHandler},
    dptree,
    error_handlers::ErrorHandler,
    prelude::*,
    types::BotCommand,
    RequestError,
};
use tracing::{info, warn};

use wxb_core::{
    bot::{messages::COMMAND_MENU, WeatherBot},
    config::Config,
    messaging::port::MessagingPort,
    weather::WeatherProvider,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub bot: WeatherBot,
}

/// Routes dispatcher-level failures (no update at hand) into the core error
/// boundary, which only logs them.
struct ReportingErrorHandler {
    bot: WeatherBot,
}

impl ErrorHandler<RequestError> for ReportingErrorHandler {
    fn handle_error(
        self: Arc<Self>,
        error: RequestError,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        Box::pin(async move {
            self.bot
                .report_failure("<dispatcher>", None, &error.to_string())
                .await;
        })
    }
}

pub async fn run_polling(
    cfg: Arc<Config>,
    provider: Arc<dyn WeatherProvider>,
) -> anyhow::Result<()> {
    let tg = Bot::new(cfg.bot_token.clone());

    // Basic startup info.
    let username = match tg.get_me().await {
        Ok(me) => {
            info!("Bot started: @{}", me.username());
            Some(me.username().to_string())
        }
        Err(e) => {
            warn!("could not fetch bot info: {e}");
            None
        }
    };
    info!(
        provider = provider.name(),
        lang = %cfg.weather_lang,
        timeout_secs = cfg.weather_timeout.as_secs(),
        "weather provider ready"
    );

    register_commands(&tg).await;

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(tg.clone()));
    let mut bot = WeatherBot::new(provider, messenger);
    if let Some(username) = &username {
        bot = bot.with_username(username);
    }
    let state = Arc::new(AppState { bot: bot.clone() });

    Dispatcher::builder(tg, schema())
        .dependencies(dptree::deps![state])
        .error_handler(Arc::new(ReportingErrorHandler { bot }))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot stopped");
    Ok(())
}

/// New and edited messages take the same path.
fn schema() -> UpdateHandler<RequestError> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(handlers::handle_message))
        .branch(Update::filter_edited_message().endpoint(handlers::handle_message))
}

/// Publish the command menu. Best-effort: the bot works without it.
async fn register_commands(tg: &Bot) {
    let commands: Vec<BotCommand> = COMMAND_MENU
        .iter()
        .map(|(name, description)| BotCommand::new(*name, *description))
        .collect();

    if let Err(e) = tg.set_my_commands(commands).await {
        warn!("could not register bot commands: {e}");
    }
}

#[cfg(test)]
mod tests {
    use std::{ops::ControlFlow, sync::Mutex};

    use async_trait::async_trait;
    use serde_json::json;
    use wxb_core::{
        domain::{ChatId, MessageId, MessageRef},
        weather::{format::format_report, LookupError, WeatherReport},
    };

    use super::*;

    fn report() -> WeatherReport {
        WeatherReport {
            city: "Paris".to_string(),
            temperature: 18.5,
            feels_like: 17.0,
            humidity: 60.0,
            description: "clear sky".to_string(),
        }
    }

    struct StaticProvider;

    #[async_trait]
    impl WeatherProvider for StaticProvider {
        async fn current_weather(&self, _city: &str) -> Result<WeatherReport, LookupError> {
            Ok(report())
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    #[derive(Default)]
    struct Outbox(Mutex<Vec<(ChatId, String)>>);

    #[async_trait]
    impl MessagingPort for Outbox {
        async fn send_text(&self, chat_id: ChatId, text: &str) -> wxb_core::Result<MessageRef> {
            let mut sent = self.0.lock().unwrap();
            sent.push((chat_id, text.to_string()));
            Ok(MessageRef {
                chat_id,
                message_id: MessageId(sent.len() as i32),
            })
        }
    }

    fn message_json(text: &str) -> serde_json::Value {
        json!({
            "message_id": 10,
            "date": 1_700_000_000,
            "chat": { "id": 42, "type": "private", "first_name": "Ann" },
            "from": { "id": 7, "is_bot": false, "first_name": "Ann" },
            "text": text
        })
    }

    async fn dispatch(update: serde_json::Value) -> Vec<(ChatId, String)> {
        let outbox = Arc::new(Outbox::default());
        let bot = WeatherBot::new(Arc::new(StaticProvider), outbox.clone());
        let state = Arc::new(AppState { bot });
        let update: Update = serde_json::from_str(&update.to_string()).unwrap();

        match schema().dispatch(dptree::deps![update, state]).await {
            ControlFlow::Break(result) => result.unwrap(),
            ControlFlow::Continue(_) => panic!("update was not handled"),
        }

        let sent = outbox.0.lock().unwrap().clone();
        sent
    }

    #[tokio::test]
    async fn new_message_gets_a_report() {
        let sent = dispatch(json!({ "update_id": 1, "message": message_json("Paris") })).await;
        assert_eq!(sent, vec![(ChatId(42), format_report(&report()))]);
    }

    #[tokio::test]
    async fn edited_message_gets_a_fresh_report() {
        let mut edited = message_json("Paris");
        edited["edit_date"] = json!(1_700_000_060);

        let sent = dispatch(json!({ "update_id": 2, "edited_message": edited })).await;
        assert_eq!(sent, vec![(ChatId(42), format_report(&report()))]);
    }
}
