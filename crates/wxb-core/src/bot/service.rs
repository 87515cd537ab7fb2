use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::{
    bot::{handlers::reply_for, messages::GENERIC_FAILURE_MESSAGE},
    domain::ChatId,
    messaging::{port::MessagingPort, types::IncomingUpdate},
    weather::WeatherProvider,
};

/// Framework-agnostic bot: turns incoming updates into replies.
///
/// Holds only read-only shared handles; clones are cheap and independent
/// updates may be handled concurrently.
#[derive(Clone)]
pub struct WeatherBot {
    provider: Arc<dyn WeatherProvider>,
    messenger: Arc<dyn MessagingPort>,
    username: Option<Arc<str>>,
}

impl WeatherBot {
    pub fn new(provider: Arc<dyn WeatherProvider>, messenger: Arc<dyn MessagingPort>) -> Self {
        Self {
            provider,
            messenger,
            username: None,
        }
    }

    /// Set the bot's own username; `/cmd@name` commands for other bots are
    /// then ignored.
    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(Arc::from(username));
        self
    }

    /// Handle one update end to end. Never fails and never panics.
    ///
    /// Processing runs in its own task so a panic is contained; any failure
    /// goes through [`WeatherBot::report_failure`].
    pub async fn handle_update(&self, update: IncomingUpdate) {
        let bot = self.clone();
        let task_update = update.clone();
        let outcome = tokio::spawn(async move { bot.process(&task_update).await }).await;

        let failure = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(join) if join.is_panic() => format!("handler panicked: {}", panic_text(join)),
            Err(join) => format!("handler task failed: {join}"),
        };

        self.report_failure(&update.describe(), Some(update.chat_id()), &failure)
            .await;
    }

    async fn process(&self, update: &IncomingUpdate) -> crate::Result<()> {
        if let IncomingUpdate::Command(cmd) = update {
            if !cmd.is_addressed_to(self.username.as_deref()) {
                debug!(
                    command = %cmd.name,
                    mention = cmd.mention.as_deref().unwrap_or_default(),
                    chat_id = cmd.chat_id.0,
                    "ignoring command addressed to another bot"
                );
                return Ok(());
            }
        }

        let Some(reply) = reply_for(update, self.provider.as_ref()).await else {
            return Ok(());
        };
        self.messenger.send_text(update.chat_id(), &reply).await?;
        Ok(())
    }

    /// Catch-all error boundary: log the failure and, when a reply target is
    /// known, send the generic apology once. Failures here are only logged.
    pub async fn report_failure(&self, update: &str, chat_id: Option<ChatId>, err: &str) {
        error!("Update {update} caused error {err}");

        let Some(chat_id) = chat_id else {
            return;
        };
        if let Err(e) = self
            .messenger
            .send_text(chat_id, GENERIC_FAILURE_MESSAGE)
            .await
        {
            warn!(chat_id = chat_id.0, "could not deliver failure notice: {e}");
        }
    }
}

fn panic_text(join: tokio::task::JoinError) -> String {
    let payload = join.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }
    "unknown panic payload".to_string()
}
