//! Telegram update handlers.
//!
//! Text messages are converted into core `IncomingUpdate`s and handed to the
//! core bot; every other message kind is ignored.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};
use tracing::debug;

use wxb_core::{domain::ChatId, messaging::types::IncomingUpdate};

use crate::router::AppState;

/// Core update for a Telegram message, or `None` for non-text messages.
pub fn incoming_from_message(msg: &Message) -> Option<IncomingUpdate> {
    let text = msg.text()?;
    Some(IncomingUpdate::from((ChatId(msg.chat.id.0), text)))
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(update) = incoming_from_message(&msg) else {
        debug!(chat_id = msg.chat.id.0, "ignoring non-text message");
        return Ok(());
    };

    state.bot.handle_update(update).await;
    Ok(())
}
