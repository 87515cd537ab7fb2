use crate::domain::ChatId;

/// Cross-messenger incoming update model.
///
/// Telegram-specific fields should live in the Telegram adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IncomingUpdate {
    Command(Command),
    Text(TextMessage),
}

impl IncomingUpdate {
    /// Reply target of this update.
    pub fn chat_id(&self) -> ChatId {
        match self {
            Self::Command(c) => c.chat_id,
            Self::Text(t) => t.chat_id,
        }
    }

    /// Short human-readable description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Command(c) if c.args.is_empty() => {
                format!("command /{} in chat {}", c.name, c.chat_id.0)
            }
            Self::Command(c) => {
                format!("command /{} {:?} in chat {}", c.name, c.args, c.chat_id.0)
            }
            Self::Text(t) => format!("text {:?} in chat {}", t.text, t.chat_id.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub chat_id: ChatId,
    /// Lower-cased command name without the leading `/` or `@botname`.
    pub name: String,
    /// Lower-cased `@botname` suffix, if the command carried one.
    pub mention: Option<String>,
    /// Everything after the command token, trimmed.
    pub args: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub text: String,
}

impl Command {
    /// Parse a `/cmd[@botname] args...` string.
    ///
    /// Returns `None` when `text` does not start with `/`.
    pub fn parse(chat_id: ChatId, text: &str) -> Option<Self> {
        let text = text.trim();
        if !text.starts_with('/') {
            return None;
        }

        // Telegram may send `/cmd@botname arg1 ...`
        let mut parts = text.splitn(2, char::is_whitespace);
        let first = parts.next().unwrap_or("");
        let args = parts.next().unwrap_or("").trim().to_string();

        let (name, mention) = match first.trim_start_matches('/').split_once('@') {
            Some((name, mention)) => (name, Some(mention.to_lowercase())),
            None => (first.trim_start_matches('/'), None),
        };

        Some(Self {
            chat_id,
            name: name.to_lowercase(),
            mention,
            args,
        })
    }

    /// Whether this command is meant for the bot called `username`.
    ///
    /// Commands without a mention are addressed to every bot in the chat.
    /// With no known username every command is accepted.
    pub fn is_addressed_to(&self, username: Option<&str>) -> bool {
        match (&self.mention, username) {
            (Some(mention), Some(username)) => mention.eq_ignore_ascii_case(username),
            _ => true,
        }
    }
}

impl From<(ChatId, &str)> for IncomingUpdate {
    /// Classify raw message text as a command or free text.
    fn from((chat_id, text): (ChatId, &str)) -> Self {
        match Command::parse(chat_id, text) {
            Some(cmd) => Self::Command(cmd),
            None => Self::Text(TextMessage {
                chat_id,
                text: text.to_string(),
            }),
        }
    }
}
