//! Message entity for the interview log.
//!
//! Messages are immutable records of what the user typed and what the
//! assistant answered. The log is append-only; alerts are ordinary bot
//! messages tagged with the kind of finding that produced them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MessageId, Timestamp};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Upper-case tag used in transcripts.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Bot => "BOT",
        }
    }
}

/// Kind of finding a bot alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Ambiguity,
    Contradiction,
}

/// An immutable message in the session log.
///
/// # Invariants
///
/// - `text` is non-empty after trimming
/// - only bot messages carry an `alert`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender: Sender,
    text: String,
    timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alert: Option<AlertKind>,
}

impl Message {
    /// Creates a message from the user, keeping the text verbatim.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is empty or whitespace
    pub fn user(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::validation(
                "text",
                "Message text cannot be empty",
            ));
        }
        Ok(Self::composed(Sender::User, text, None))
    }

    /// Builds assistant-authored text that is known to be non-empty.
    pub(crate) fn composed(sender: Sender, text: String, alert: Option<AlertKind>) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            text,
            timestamp: Timestamp::now(),
            alert,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn alert(&self) -> Option<AlertKind> {
        self.alert
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_alert(&self) -> bool {
        self.alert.is_some()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_keeps_text_verbatim() {
        let msg = Message::user("  padded input  ").unwrap();
        assert!(msg.is_user());
        assert_eq!(msg.text(), "  padded input  ");
        assert!(!msg.is_alert());
    }

    #[test]
    fn alert_is_sent_by_bot() {
        let msg = Message::composed(
            Sender::Bot,
            "Be specific".to_string(),
            Some(AlertKind::Ambiguity),
        );
        assert_eq!(msg.sender(), Sender::Bot);
        assert!(!msg.is_user());
        assert_eq!(msg.alert(), Some(AlertKind::Ambiguity));
    }

    #[test]
    fn rejects_whitespace_only_text() {
        assert!(Message::user("   ").is_err());
        assert!(Message::user("").is_err());
    }

    #[test]
    fn sender_tags_are_upper_case() {
        assert_eq!(Sender::User.tag(), "USER");
        assert_eq!(Sender::Bot.tag(), "BOT");
    }

    #[test]
    fn plain_message_omits_alert_in_json() {
        let msg = Message::composed(Sender::Bot, "Hello".to_string(), None);
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("alert").is_none());
        assert_eq!(json["sender"], "bot");
    }

    #[test]
    fn composed_messages_get_distinct_ids() {
        let first = Message::composed(Sender::Bot, "One".to_string(), None);
        let second = Message::composed(Sender::Bot, "Two".to_string(), None);
        assert_ne!(first.id(), second.id());
    }
}
