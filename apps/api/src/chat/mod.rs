//! Smart assistant chat: an append-only transcript with a simulated coach.

pub mod handlers;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::fixtures::COACH_WELCOME;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Coach,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub sender: Sender,
    /// Wall-clock time of the message as `HH:MM`.
    pub timestamp: String,
}

impl ChatMessage {
    fn now(sender: Sender, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            sender,
            timestamp: format_timestamp(Local::now()),
        }
    }
}

pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachChat {
    messages: Vec<ChatMessage>,
    /// True between a user message and the coach's answer.
    pub composing: bool,
}

impl Default for CoachChat {
    fn default() -> Self {
        Self::new()
    }
}

impl CoachChat {
    /// Opens with the coach's welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::now(Sender::Coach, COACH_WELCOME.to_string())],
            composing: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Appends the user's message verbatim and starts composing a reply.
    pub fn send(&mut self, text: &str) -> Result<ChatMessage, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("Message is empty".to_string()));
        }
        if self.composing {
            return Err(AppError::Conflict(
                "The coach is still answering".to_string(),
            ));
        }

        let message = ChatMessage::now(Sender::User, text.to_string());
        self.messages.push(message.clone());
        self.composing = true;
        Ok(message)
    }

    /// Appends the coach's reply and ends composing.
    pub fn receive_reply(&mut self, reply: String) -> ChatMessage {
        let message = ChatMessage::now(Sender::Coach, reply);
        self.messages.push(message.clone());
        self.composing = false;
        message
    }

    /// Ends composing without a reply.
    pub fn abandon_reply(&mut self) {
        self.composing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_starts_with_welcome() {
        let chat = CoachChat::new();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].sender, Sender::Coach);
        assert!(chat.messages()[0].content.starts_with("Bienvenue"));
    }

    #[test]
    fn test_blank_message_rejected() {
        let mut chat = CoachChat::new();
        assert!(matches!(chat.send("  \n\t"), Err(AppError::Validation(_))));
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.composing);
    }

    #[test]
    fn test_user_text_kept_verbatim() {
        let mut chat = CoachChat::new();
        let sent = chat.send("  Bonjour  ").unwrap();
        assert_eq!(sent.content, "  Bonjour  ");
        assert_eq!(sent.sender, Sender::User);
        assert!(chat.composing);
    }

    #[test]
    fn test_send_while_composing_conflicts() {
        let mut chat = CoachChat::new();
        chat.send("Bonjour").unwrap();
        assert!(matches!(chat.send("Allô?"), Err(AppError::Conflict(_))));
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn test_reply_appends_in_order() {
        let mut chat = CoachChat::new();
        let user_id = chat.send("Bonjour").unwrap().id;
        chat.receive_reply("Salut!".to_string());
        let senders: Vec<Sender> = chat.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::Coach, Sender::User, Sender::Coach]);
        assert_eq!(chat.messages()[1].id, user_id);
        assert!(!chat.composing);
    }

    #[test]
    fn test_returned_messages_are_the_appended_ones() {
        let mut chat = CoachChat::new();
        let sent = chat.send("Bonjour").unwrap();
        assert_eq!(chat.messages().last(), Some(&sent));
        let reply = chat.receive_reply("Salut!".to_string());
        assert_eq!(chat.messages().last(), Some(&reply));
        assert_eq!(reply.sender, Sender::Coach);
    }

    #[test]
    fn test_message_ids_unique() {
        let mut chat = CoachChat::new();
        chat.send("a").unwrap();
        chat.receive_reply("b".to_string());
        let ids: std::collections::HashSet<Uuid> =
            chat.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_timestamp_is_two_digit_hours_minutes() {
        let at = Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap();
        assert_eq!(format_timestamp(at), "09:07");
    }
}
