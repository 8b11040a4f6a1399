use db::models::chat::{ChatMessage, ChatRole};

use super::assistant::Assistant;

pub const GREETING: &str = "🌿 Hi! I’m your Flora Companion. Ask me anything about plant care!";

/// Transcript of one chat. Lives only as long as the session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    assistant: Assistant,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant,
            messages: vec![ChatMessage::bot(GREETING)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Ask the assistant. Blank input is ignored and returns `None`.
    pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::user(text));
        let reply = self.assistant.chat(text).await;
        self.messages.push(ChatMessage::bot(reply));
        self.messages.last()
    }

    /// Start a new chat.
    pub fn reset(&mut self) {
        self.messages = vec![ChatMessage::bot(GREETING)];
    }

    pub fn user_turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config::Latency;

    #[tokio::test]
    async fn send_appends_question_and_answer() {
        let mut chat = ChatSession::new(Assistant::canned(Latency::None));
        let reply = chat.send("  my leaves are yellow  ").await.cloned().unwrap();

        assert_eq!(reply.role, ChatRole::Bot);
        assert!(reply.text.starts_with("Yellow leaves"));
        let messages = chat.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].text, GREETING);
        assert_eq!(messages[1], ChatMessage::user("my leaves are yellow"));
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let mut chat = ChatSession::new(Assistant::canned(Latency::None));
        assert!(chat.send("   ").await.is_none());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.user_turns(), 0);
    }

    #[tokio::test]
    async fn reset_restores_greeting() {
        let mut chat = ChatSession::new(Assistant::canned(Latency::None));
        chat.send("sun?").await;
        chat.reset();
        assert_eq!(chat.messages(), &[ChatMessage::bot(GREETING)]);
    }
}
