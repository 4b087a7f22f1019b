//! Assistant chat transcript and prompt construction.
//!
//! The model behind [`ChatCollaborator`] is external. This module only keeps
//! the ordered transcript, renders it as context, and turns failures into the
//! fixed replies shown to the user.

use crate::domain::model::{ChatMessage, ChatRole};
use crate::domain::ports::ChatCollaborator;

pub const GREETING: &str = "Hello! I am HemoBot, your AI assistant for the blood bank. I can help with blood compatibility queries, donation eligibility, or storage guidelines. How can I assist you today?";

pub const EMPTY_REPLY_FALLBACK: &str =
    "I'm sorry, I couldn't generate a response at this time.";

pub const CONNECTION_FALLBACK: &str = "I am currently unable to connect to the server. Please check your API key or internet connection.";

pub const SYSTEM_INSTRUCTION: &str = r#"You are HemoBot, an expert AI assistant for a Blood Bank Management System.
Your role is to assist administrators and medical staff with:
1. Blood compatibility (e.g., "Can O+ donate to A+?").
2. Storage and handling guidelines for blood components.
3. Donor eligibility criteria based on WHO/Red Cross standards.
4. Analyzing trends if data is provided.

Keep your answers concise, professional, and medically accurate.
If a query is about a specific medical emergency, advise them to consult a doctor immediately.
Do not make up medical facts."#;

/// 組合送給模型的提示：先放對話歷史，再放使用者問題
pub fn build_prompt(message: &str, history: &[String]) -> String {
    format!(
        "Previous conversation context: {}\nUser Query: {}",
        history.join("\n"),
        message
    )
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Model, GREETING)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Transcript so far, one `role: text` line per turn.
    pub fn history(&self) -> Vec<String> {
        self.messages.iter().map(ChatMessage::history_line).collect()
    }

    /// Send `input` and record both turns. Blank input is ignored and
    /// returns `None`. Collaborator failures never escape: they become the
    /// fallback reply.
    pub async fn send(
        &mut self,
        collaborator: &dyn ChatCollaborator,
        input: &str,
    ) -> Option<&ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }

        // 歷史只包含這次提問之前的訊息
        let history = self.history();
        self.messages.push(ChatMessage::new(ChatRole::User, input));

        let reply = match collaborator.send_message(input, &history).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!("Assistant returned an empty reply");
                EMPTY_REPLY_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::error!("❌ Assistant request failed: {}", e);
                CONNECTION_FALLBACK.to_string()
            }
        };

        self.messages.push(ChatMessage::new(ChatRole::Model, reply));
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{BloodBankError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedCollaborator {
        reply: Option<String>,
        seen: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl ScriptedCollaborator {
        fn replying(reply: Option<&str>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatCollaborator for ScriptedCollaborator {
        async fn send_message(&self, message: &str, history: &[String]) -> Result<String> {
            self.seen
                .lock()
                .unwrap()
                .push((message.to_string(), history.to_vec()));
            self.reply
                .clone()
                .ok_or_else(|| BloodBankError::network("gemini", "connection refused"))
        }
    }

    #[test]
    fn test_build_prompt() {
        let prompt = build_prompt("Can O- donate to AB+?", &["model: Hi".into(), "user: Hello".into()]);
        assert_eq!(
            prompt,
            "Previous conversation context: model: Hi\nuser: Hello\nUser Query: Can O- donate to AB+?"
        );
    }

    #[test]
    fn test_session_opens_with_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.history(), vec![format!("model: {}", GREETING)]);
    }

    #[tokio::test]
    async fn test_send_passes_prior_history() {
        let bot = ScriptedCollaborator::replying(Some("Yes, O- is the universal donor."));
        let mut session = ChatSession::new();

        let reply = session.send(&bot, "Can O- donate to AB+?").await.unwrap();
        assert_eq!(reply.role, ChatRole::Model);
        assert_eq!(reply.text, "Yes, O- is the universal donor.");

        let seen = bot.seen.lock().unwrap();
        assert_eq!(seen[0].0, "Can O- donate to AB+?");
        assert_eq!(seen[0].1.len(), 1);
        drop(seen);

        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.history()[1], "user: Can O- donate to AB+?");
    }

    #[tokio::test]
    async fn test_failures_become_fallback_replies() {
        let mut session = ChatSession::new();

        let down = ScriptedCollaborator::replying(None);
        let reply = session.send(&down, "hello").await.unwrap();
        assert_eq!(reply.text, CONNECTION_FALLBACK);

        let silent = ScriptedCollaborator::replying(Some("   "));
        let reply = session.send(&silent, "hello again").await.unwrap();
        assert_eq!(reply.text, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let bot = ScriptedCollaborator::replying(Some("unused"));
        let mut session = ChatSession::new();
        assert!(session.send(&bot, "   ").await.is_none());
        assert_eq!(session.messages().len(), 1);
        assert!(bot.seen.lock().unwrap().is_empty());
    }
}
