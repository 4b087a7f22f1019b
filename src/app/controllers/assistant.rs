use crate::app::in_flight::InFlight;
use crate::core::chat::ChatSession;
use crate::domain::model::ChatMessage;
use crate::domain::ports::ChatCollaborator;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// HemoBot panel. Collaborator failures are absorbed by the session, so
/// the only error a caller sees is `Busy`.
pub struct AssistantController {
    collaborator: Arc<dyn ChatCollaborator>,
    session: Mutex<ChatSession>,
    sending: InFlight,
}

impl AssistantController {
    pub fn new(collaborator: Arc<dyn ChatCollaborator>) -> Self {
        Self {
            collaborator,
            session: Mutex::new(ChatSession::new()),
            sending: InFlight::new(),
        }
    }

    /// `Ok(None)` for blank input.
    pub async fn ask(&self, input: &str) -> Result<Option<ChatMessage>> {
        let _guard = self.sending.try_begin("ask assistant")?;

        let mut session = self.session.lock().await;
        Ok(session
            .send(self.collaborator.as_ref(), input)
            .await
            .cloned())
    }

    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.session.lock().await.messages().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::{CONNECTION_FALLBACK, GREETING};
    use crate::domain::model::ChatRole;
    use crate::utils::error::BloodBankError;
    use async_trait::async_trait;

    struct Offline;

    #[async_trait]
    impl ChatCollaborator for Offline {
        async fn send_message(&self, _message: &str, _history: &[String]) -> Result<String> {
            Err(BloodBankError::network("generateContent", "offline"))
        }
    }

    #[tokio::test]
    async fn test_offline_collaborator_yields_fallback_reply() {
        let controller = AssistantController::new(Arc::new(Offline));

        let reply = controller.ask("Can I donate after a cold?").await.unwrap().unwrap();

        assert_eq!(reply.role, ChatRole::Model);
        assert_eq!(reply.text, CONNECTION_FALLBACK);
        let transcript = controller.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].text, GREETING);
    }

    #[tokio::test]
    async fn test_blank_question_is_ignored() {
        let controller = AssistantController::new(Arc::new(Offline));
        assert!(controller.ask("   ").await.unwrap().is_none());
        assert_eq!(controller.transcript().await.len(), 1);
    }
}
