pub mod checklist;
pub mod completion;
pub mod error;
pub mod prompt;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use completion::{CompletionClient, CompletionParams};
pub use error::{ClaimError, Result};
pub use session::{
    ChatMessage, ChatRole, ClaimSession, ClaimType, FormField, compose_extra_details,
};
pub use storage::{InMemorySessionStore, SessionStore};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn complete(&self, prompt: &str, _params: CompletionParams) -> Result<String> {
            // Hand back the first prompt line so tests can see which
            // template was used.
            Ok(prompt.lines().next().unwrap_or_default().to_string())
        }
    }

    #[tokio::test]
    async fn session_store_round_trip() {
        let store = InMemorySessionStore::new();

        let mut session = ClaimSession::new();
        session.set_claim_type(ClaimType::Accident);
        session.set_field(FormField::Location, "Pune");
        let id = session.id.clone();

        store.save(session).await.unwrap();

        let loaded = store.get(&id).await.unwrap().unwrap();
        assert_eq!(loaded.claim_type, ClaimType::Accident);
        assert_eq!(loaded.field(FormField::Location), Some("Pune"));

        store.delete(&id).await.unwrap();
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stored_sessions_are_independent_values() {
        let store = InMemorySessionStore::new();
        let session = ClaimSession::new();
        let id = session.id.clone();
        store.save(session).await.unwrap();

        let mut first = store.get(&id).await.unwrap().unwrap();
        first.ask_chatbot(&EchoClient, "hello").await;

        // Mutating a checked-out copy does not leak into the store until
        // it is saved back.
        let second = store.get(&id).await.unwrap().unwrap();
        assert!(second.chat_history().is_empty());
    }

    #[tokio::test]
    async fn full_intake_flow_produces_all_three_artifacts() {
        let client = EchoClient;
        let mut session = ClaimSession::new();
        session.set_claim_type(ClaimType::Health);
        session.extracted_text = "Hospital invoice for knee surgery".to_string();
        session.set_field(FormField::Location, "Mumbai");
        session.set_field(FormField::EstimatedExpenses, "50000");
        if let Some(extra) = compose_extra_details(ClaimType::Health, "Apollo", "Knee surgery") {
            session.set_field(FormField::ExtraDetails, extra);
        }

        session.classify_document(&client).await.unwrap();
        session.draft_letter(&client).await.unwrap();
        session.estimate_claim(&client).await.unwrap();
        session.ask_chatbot(&client, "Am I done?").await;

        assert!(!session.detected_document_type.is_empty());
        assert!(session.generated_letter.is_some());
        assert!(session.estimate_result.is_some());
        assert_eq!(session.chat_history().len(), 2);
        assert!(session.checklist_status().is_some());
    }
}
