use claim_flow::{ClaimError, ClaimSession, Result};
use tracing::info;

use crate::config::Config;
use crate::export::{self, ExportedLetter};
use crate::extract::{self, UploadKind};
use crate::llm::OpenRouterClient;

/// High-level intake facade.
///
/// Owns the configured completion client and wires the document adapters to
/// the session operations, so an embedding front end deals with one handle
/// and the session values it checks out of a `SessionStore`.
pub struct ClaimAssistant {
    client: OpenRouterClient,
}

impl ClaimAssistant {
    /// Build from the process environment. Fails with a configuration error
    /// when the model credential is missing, before any model call happens.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::new(config))
    }

    pub fn new(config: Config) -> Self {
        Self {
            client: OpenRouterClient::new(config),
        }
    }

    pub fn new_session(&self) -> ClaimSession {
        let session = ClaimSession::new();
        info!(session_id = %session.id, "intake session started");
        session
    }

    /// Extract text from an uploaded document and store it on the session.
    ///
    /// On failure the session keeps its previous (usually empty) text and
    /// the error message is specific to the media type that failed.
    pub async fn ingest_document(
        &self,
        session: &mut ClaimSession,
        bytes: Vec<u8>,
        media_type: &str,
    ) -> Result<String> {
        let kind = UploadKind::from_media_type(media_type)
            .ok_or_else(|| ClaimError::UnsupportedMediaType(media_type.to_string()))?;

        let text = extract::extract_text(bytes, kind).await?;
        if text.trim().is_empty() {
            info!(session_id = %session.id, "no text found in uploaded document");
        }
        session.extracted_text = text.clone();
        Ok(text)
    }

    pub async fn classify_document(&self, session: &mut ClaimSession) -> Result<String> {
        session.classify_document(&self.client).await
    }

    pub async fn draft_letter(&self, session: &mut ClaimSession) -> Result<String> {
        session.draft_letter(&self.client).await
    }

    pub async fn estimate_claim(&self, session: &mut ClaimSession) -> Result<String> {
        session.estimate_claim(&self.client).await
    }

    pub async fn check_fraud_flags(&self, session: &ClaimSession) -> Result<String> {
        session.check_fraud_flags(&self.client).await
    }

    pub async fn ask_chatbot(&self, session: &mut ClaimSession, question: &str) -> String {
        session.ask_chatbot(&self.client, question).await
    }

    /// Render the drafted letter as a downloadable PDF.
    pub fn export_letter(&self, session: &ClaimSession) -> Result<ExportedLetter> {
        let letter = session
            .generated_letter
            .as_deref()
            .ok_or_else(|| ClaimError::Export("no letter has been generated yet".to_string()))?;
        export::render_letter_pdf(letter)
    }
}
