//! Per-user intake session state and its derived-text operations.
//!
//! A `ClaimSession` is created empty when an interactive session starts,
//! mutated field-by-field as the claimant works through the form, and
//! discarded when the session ends. Each model-backed operation overwrites
//! exactly one derived artifact and leaves the rest of the state alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::checklist;
use crate::completion::{CompletionClient, CompletionParams};
use crate::error::{ClaimError, Result};
use crate::prompt;

/// Kind of claim being assembled. Drives the required-document checklist
/// and which extra-detail inputs apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimType {
    #[default]
    Health,
    Accident,
    Travel,
}

impl ClaimType {
    pub const ALL: [ClaimType; 3] = [ClaimType::Health, ClaimType::Accident, ClaimType::Travel];

    pub fn label(&self) -> &'static str {
        match self {
            ClaimType::Health => "Health",
            ClaimType::Accident => "Accident",
            ClaimType::Travel => "Travel",
        }
    }

    /// Labels for the two claim-type-specific inputs a front end renders.
    pub fn extra_detail_labels(&self) -> [&'static str; 2] {
        match self {
            ClaimType::Health => ["Hospital Name", "Treatment Received"],
            ClaimType::Accident => ["Vehicle Type", "Police Report Summary"],
            ClaimType::Travel => ["Trip Details", "Loss or Incident Description"],
        }
    }

    // Prefixes used when folding the two extra inputs into one field value.
    fn extra_detail_prefixes(&self) -> [&'static str; 2] {
        match self {
            ClaimType::Health => ["Hospital", "Treatment"],
            ClaimType::Accident => ["Vehicle", "Police Report"],
            ClaimType::Travel => ["Trip Info", "Incident"],
        }
    }
}

impl std::fmt::Display for ClaimType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fold the two claim-type-specific inputs into the single `ExtraDetails`
/// field value. Returns `None` when both parts are empty.
pub fn compose_extra_details(
    claim_type: ClaimType,
    first: &str,
    second: &str,
) -> Option<String> {
    if first.trim().is_empty() && second.trim().is_empty() {
        return None;
    }
    let [first_prefix, second_prefix] = claim_type.extra_detail_prefixes();
    Some(format!(
        "{first_prefix}: {first}\n{second_prefix}: {second}"
    ))
}

/// Named intake form fields. Declaration order is the fixed display order
/// used by every derived prompt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    PolicyNumber,
    IncidentDate,
    Location,
    PersonsInvolved,
    DamageDescription,
    EstimatedExpenses,
    ContactEmail,
    ContactPhone,
    Address,
    ExtraDetails,
}

impl FormField {
    pub const DISPLAY_ORDER: [FormField; 10] = [
        FormField::PolicyNumber,
        FormField::IncidentDate,
        FormField::Location,
        FormField::PersonsInvolved,
        FormField::DamageDescription,
        FormField::EstimatedExpenses,
        FormField::ContactEmail,
        FormField::ContactPhone,
        FormField::Address,
        FormField::ExtraDetails,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FormField::PolicyNumber => "policy_number",
            FormField::IncidentDate => "incident_date",
            FormField::Location => "location",
            FormField::PersonsInvolved => "persons_involved",
            FormField::DamageDescription => "damage_description",
            FormField::EstimatedExpenses => "estimated_expenses",
            FormField::ContactEmail => "contact_email",
            FormField::ContactPhone => "contact_phone",
            FormField::Address => "address",
            FormField::ExtraDetails => "extra_details",
        }
    }

    /// Label used in the letter-drafting prompt.
    pub fn letter_label(&self) -> &'static str {
        match self {
            FormField::PolicyNumber => "Policy Number",
            FormField::IncidentDate => "Incident Date",
            FormField::Location => "Location",
            FormField::PersonsInvolved => "People Involved",
            FormField::DamageDescription => "Result",
            FormField::EstimatedExpenses => "Estimated Claim (INR)",
            FormField::ContactEmail => "Contact Email",
            FormField::ContactPhone => "Phone",
            FormField::Address => "Address",
            FormField::ExtraDetails => "Additional Details",
        }
    }

    /// Label used in the chat context block: the key with underscores
    /// replaced by spaces and the first letter capitalized.
    pub fn chat_label(&self) -> String {
        let key = self.key().replace('_', " ");
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry in the session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// In-memory state for one intake interaction.
///
/// All form values are optional; consumers filter empty values before
/// building derived text. The chat transcript is append-only and keeps
/// strict submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimSession {
    pub id: String,
    pub claim_type: ClaimType,
    /// Text pulled out of the uploaded document; empty when no upload has
    /// succeeded yet.
    pub extracted_text: String,
    /// Free-text label returned by classification; empty until it runs.
    pub detected_document_type: String,
    form_fields: BTreeMap<FormField, String>,
    pub generated_letter: Option<String>,
    pub estimate_result: Option<String>,
    chat_history: Vec<ChatMessage>,
}

impl ClaimSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            claim_type: ClaimType::default(),
            extracted_text: String::new(),
            detected_document_type: String::new(),
            form_fields: BTreeMap::new(),
            generated_letter: None,
            estimate_result: None,
            chat_history: Vec::new(),
        }
    }

    pub fn set_claim_type(&mut self, claim_type: ClaimType) {
        self.claim_type = claim_type;
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form_fields.insert(field, value.into());
    }

    pub fn field(&self, field: FormField) -> Option<&str> {
        self.form_fields.get(&field).map(String::as_str)
    }

    /// Non-empty form fields in display order, values trimmed.
    pub fn filled_fields(&self) -> Vec<(FormField, &str)> {
        self.form_fields
            .iter()
            .filter_map(|(field, value)| {
                let value = value.trim();
                (!value.is_empty()).then_some((*field, value))
            })
            .collect()
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }

    /// Missing required documents for the current claim type, or `None`
    /// until a classification result exists.
    pub fn checklist_status(&self) -> Option<Vec<&'static str>> {
        let detected = self.detected_document_type.trim();
        if detected.is_empty() {
            return None;
        }
        Some(checklist::missing_documents(self.claim_type, detected))
    }

    /// Classify the uploaded document's type from its extracted text.
    ///
    /// Short-circuits without a model call when there is nothing to analyze,
    /// leaving `detected_document_type` unset.
    pub async fn classify_document(&mut self, client: &dyn CompletionClient) -> Result<String> {
        if self.extracted_text.trim().is_empty() {
            warn!(session_id = %self.id, "classification requested with no extracted text");
            return Err(ClaimError::NothingToAnalyze);
        }

        let request = prompt::classification(&self.extracted_text);
        let label = client
            .complete(&request, CompletionParams::classification())
            .await?
            .trim()
            .to_string();

        info!(session_id = %self.id, detected = %label, "document classified");
        self.detected_document_type = label.clone();
        Ok(label)
    }

    /// Draft the formal claim letter from the filled-in form fields,
    /// overwriting any previous draft.
    pub async fn draft_letter(&mut self, client: &dyn CompletionClient) -> Result<String> {
        let fields = self.filled_fields();
        if fields.is_empty() {
            return Err(ClaimError::EmptyForm);
        }

        let request = prompt::letter(&fields);
        let letter = client
            .complete(&request, CompletionParams::letter())
            .await?
            .trim()
            .to_string();

        info!(session_id = %self.id, chars = letter.len(), "claim letter drafted");
        self.generated_letter = Some(letter.clone());
        Ok(letter)
    }

    /// Estimate the payout for the claim, overwriting any previous estimate.
    /// Only the claim type is required; everything else is optional context.
    pub async fn estimate_claim(&mut self, client: &dyn CompletionClient) -> Result<String> {
        let request = prompt::estimation(
            self.claim_type,
            &self.filled_fields(),
            &self.extracted_text,
        );
        let estimate = client
            .complete(&request, CompletionParams::estimation())
            .await?
            .trim()
            .to_string();

        info!(session_id = %self.id, claim_type = %self.claim_type, "payout estimated");
        self.estimate_result = Some(estimate.clone());
        Ok(estimate)
    }

    /// Ask the model for suspicious indicators in the uploaded document.
    /// The commentary is transient: returned for display, never stored.
    pub async fn check_fraud_flags(&self, client: &dyn CompletionClient) -> Result<String> {
        if self.extracted_text.trim().is_empty() {
            warn!(session_id = %self.id, "fraud check requested with no extracted text");
            return Err(ClaimError::NothingToAnalyze);
        }

        let request = prompt::fraud_check(&self.extracted_text);
        let commentary = client
            .complete(&request, CompletionParams::fraud_check())
            .await?
            .trim()
            .to_string();

        info!(session_id = %self.id, "fraud indicators reviewed");
        Ok(commentary)
    }

    /// Answer a free-form question seeded with the claimant's entered data.
    ///
    /// The user entry is appended before the model call so it survives a
    /// generation failure; the assistant entry carries either the reply or
    /// a locally formatted error string.
    pub async fn ask_chatbot(&mut self, client: &dyn CompletionClient, question: &str) -> String {
        self.chat_history.push(ChatMessage {
            role: ChatRole::User,
            content: question.to_string(),
        });

        let request = prompt::chat(&self.filled_fields(), question);
        let reply = match client.complete(&request, CompletionParams::chat()).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "chat generation failed");
                format!("Sorry, there was an error answering your question: {e}")
            }
        };

        self.chat_history.push(ChatMessage {
            role: ChatRole::Assistant,
            content: reply.clone(),
        });
        reply
    }
}

impl Default for ClaimSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays a fixed queue of replies and counts invocations.
    struct CannedClient {
        replies: Mutex<VecDeque<&'static str>>,
        calls: AtomicUsize,
    }

    impl CannedClient {
        fn new(replies: &[&'static str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().copied().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionClient for CannedClient {
        async fn complete(&self, _prompt: &str, _params: CompletionParams) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or("generated text");
            Ok(reply.to_string())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(&self, _prompt: &str, _params: CompletionParams) -> Result<String> {
            Err(ClaimError::Generation("service unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn classify_skips_model_call_on_empty_extraction() {
        let client = CannedClient::new(&["Hospital Bill"]);
        let mut session = ClaimSession::new();

        let result = session.classify_document(&client).await;

        assert!(matches!(result, Err(ClaimError::NothingToAnalyze)));
        assert_eq!(client.call_count(), 0);
        assert!(session.detected_document_type.is_empty());
    }

    #[tokio::test]
    async fn classify_stores_trimmed_label() {
        let client = CannedClient::new(&["  Hospital Bill\n"]);
        let mut session = ClaimSession::new();
        session.extracted_text = "Ward charges: 40,000 INR".to_string();

        let label = session.classify_document(&client).await.unwrap();

        assert_eq!(label, "Hospital Bill");
        assert_eq!(session.detected_document_type, "Hospital Bill");
        assert_eq!(session.checklist_status().unwrap(), vec![
            "Discharge Summary",
            "Doctor's Report"
        ]);
    }

    #[tokio::test]
    async fn draft_letter_requires_a_filled_field() {
        let client = CannedClient::new(&[]);
        let mut session = ClaimSession::new();
        session.set_field(FormField::Location, "   ");

        let result = session.draft_letter(&client).await;

        assert!(matches!(result, Err(ClaimError::EmptyForm)));
        assert_eq!(client.call_count(), 0);
        assert!(session.generated_letter.is_none());
    }

    #[tokio::test]
    async fn redrafting_discards_the_previous_letter() {
        let client = CannedClient::new(&["first draft", "second draft"]);
        let mut session = ClaimSession::new();
        session.set_field(FormField::Location, "Mumbai");

        session.draft_letter(&client).await.unwrap();
        session.set_field(FormField::PolicyNumber, "P-1234");
        let second = session.draft_letter(&client).await.unwrap();

        assert_eq!(second, "second draft");
        assert_eq!(session.generated_letter.as_deref(), Some("second draft"));
    }

    #[tokio::test]
    async fn generation_failure_leaves_target_field_unchanged() {
        let mut session = ClaimSession::new();
        session.set_field(FormField::Location, "Mumbai");
        session.generated_letter = Some("existing draft".to_string());

        let result = session.draft_letter(&FailingClient).await;

        assert!(matches!(result, Err(ClaimError::Generation(_))));
        assert_eq!(session.generated_letter.as_deref(), Some("existing draft"));
    }

    #[tokio::test]
    async fn estimate_works_with_only_a_claim_type() {
        let client = CannedClient::new(&["1. Estimated Amount (INR): \u{20b9}5000"]);
        let mut session = ClaimSession::new();
        session.set_claim_type(ClaimType::Travel);

        let estimate = session.estimate_claim(&client).await.unwrap();

        assert!(estimate.contains("5000"));
        assert_eq!(session.estimate_result.as_deref(), Some(estimate.as_str()));
        // The other derived artifacts are untouched.
        assert!(session.generated_letter.is_none());
        assert!(session.detected_document_type.is_empty());
    }

    #[tokio::test]
    async fn fraud_check_is_transient_and_guarded() {
        let client = CannedClient::new(&["No obvious fraud indicators were found."]);
        let mut session = ClaimSession::new();

        assert!(matches!(
            session.check_fraud_flags(&client).await,
            Err(ClaimError::NothingToAnalyze)
        ));

        session.extracted_text = "Invoice total 90,000".to_string();
        let commentary = session.check_fraud_flags(&client).await.unwrap();
        assert!(commentary.contains("No obvious fraud indicators"));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn chat_keeps_user_message_when_generation_fails() {
        let mut session = ClaimSession::new();

        let reply = session
            .ask_chatbot(&FailingClient, "What documents do I need?")
            .await;

        let history = session.chat_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, ChatRole::User);
        assert_eq!(history[0].content, "What documents do I need?");
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert_eq!(history[1].content, reply);
        assert!(reply.contains("error"));
    }

    #[tokio::test]
    async fn chat_history_keeps_submission_order() {
        let client = CannedClient::new(&["reply one", "reply two"]);
        let mut session = ClaimSession::new();

        session.ask_chatbot(&client, "first?").await;
        session.ask_chatbot(&client, "second?").await;

        let contents: Vec<&str> = session
            .chat_history()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first?", "reply one", "second?", "reply two"]);
    }

    #[test]
    fn extra_details_compose_per_claim_type() {
        assert_eq!(
            compose_extra_details(ClaimType::Health, "Apollo", "Surgery").as_deref(),
            Some("Hospital: Apollo\nTreatment: Surgery")
        );
        assert_eq!(
            compose_extra_details(ClaimType::Accident, "scooter", "").as_deref(),
            Some("Vehicle: scooter\nPolice Report: ")
        );
        assert_eq!(compose_extra_details(ClaimType::Travel, "", "  "), None);
    }

    #[test]
    fn every_claim_type_declares_its_extra_inputs() {
        for claim_type in ClaimType::ALL {
            let [first, second] = claim_type.extra_detail_labels();
            assert!(!first.is_empty());
            assert!(!second.is_empty());
        }
        assert_eq!(ClaimType::Travel.to_string(), "Travel");
    }

    #[test]
    fn session_state_survives_serialization() {
        let mut session = ClaimSession::new();
        session.set_claim_type(ClaimType::Accident);
        session.set_field(FormField::PolicyNumber, "P-1");
        session.detected_document_type = "Police Report".to_string();

        let json = serde_json::to_string(&session).unwrap();
        let restored: ClaimSession = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id, session.id);
        assert_eq!(restored.claim_type, ClaimType::Accident);
        assert_eq!(restored.field(FormField::PolicyNumber), Some("P-1"));
        assert_eq!(restored.checklist_status().unwrap(), vec![
            "Vehicle Images",
            "Medical Report"
        ]);
    }

    #[test]
    fn filled_fields_follow_display_order() {
        let mut session = ClaimSession::new();
        session.set_field(FormField::Address, "12 MG Road");
        session.set_field(FormField::PolicyNumber, "P-99");
        session.set_field(FormField::ContactEmail, "");

        let fields: Vec<FormField> = session
            .filled_fields()
            .into_iter()
            .map(|(field, _)| field)
            .collect();
        assert_eq!(fields, vec![FormField::PolicyNumber, FormField::Address]);
    }
}
