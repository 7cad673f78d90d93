use async_trait::async_trait;
use claim_assistant::render_letter_pdf;
use claim_flow::{
    ClaimSession, ClaimType, CompletionClient, CompletionParams, FormField, InMemorySessionStore,
    Result, SessionStore, compose_extra_details,
};
use tracing_subscriber::EnvFilter;

// Offline walkthrough of the whole intake flow: a scripted completion
// client stands in for the model so the demo runs without credentials.
struct ScriptedClient;

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &str, _params: CompletionParams) -> Result<String> {
        let reply = if prompt.starts_with("Classify the type of this document") {
            "This appears to be a Hospital Bill issued by the admitting hospital."
        } else if prompt.starts_with("Write a formal insurance claim letter") {
            "Dear Sir or Madam,\n\nI am writing to formally submit my health insurance claim \
             for the treatment I received. The details provided in my claim form describe the \
             incident and the expenses incurred.\n\nYours faithfully,\nThe Claimant"
        } else if prompt.contains("insurance claim analyst") {
            "1. Estimated Amount (INR): \u{20b9}48,500\n2. Reason for Estimate: in line with \
             average metro-hospital charges for this treatment."
        } else if prompt.contains("insurance fraud analyst") {
            "No obvious fraud indicators were found."
        } else {
            "For a Health claim you should attach the hospital bill, discharge summary and \
             doctor's report."
        };
        Ok(reply.to_string())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let client = ScriptedClient;
    let store = InMemorySessionStore::new();

    // Start a session and fill the form the way a front end would.
    let mut session = ClaimSession::new();
    let session_id = session.id.clone();
    session.set_claim_type(ClaimType::Health);
    session.extracted_text =
        "Apollo Hospital. Patient admitted for knee surgery. Total payable: INR 48,500."
            .to_string();
    session.set_field(FormField::PolicyNumber, "HLTH-2214");
    session.set_field(FormField::IncidentDate, "2025-11-03");
    session.set_field(FormField::Location, "Mumbai");
    session.set_field(FormField::PersonsInvolved, "Self");
    session.set_field(FormField::DamageDescription, "Knee surgery after a fall");
    session.set_field(FormField::EstimatedExpenses, "48500");
    session.set_field(FormField::ContactEmail, "claimant@example.in");
    if let Some(extra) = compose_extra_details(ClaimType::Health, "Apollo Hospital", "Knee surgery")
    {
        session.set_field(FormField::ExtraDetails, extra);
    }

    // Classify the uploaded document and check the required-document list.
    let detected = session.classify_document(&client).await?;
    println!("Detected document type: {detected}");
    match session.checklist_status() {
        Some(missing) if missing.is_empty() => {
            println!("All required documents appear to be present.")
        }
        Some(missing) => println!("Missing document(s): {}", missing.join(", ")),
        None => println!("No classification yet."),
    }

    // Draft the letter, estimate the payout, run the fraud check.
    let letter = session.draft_letter(&client).await?;
    println!("\nGenerated letter:\n{letter}\n");

    let estimate = session.estimate_claim(&client).await?;
    println!("Estimate:\n{estimate}\n");

    let fraud = session.check_fraud_flags(&client).await?;
    println!("Fraud check: {fraud}\n");

    // Ask the chatbot a question seeded with the entered data.
    let reply = session
        .ask_chatbot(&client, "What documents do I need?")
        .await;
    println!("Chatbot: {reply}\n");

    // Export the letter and park the session in the store.
    let exported = render_letter_pdf(&letter)?;
    std::fs::write(exported.file_name, &exported.bytes)?;
    println!(
        "Wrote {} ({} bytes, {})",
        exported.file_name,
        exported.bytes.len(),
        exported.media_type
    );

    store.save(session).await?;
    let parked = store.get(&session_id).await?.expect("session was saved");
    println!(
        "Session {} parked with {} chat message(s).",
        parked.id,
        parked.chat_history().len()
    );

    Ok(())
}
