use claim_assistant::ClaimAssistant;
use claim_flow::{ClaimType, FormField};
use tracing::error;
use tracing_subscriber::EnvFilter;

// End-to-end run against the real completion endpoint.
//
// Requires OPENROUTER_API_KEY. Set CLAIM_DOC_PATH to a local PDF or image
// to exercise real extraction; otherwise a small inline document is used.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let assistant = match ClaimAssistant::from_env() {
        Ok(assistant) => assistant,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let mut session = assistant.new_session();
    session.set_claim_type(ClaimType::Accident);
    session.set_field(FormField::IncidentDate, "2025-12-18");
    session.set_field(FormField::Location, "Pune");
    session.set_field(FormField::DamageDescription, "Scooter damaged in a collision");
    session.set_field(FormField::EstimatedExpenses, "12000");

    match std::env::var("CLAIM_DOC_PATH") {
        Ok(path) => {
            let media_type = if path.to_lowercase().ends_with(".pdf") {
                "application/pdf"
            } else {
                "image/png"
            };
            let bytes = std::fs::read(&path)?;
            match assistant
                .ingest_document(&mut session, bytes, media_type)
                .await
            {
                Ok(text) => println!("Extracted {} characters from {path}", text.len()),
                Err(e) => println!("Extraction failed, continuing without a document: {e}"),
            }
        }
        Err(_) => {
            session.extracted_text =
                "FIR copy: two-wheeler collision on FC Road, repair invoice attached."
                    .to_string();
        }
    }

    match assistant.classify_document(&mut session).await {
        Ok(detected) => {
            println!("Detected document type: {detected}");
            if let Some(missing) = session.checklist_status() {
                if missing.is_empty() {
                    println!("All required documents appear to be present.");
                } else {
                    println!("Missing document(s): {}", missing.join(", "));
                }
            }
        }
        Err(e) => println!("Classification unavailable: {e}"),
    }

    match assistant.draft_letter(&mut session).await {
        Ok(letter) => {
            println!("\nGenerated letter:\n{letter}\n");
            let exported = assistant.export_letter(&session)?;
            std::fs::write(exported.file_name, &exported.bytes)?;
            println!("Wrote {}", exported.file_name);
        }
        Err(e) => println!("Letter drafting failed: {e}"),
    }

    match assistant.estimate_claim(&mut session).await {
        Ok(estimate) => println!("\nEstimate:\n{estimate}"),
        Err(e) => println!("Estimation failed: {e}"),
    }

    let reply = assistant
        .ask_chatbot(&mut session, "What should I do next?")
        .await;
    println!("\nChatbot: {reply}");

    Ok(())
}
