pub mod assistant;
pub mod config;
pub mod export;
pub mod extract;
pub mod llm;

pub use assistant::ClaimAssistant;
pub use config::Config;
pub use export::{ExportedLetter, LETTER_FILE_NAME, LETTER_MEDIA_TYPE, render_letter_pdf};
pub use extract::{UploadKind, extract_text};
pub use llm::OpenRouterClient;

// Re-export the core so embedders only add one dependency.
pub use claim_flow;
