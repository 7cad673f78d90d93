use thiserror::Error;

/// Errors produced by intake operations and their external collaborators.
///
/// Extraction, generation and export failures are always recovered locally:
/// the triggering operation leaves its target field unchanged and the rest
/// of the session is untouched.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// No document text is available. Model-backed document operations
    /// short-circuit with this instead of calling the completion endpoint
    /// with empty input.
    #[error("no document text to analyze")]
    NothingToAnalyze,

    /// Letter drafting was requested before any claim detail was filled in.
    #[error("no claim details have been filled in")]
    EmptyForm,

    /// The uploaded file's declared media type is neither PDF nor image.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("PDF text extraction failed: {0}")]
    PdfExtraction(String),

    #[error("image OCR failed: {0}")]
    ImageOcr(String),

    /// The completion endpoint failed (transport, quota, malformed body).
    #[error("text generation failed: {0}")]
    Generation(String),

    #[error("letter export failed: {0}")]
    Export(String),

    /// A required credential or setting was missing at startup.
    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, ClaimError>;
