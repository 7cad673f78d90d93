//! Document text extraction: PDF text layer via lopdf, images via the
//! system `tesseract` binary.
//!
//! Extraction is best-effort. Failures carry a media-type-specific error so
//! the front end can tell a broken PDF from a failed OCR run, and they never
//! terminate the session; the caller just continues with empty text.

use std::process::Command;

use claim_flow::{ClaimError, Result};
use tracing::{info, warn};
use uuid::Uuid;

/// Extraction path for an upload, derived from its declared media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    Image,
}

impl UploadKind {
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "application/pdf" => Some(Self::Pdf),
            t if t.starts_with("image/") => Some(Self::Image),
            _ => None,
        }
    }
}

/// Turn uploaded file bytes into plain text.
///
/// Empty output is not an error; a scanned PDF with no text layer simply
/// yields nothing to analyze.
pub async fn extract_text(bytes: Vec<u8>, kind: UploadKind) -> Result<String> {
    match kind {
        UploadKind::Pdf => extract_pdf_text(bytes).await,
        UploadKind::Image => ocr_image(bytes).await,
    }
}

async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let document = lopdf::Document::load_mem(&bytes)
            .map_err(|e| ClaimError::PdfExtraction(format!("failed to load PDF: {e}")))?;

        let mut pages = Vec::new();
        for (page_num, _object_id) in document.get_pages() {
            match document.extract_text(&[page_num]) {
                Ok(page_text) => {
                    let trimmed = page_text.trim();
                    if !trimmed.is_empty() {
                        pages.push(trimmed.to_string());
                    }
                }
                Err(e) => {
                    warn!(page = page_num, error = %e, "skipping unreadable PDF page");
                }
            }
        }

        info!(pages = pages.len(), "PDF text extraction finished");
        Ok(pages.join("\n"))
    })
    .await
    .map_err(|e| ClaimError::PdfExtraction(e.to_string()))?
}

async fn ocr_image(bytes: Vec<u8>) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let image = image::load_from_memory(&bytes)
            .map_err(|e| ClaimError::ImageOcr(format!("unreadable image: {e}")))?;

        // Tesseract reads from a file, so stage the upload as a normalized
        // PNG in the temp directory and clean it up afterwards.
        let png_path = std::env::temp_dir().join(format!("claim-intake-{}.png", Uuid::new_v4()));
        image
            .save_with_format(&png_path, image::ImageFormat::Png)
            .map_err(|e| ClaimError::ImageOcr(format!("failed to stage image: {e}")))?;

        let output = new_tesseract_command()
            .arg(png_path.as_os_str())
            .arg("stdout")
            .arg("-l")
            .arg("eng")
            .output();
        let _ = std::fs::remove_file(&png_path);

        match output {
            Ok(output) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout).to_string();
                info!(chars = text.len(), "OCR finished");
                Ok(text)
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ClaimError::ImageOcr(format!(
                    "tesseract failed: {}",
                    stderr.trim()
                )))
            }
            Err(e) => Err(ClaimError::ImageOcr(format!(
                "tesseract failed to start: {e}"
            ))),
        }
    })
    .await
    .map_err(|e| ClaimError::ImageOcr(e.to_string()))?
}

fn new_tesseract_command() -> Command {
    let tesseract_cmd = std::env::var("TESSERACT_CMD").unwrap_or_else(|_| "tesseract".to_string());
    let mut command = Command::new(tesseract_cmd);
    if let Ok(tessdata_prefix) = std::env::var("TESSDATA_PREFIX") {
        command.env("TESSDATA_PREFIX", tessdata_prefix);
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_types_map_to_extraction_paths() {
        assert_eq!(
            UploadKind::from_media_type("application/pdf"),
            Some(UploadKind::Pdf)
        );
        assert_eq!(
            UploadKind::from_media_type("image/png"),
            Some(UploadKind::Image)
        );
        assert_eq!(
            UploadKind::from_media_type("image/jpeg"),
            Some(UploadKind::Image)
        );
        assert_eq!(UploadKind::from_media_type("text/plain"), None);
    }

    #[tokio::test]
    async fn garbage_pdf_bytes_become_a_pdf_extraction_error() {
        let result = extract_text(b"not a pdf at all".to_vec(), UploadKind::Pdf).await;
        assert!(matches!(result, Err(ClaimError::PdfExtraction(_))));
    }

    #[tokio::test]
    async fn garbage_image_bytes_become_an_ocr_error() {
        let result = extract_text(b"\x00\x01\x02\x03".to_vec(), UploadKind::Image).await;
        assert!(matches!(result, Err(ClaimError::ImageOcr(_))));
    }
}
