//! Letter export: renders generated letter text as a downloadable PDF.

use claim_flow::{ClaimError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};
use tracing::info;

pub const LETTER_FILE_NAME: &str = "claim_letter.pdf";
pub const LETTER_MEDIA_TYPE: &str = "application/pdf";

// US Letter, 1 inch margins, 12pt Helvetica with 14pt leading.
const LINE_WIDTH: usize = 90;
const LINES_PER_PAGE: usize = 46;

/// A rendered letter ready for download.
#[derive(Debug, Clone)]
pub struct ExportedLetter {
    pub file_name: &'static str,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Substitute characters outside the Latin-1 range with `?`.
///
/// The built-in PDF fonts only cover WinAnsi; generated letters routinely
/// contain the rupee sign, so the export substitutes instead of failing.
fn to_latin1(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

// Greedy word wrap on character counts; words longer than the width are
// hard-split.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.trim().is_empty() {
        return vec![String::new()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    for word in line.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > width {
            if current_len > 0 {
                wrapped.push(std::mem::take(&mut current));
                current_len = 0;
            }
            wrapped.push(chars[..width].iter().collect());
            chars.drain(..width);
        }
        let word_len = chars.len();
        let word: String = chars.into_iter().collect();
        if current_len == 0 {
            current = word;
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(&word);
            current_len += 1 + word_len;
        } else {
            wrapped.push(std::mem::take(&mut current));
            current = word;
            current_len = word_len;
        }
    }
    if current_len > 0 {
        wrapped.push(current);
    }
    wrapped
}

/// Render arbitrary letter text into a paginated PDF document.
///
/// On failure no partial artifact is produced; the caller gets an `Export`
/// error and nothing to offer for download.
pub fn render_letter_pdf(text: &str) -> Result<ExportedLetter> {
    let safe_text = to_latin1(text);
    let mut lines: Vec<String> = safe_text
        .lines()
        .flat_map(|line| wrap_line(line, LINE_WIDTH))
        .collect();
    if lines.is_empty() {
        lines.push(String::new());
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page_lines in lines.chunks(LINES_PER_PAGE) {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("TL", vec![14.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
        ];
        for line in page_lines {
            // The text is already Latin-1-restricted, so a per-char byte
            // cast is the WinAnsi encoding the font expects.
            let encoded_line: Vec<u8> = line.chars().map(|c| c as u8).collect();
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(encoded_line, StringFormat::Literal)],
            ));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| ClaimError::Export(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ClaimError::Export(e.to_string()))?;

    info!(pages = page_count, bytes = bytes.len(), "letter exported");
    Ok(ExportedLetter {
        file_name: LETTER_FILE_NAME,
        media_type: LETTER_MEDIA_TYPE,
        bytes,
    })
}
