//! Linear text extraction from page content streams.
//!
//! The walk only interprets the operators that affect reading order: text
//! showing (`Tj`, `TJ`, `'`, `"`), line movement (`Td`, `TD`, `T*`), and
//! font selection (`Tf`, needed for per-font byte decoding). Positioning is
//! otherwise ignored -- the output is a reading-order stream, not a layout
//! reconstruction.

use crate::backend::{ContentOp, Operand, PageId, PdfBackend};
use crate::PdfError;

/// Extract the text of every page, in page order, pages joined by newlines.
pub fn extract_document_text(backend: &impl PdfBackend) -> Result<String, PdfError> {
    let mut pages_text = Vec::new();

    for (_, page_id) in backend.pages() {
        let data = backend.page_content(page_id)?;
        let ops = backend.decode_content(&data)?;
        let text = page_text(backend, page_id, &ops);
        if !text.is_empty() {
            pages_text.push(text);
        }
    }

    Ok(pages_text.join("\n"))
}

fn page_text(backend: &impl PdfBackend, page: PageId, ops: &[ContentOp]) -> String {
    let mut out = String::new();
    let mut current_font: Vec<u8> = Vec::new();

    for op in ops {
        match op.operator.as_str() {
            "Tf" => {
                if let Some(Operand::Name(name)) = op.operands.first() {
                    current_font = name.clone();
                }
            }
            "Td" | "TD" | "T*" => push_newline(&mut out),
            "Tj" => {
                if let Some(Operand::Text(bytes)) = op.operands.first() {
                    out.push_str(&backend.decode_text(page, &current_font, bytes));
                }
            }
            // Both quote operators move to the next line before showing text;
            // the double-quote form carries two spacing operands first.
            "'" | "\"" => {
                push_newline(&mut out);
                if let Some(bytes) = op.operands.iter().find_map(|operand| match operand {
                    Operand::Text(bytes) => Some(bytes),
                    _ => None,
                }) {
                    out.push_str(&backend.decode_text(page, &current_font, bytes));
                }
            }
            "TJ" => {
                if let Some(Operand::Array(items)) = op.operands.first() {
                    for item in items {
                        if let Operand::Text(bytes) = item {
                            out.push_str(&backend.decode_text(page, &current_font, bytes));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    out.trim().to_string()
}

fn push_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
