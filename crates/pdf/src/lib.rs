//! PDF text decoding for soptools.
//!
//! This crate turns PDF bytes into a single linear text stream -- the input
//! the section-extraction core consumes. It deliberately does not attempt
//! layout reconstruction (columns, tables, headers/footers): text comes back
//! in content-stream reading order, one line per text-positioning operation.

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub mod backend;
mod text;

use backend::LopdfBackend;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
}

/// Document metadata from the PDF Info dictionary.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_count: usize,
    pub creator: Option<String>,
}

/// Extract the full text of a PDF as one linear stream.
///
/// Pages are concatenated in page order, separated by newlines, and the
/// result is NFC-normalized.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    let backend = LopdfBackend::load_bytes(bytes)?;
    let raw = text::extract_document_text(&backend)?;
    Ok(raw.nfc().collect())
}

/// Get document metadata without extracting text.
pub fn info(bytes: &[u8]) -> Result<DocumentMetadata, PdfError> {
    let backend = LopdfBackend::load_bytes(bytes)?;
    let raw = backend.metadata();

    Ok(DocumentMetadata {
        title: raw.get("Title").cloned(),
        author: raw.get("Author").cloned(),
        page_count: backend.page_count(),
        creator: raw.get("Creator").cloned(),
    })
}

#[cfg(test)]
mod tests {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    use super::*;

    /// Build a minimal single-page PDF showing one text line per entry.
    fn sample_pdf(lines: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), 750.into()]),
        ];
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                operations.push(Operation::new("Td", vec![0.into(), (-14).into()]));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn extract_text_round_trips_lines() {
        let bytes = sample_pdf(&["1. OVERVIEW", "This assay requires 2.5 mL buffer."]);
        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "1. OVERVIEW\nThis assay requires 2.5 mL buffer.");
    }

    #[test]
    fn extract_text_rejects_garbage_bytes() {
        assert!(extract_text(b"definitely not a pdf").is_err());
    }

    #[test]
    fn info_reports_page_count() {
        let bytes = sample_pdf(&["anything"]);
        let meta = info(&bytes).unwrap();
        assert_eq!(meta.page_count, 1);
        assert!(meta.title.is_none());
    }
}
