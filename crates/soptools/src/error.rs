#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Section {number} not found in document {document}")]
    SectionNotFound { document: String, number: String },
}
