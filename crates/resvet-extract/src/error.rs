use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document produced no usable text. Terminal for this document:
    /// callers surface a message and do not retry.
    #[error("document yielded no extractable text")]
    Unparsable,

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("unsupported document type: {0}")]
    UnsupportedType(String),
}
