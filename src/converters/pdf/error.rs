use thiserror::Error;

/// Errors that can occur while rendering a carousel to PDF.
#[derive(Error, Debug)]
pub enum PdfRenderError {
    /// A carousel must have at least one slide to export.
    #[error("Cannot render a carousel with no slides")]
    EmptySlides,
    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("I/O error while writing the PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for PDF rendering operations.
pub type Result<T> = std::result::Result<T, PdfRenderError>;
