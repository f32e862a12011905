//! Rendering backends for the report document.

mod markdown;
mod pdf;

pub use markdown::MarkdownRenderer;
pub use pdf::PdfRenderer;

use crate::report::ReportDocument;

/// A backend that turns a block sequence into downloadable bytes.
///
/// Backends are stateless; the rendered artifact exists only in the returned
/// buffer and is never written to disk.
pub trait DocumentRenderer {
    /// MIME type of the rendered artifact.
    fn media_type(&self) -> &'static str;
    /// Filename extension, without the dot.
    fn file_extension(&self) -> &'static str;
    /// Renders the document into a byte buffer.
    fn render(&self, doc: &ReportDocument) -> anyhow::Result<Vec<u8>>;
}
