pub mod pdftotext;
pub mod scratch;

pub use pdftotext::PdfToText;
pub use scratch::ScratchPdf;

use crate::core::error::ExtractResult;

/// Turns an uploaded document into raw, uncleaned text.
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8], display_name: &str) -> ExtractResult<String>;
}
