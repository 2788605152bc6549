//! Receipt field extraction module.

mod parser;
pub mod rules;

pub use parser::ExpenseParser;

use crate::error::ExtractionError;
use crate::models::document::{DraftExpenseRecord, RawDocumentText};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for receipt field extractors.
pub trait ReceiptExtractor {
    /// Extract a draft record from recognized lines and the full text.
    ///
    /// Fails only when vendor, total amount or issue date cannot be found.
    fn extract(&self, lines: &[&str], raw_text: &str) -> Result<DraftExpenseRecord>;

    /// Extract a draft record from a recognized document.
    fn extract_document(&self, document: &RawDocumentText) -> Result<DraftExpenseRecord> {
        let lines = document.content_lines();
        self.extract(&lines, &document.text)
    }
}
