//! Recognized document text and the draft expense record extracted from it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Text produced by the external recognition engine for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocumentText {
    /// Recognized lines in reading order.
    pub lines: Vec<String>,

    /// Full concatenated text.
    pub text: String,
}

impl RawDocumentText {
    pub fn new(lines: Vec<String>, text: impl Into<String>) -> Self {
        Self {
            lines,
            text: text.into(),
        }
    }

    /// Build from lines, joining them with newlines for the full text.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let text = lines.join("\n");
        Self { lines, text }
    }

    /// Build from full text, one recognized line per text line.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = text.lines().map(str::to_string).collect();
        Self { lines, text }
    }

    /// Trimmed lines with blank lines removed.
    pub fn content_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.lines.iter().all(|l| l.trim().is_empty())
    }
}

/// Best-effort typed record produced by the field extractor.
///
/// Vendor, total amount and issue date are always present; a document
/// without them never becomes a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftExpenseRecord {
    /// Vendor (supplier) name.
    pub vendor: String,

    /// Gross total, two fraction digits.
    pub total_amount: Decimal,

    /// ISO currency code.
    pub currency: String,

    /// Document issue date.
    pub issue_date: NaiveDate,

    /// Invoice/document number, empty when not found.
    #[serde(default)]
    pub invoice_number: String,

    /// Payment due date, when printed on the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// VAT split of the total.
    pub vat: VatBreakdown,

    /// Supplier contact and address details.
    #[serde(default)]
    pub company: CompanyDetails,

    /// Extraction confidence (0.0 - 1.0).
    pub confidence: f32,

    /// Original recognized text, kept for audit.
    pub raw_text: String,
}

/// VAT rate, VAT amount and net amount derived from a total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatBreakdown {
    /// Rate in percent (19 for 19%).
    pub rate: Decimal,

    /// VAT amount.
    pub vat_amount: Decimal,

    /// Net amount.
    pub net_amount: Decimal,

    /// Which rule produced this breakdown.
    pub source: VatSource,
}

/// Rule that determined a [`VatBreakdown`], in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatSource {
    /// Reverse-charge wording (§13b UStG).
    ReverseCharge,
    /// Document states a VAT amount of zero.
    ExplicitZero,
    /// Document states a VAT amount.
    ExplicitAmount,
    /// Nothing stated; German standard rate assumed.
    DefaultStandardRate,
}

/// Supplier details found anywhere on the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDetails {
    /// Legal name (line carrying a legal-entity marker).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Street address parts joined with commas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// VAT identifier (USt-IdNr).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_id: Option<String>,

    /// German national tax number (Steuernummer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CompanyDetails {
    /// Check if any detail was found.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.street_address.is_none()
            && self.city.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
            && self.vat_id.is_none()
            && self.tax_number.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_text_from_lines() {
        let raw = RawDocumentText::from_lines(["  ACME GmbH ", "", "Total €10.00"]);
        assert_eq!(raw.text, "  ACME GmbH \n\nTotal €10.00");
        assert_eq!(raw.content_lines(), vec!["ACME GmbH", "Total €10.00"]);
    }

    #[test]
    fn test_raw_text_empty() {
        assert!(RawDocumentText::from_text("  \n \n").is_empty());
        assert!(!RawDocumentText::from_text("x").is_empty());
    }

    #[test]
    fn test_company_details_empty() {
        let mut details = CompanyDetails::default();
        assert!(details.is_empty());
        details.email = Some("billing@acme.de".to_string());
        assert!(!details.is_empty());
    }
}
