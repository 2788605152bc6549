//! Rule-based expense parser.

use crate::error::{ExtractionError, MandatoryField};
use crate::models::config::ExtractionConfig;
use crate::models::document::{DraftExpenseRecord, VatSource};

use super::rules::{
    extract_company_details, extract_due_date, extract_invoice_number, extract_issue_date,
    extract_total, extract_vat_breakdown, extract_vendor, AmountSelector, MaxAmountSelector,
};
use super::{ReceiptExtractor, Result};

/// Expense parser combining the individual field rules.
pub struct ExpenseParser {
    config: ExtractionConfig,
    /// Policy choosing the total among amount candidates.
    selector: Box<dyn AmountSelector>,
}

impl ExpenseParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            selector: Box::new(MaxAmountSelector),
        }
    }

    /// Set extraction configuration.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the total-selection policy.
    pub fn with_amount_selector(mut self, selector: impl AmountSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    fn calculate_confidence(draft: &DraftExpenseRecord) -> f32 {
        let mut confidence = 1.0f32;

        if draft.invoice_number.is_empty() {
            confidence -= 0.2;
        }
        if draft.vat.source == VatSource::DefaultStandardRate {
            confidence -= 0.1;
        }
        if draft.company.is_empty() {
            confidence -= 0.1;
        }

        confidence.max(0.0)
    }
}

impl Default for ExpenseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptExtractor for ExpenseParser {
    fn extract(&self, lines: &[&str], raw_text: &str) -> Result<DraftExpenseRecord> {
        let joined;
        let text = if raw_text.trim().is_empty() {
            joined = lines.join("\n");
            joined.as_str()
        } else {
            raw_text
        };

        let vendor = extract_vendor(lines, &self.config)
            .ok_or(ExtractionError::missing(MandatoryField::Vendor))?;
        let total_amount = extract_total(text, self.selector.as_ref())
            .ok_or(ExtractionError::missing(MandatoryField::Amount))?;
        let issue_date =
            extract_issue_date(lines).ok_or(ExtractionError::missing(MandatoryField::Date))?;

        let mut draft = DraftExpenseRecord {
            vendor,
            total_amount,
            currency: self.config.default_currency.clone(),
            issue_date,
            invoice_number: extract_invoice_number(text),
            due_date: extract_due_date(lines),
            vat: extract_vat_breakdown(text, total_amount),
            company: extract_company_details(lines, &self.config),
            confidence: 0.0,
            raw_text: raw_text.to_string(),
        };
        draft.confidence = Self::calculate_confidence(&draft);

        Ok(draft)
    }
}
