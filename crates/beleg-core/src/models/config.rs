//! Configuration structures for extraction, validation and booking defaults.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BelegError, Result};

/// Main configuration for the beleg pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BelegConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Compliance validation configuration.
    pub validation: ValidationConfig,

    /// Defaults used when mapping a draft to the GoBD schema.
    pub booking: BookingDefaults,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading lines searched for the vendor.
    pub vendor_scan_lines: usize,

    /// Number of leading lines searched for the company name.
    pub company_scan_lines: usize,

    /// Currency assumed for extracted amounts.
    pub default_currency: String,

    /// E-mail domains belonging to payment processors rather than the supplier.
    pub internal_email_domains: Vec<String>,

    /// Names that identify a vendor with high confidence.
    pub known_vendor_markers: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vendor_scan_lines: 15,
            company_scan_lines: 10,
            default_currency: "EUR".to_string(),
            internal_email_domains: vec!["stripe.com".to_string()],
            known_vendor_markers: ["Stripe", "PayPal", "Adyen", "Klarna", "SumUp", "Mollie"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Compliance validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Allowed deviation for recomputed gross and VAT amounts.
    pub tolerance: Decimal,

    /// Gross amount up to which the small-receipt rules (§33 UStDV) apply.
    pub small_receipt_threshold: Decimal,

    /// Domestic currency; anything else needs conversion.
    pub domestic_currency: String,

    /// VAT-ID prefix accepted without external verification.
    pub trusted_vat_prefix: String,

    /// VAT rates valid in Germany, in percent.
    pub domestic_vat_rates: Vec<Decimal>,

    /// Lower bound of the SKR03/04 expense account band.
    pub expense_account_min: u32,

    /// Upper bound of the SKR03/04 expense account band.
    pub expense_account_max: u32,

    /// Accounts accepted outside the expense band.
    pub special_accounts: Vec<u32>,

    /// Document-type code of incoming invoices.
    pub incoming_invoice_code: String,

    /// Supplier name that marks an unrecognized supplier.
    pub unknown_supplier: String,

    /// Age in days after which a retention reminder is issued.
    pub retention_reminder_days: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tolerance: Decimal::new(5, 2),
            small_receipt_threshold: Decimal::new(250, 0),
            domestic_currency: "EUR".to_string(),
            trusted_vat_prefix: "DE".to_string(),
            domestic_vat_rates: vec![Decimal::ZERO, Decimal::new(7, 0), Decimal::new(19, 0)],
            expense_account_min: 4000,
            expense_account_max: 7999,
            special_accounts: vec![1200, 1400, 1600],
            incoming_invoice_code: "ER".to_string(),
            unknown_supplier: "Unbekannter Lieferant".to_string(),
            retention_reminder_days: 365,
        }
    }
}

/// Defaults applied when a draft is turned into a [`GoBDReceiptData`](super::receipt::GoBDReceiptData).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingDefaults {
    /// DATEV expense account.
    pub expense_account: String,

    /// DATEV creditor (counter) account.
    pub creditor_account: String,

    /// Document-type code (Belegkreis).
    pub document_type_code: String,

    /// Payment term in days.
    pub payment_days: Option<u32>,

    /// Generate a document number when none was extracted.
    pub generate_document_number: bool,

    /// Prefix of generated document numbers.
    pub document_number_prefix: String,
}

impl Default for BookingDefaults {
    fn default() -> Self {
        Self {
            expense_account: "4400".to_string(),
            creditor_account: "70000".to_string(),
            document_type_code: "ER".to_string(),
            payment_days: Some(30),
            generate_document_number: true,
            document_number_prefix: "ER".to_string(),
        }
    }
}

impl BelegConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn check(&self) -> Result<()> {
        if self.extraction.vendor_scan_lines == 0 {
            return Err(BelegError::Config(
                "extraction.vendor_scan_lines must be positive".to_string(),
            ));
        }
        if self.validation.expense_account_min > self.validation.expense_account_max {
            return Err(BelegError::Config(format!(
                "validation.expense_account_min ({}) exceeds expense_account_max ({})",
                self.validation.expense_account_min, self.validation.expense_account_max
            )));
        }
        if self.validation.tolerance.is_sign_negative() {
            return Err(BelegError::Config(
                "validation.tolerance must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
