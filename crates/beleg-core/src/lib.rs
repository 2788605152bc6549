//! Core library for German expense receipt processing.
//!
//! This crate provides:
//! - Rule-based field extraction from recognized receipt text (vendor,
//!   total, dates, document number, VAT breakdown, supplier details)
//! - Mapping of extracted drafts onto the GoBD receipt schema
//! - GoBD/UStG/DATEV compliance validation with score and issues
//! - A pipeline combining the three

pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod validate;

pub use error::{BelegError, ExtractionError, MandatoryField, Result};
pub use extract::{ExpenseParser, ReceiptExtractor};
pub use extract::rules::{AmountSelector, MaxAmountSelector};
pub use models::config::{BelegConfig, BookingDefaults, ExtractionConfig, ValidationConfig};
pub use models::document::{CompanyDetails, DraftExpenseRecord, RawDocumentText, VatBreakdown, VatSource};
pub use models::receipt::GoBDReceiptData;
pub use models::validation::{Severity, ValidationIssue, ValidationResult};
pub use pipeline::{ProcessedReceipt, ReceiptPipeline};
pub use validate::ComplianceValidator;
