//! End-to-end processing: extract, build the GoBD receipt, validate.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::extract::{ExpenseParser, ReceiptExtractor};
use crate::models::config::{BelegConfig, BookingDefaults};
use crate::models::document::{DraftExpenseRecord, RawDocumentText};
use crate::models::receipt::GoBDReceiptData;
use crate::models::validation::{Severity, ValidationResult};
use crate::validate::ComplianceValidator;

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedReceipt {
    /// Extracted draft.
    pub draft: DraftExpenseRecord,
    /// Draft mapped onto the GoBD schema.
    pub receipt: GoBDReceiptData,
    /// Compliance verdict for `receipt`.
    pub validation: ValidationResult,
}

impl ProcessedReceipt {
    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        let verdict = if self.validation.is_compliant {
            "compliant"
        } else {
            "NOT compliant"
        };
        format!(
            "{} | {} | {:.2} {} | score {} | {} ({} errors, {} warnings)",
            self.draft.vendor,
            self.draft.issue_date,
            self.draft.total_amount,
            self.draft.currency,
            self.validation.score,
            verdict,
            self.validation.error_count(),
            self.validation.issues_with(Severity::Warning).count(),
        )
    }
}

/// Receipt processing pipeline.
///
/// Extraction fails fast on a missing vendor, amount or date; the validator
/// only ever sees complete drafts.
pub struct ReceiptPipeline {
    parser: ExpenseParser,
    validator: ComplianceValidator,
    booking: BookingDefaults,
    /// Source of generated document numbers.
    sequence: AtomicU64,
}

impl ReceiptPipeline {
    pub fn new(config: &BelegConfig) -> Self {
        Self {
            parser: ExpenseParser::new().with_config(config.extraction.clone()),
            validator: ComplianceValidator::new(config.validation.clone()),
            booking: config.booking.clone(),
            sequence: AtomicU64::new(1),
        }
    }

    /// Replace the parser, e.g. to install a different amount selector.
    pub fn with_parser(mut self, parser: ExpenseParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn validator(&self) -> &ComplianceValidator {
        &self.validator
    }

    /// Process a document, using today as intake date.
    pub fn process(&self, document: &RawDocumentText) -> Result<ProcessedReceipt> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.process_at(document, Local::now().date_naive(), sequence)
    }

    /// Process a document with an explicit intake date and document sequence.
    pub fn process_at(
        &self,
        document: &RawDocumentText,
        today: NaiveDate,
        sequence: u64,
    ) -> Result<ProcessedReceipt> {
        let start = Instant::now();
        info!("Processing document with {} lines", document.lines.len());

        let draft = match self.parser.extract_document(document) {
            Ok(draft) => draft,
            Err(e) => {
                warn!("Extraction failed: {}", e);
                return Err(e.into());
            }
        };
        debug!(
            "Extracted vendor={:?} total={} date={} number={:?} vat={:?} confidence={:.2}",
            draft.vendor,
            draft.total_amount,
            draft.issue_date,
            draft.invoice_number,
            draft.vat.source,
            draft.confidence
        );

        let receipt = GoBDReceiptData::from_draft(&draft, &self.booking, today, sequence);
        let validation = self.validator.validate_on(&receipt, today);

        if validation.is_compliant {
            info!("Receipt {} compliant, score {}", receipt.belegnummer, validation.score);
        } else {
            warn!(
                "Receipt {} not compliant, score {}, {} errors",
                receipt.belegnummer,
                validation.score,
                validation.error_count()
            );
        }
        for issue in &validation.issues {
            debug!("{}", issue);
        }
        debug!("Processed in {} ms", start.elapsed().as_millis());

        Ok(ProcessedReceipt {
            draft,
            receipt,
            validation,
        })
    }
}

impl Default for ReceiptPipeline {
    fn default() -> Self {
        Self::new(&BelegConfig::default())
    }
}
