//! DATEV account assignment (SKR03/SKR04).

use crate::models::receipt::GoBDReceiptData;
use crate::models::validation::ValidationIssue;
use crate::validate::formats::check_account;
use crate::validate::{RuleContext, RuleOutcome};

pub fn check(record: &GoBDReceiptData, ctx: &RuleContext<'_>) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    let datev = &record.datev;

    if datev.konto_nummer.trim().is_empty() {
        outcome.push(
            ValidationIssue::error("datev.kontoNummer", "DATEV expense account missing"),
            15,
        );
    } else if let Err(reason) = check_account(&datev.konto_nummer, ctx.config) {
        outcome.push(
            ValidationIssue::warning(
                "datev.kontoNummer",
                format!("unusual account number {} ({})", datev.konto_nummer.trim(), reason),
            ),
            5,
        );
    }

    if datev.gegenkonto.trim().is_empty() {
        outcome.push(
            ValidationIssue::warning(
                "datev.gegenkonto",
                "DATEV counter account (creditor) missing",
            ),
            10,
        );
    }

    if datev.belegkreis != ctx.config.incoming_invoice_code {
        outcome.push(
            ValidationIssue::warning(
                "datev.belegkreis",
                format!(
                    "document type \"{}\" is unusual for incoming invoices (expected \"{}\")",
                    datev.belegkreis, ctx.config.incoming_invoice_code
                ),
            ),
            5,
        );
    }

    if datev.buchungstext.trim().is_empty() {
        outcome.push(
            ValidationIssue::info(
                "datev.buchungstext",
                "booking text missing; recommended for traceability",
            ),
            2,
        );
    }

    outcome
}
