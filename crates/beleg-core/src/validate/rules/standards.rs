//! German bookkeeping standards: currency and payment terms.

use crate::models::receipt::GoBDReceiptData;
use crate::models::validation::ValidationIssue;
use crate::validate::{RuleContext, RuleOutcome};

pub fn check(record: &GoBDReceiptData, ctx: &RuleContext<'_>) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    let details = &record.rechnungsdetails;

    if details.waehrung != ctx.config.domestic_currency {
        outcome.push(
            ValidationIssue::info(
                "rechnungsdetails.waehrung",
                format!("foreign-currency invoice ({}): exchange rate required", details.waehrung),
            ),
            0,
        );
    }

    if !details.zahlungsbedingungen.has_due_date() {
        outcome.push(
            ValidationIssue::info(
                "rechnungsdetails.zahlungsbedingungen.zahlungsziel",
                "payment due date missing; recommended for liquidity planning",
            ),
            0,
        );
    }

    outcome
}
