//! Invoice logic: document number shape, date plausibility and the
//! small-receipt rules of §33 UStDV.

use chrono::{Duration, NaiveDate};

use crate::models::receipt::GoBDReceiptData;
use crate::models::validation::ValidationIssue;
use crate::validate::formats::{check_document_number, parse_receipt_date};
use crate::validate::{RuleContext, RuleOutcome};

pub fn check(record: &GoBDReceiptData, ctx: &RuleContext<'_>) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    // Empty numbers and dates are reported by the mandatory-field rule
    if !record.belegnummer.trim().is_empty() {
        if let Err(reason) = check_document_number(&record.belegnummer) {
            outcome.push(ValidationIssue::info("belegnummer", reason), 0);
        }
    }

    check_dates(record, ctx, &mut outcome);

    let gross = record.steuerberechnung.bruttobetrag;
    if gross <= ctx.config.small_receipt_threshold {
        outcome.push(
            ValidationIssue::info(
                "kleinbetragsrechnung",
                format!(
                    "small-value receipt (<= {} EUR): simplified requirements of §33 UStDV apply",
                    ctx.config.small_receipt_threshold.normalize()
                ),
            ),
            0,
        );
    }

    outcome
}

fn check_dates(record: &GoBDReceiptData, ctx: &RuleContext<'_>, outcome: &mut RuleOutcome) {
    let document_date = parse_field(&record.belegdatum, "belegdatum", outcome);
    let intake_date = parse_field(&record.eingangsdatum, "eingangsdatum", outcome);

    let Some(document_date) = document_date else {
        return;
    };

    if document_date > ctx.today {
        outcome.push(
            ValidationIssue::warning("belegdatum", "document date lies in the future"),
            5,
        );
    }

    if intake_date.is_some_and(|intake| intake < document_date) {
        outcome.push(
            ValidationIssue::warning("eingangsdatum", "intake date is before the document date"),
            5,
        );
    }

    if document_date < ctx.today - Duration::days(ctx.config.retention_reminder_days) {
        outcome.push(
            ValidationIssue::info(
                "belegdatum",
                format!(
                    "document is older than {} days; check limitation periods",
                    ctx.config.retention_reminder_days
                ),
            ),
            0,
        );
    }
}

/// Parse a non-empty date field, reporting unparsable values.
fn parse_field(value: &str, field: &str, outcome: &mut RuleOutcome) -> Option<NaiveDate> {
    if value.trim().is_empty() {
        return None;
    }
    let parsed = parse_receipt_date(value);
    if parsed.is_none() {
        outcome.push(
            ValidationIssue::warning(field, format!("invalid date format: \"{}\"", value)),
            5,
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use crate::models::config::ValidationConfig;
    use crate::models::validation::Severity;
    use crate::validate::tests::compliant_receipt;

    fn run(record: &GoBDReceiptData) -> RuleOutcome {
        let config = ValidationConfig::default();
        let ctx = RuleContext {
            config: &config,
            today: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
        };
        check(record, &ctx)
    }

    #[test]
    fn test_plausible_record() {
        assert_eq!(run(&compliant_receipt()), RuleOutcome::default());
    }

    #[test]
    fn test_document_number_format_is_info() {
        let mut record = compliant_receipt();
        record.belegnummer = "RE/2025/17".to_string();
        let outcome = run(&record);
        assert_eq!(outcome.penalty, 0);
        assert_eq!(outcome.issues[0].severity, Severity::Info);

        record.belegnummer = "7".to_string();
        assert_eq!(run(&record).issues[0].message, "document number too short");
    }

    #[test]
    fn test_future_and_inverted_dates() {
        let mut record = compliant_receipt();
        record.belegdatum = "20.07.2025".to_string();
        record.eingangsdatum = "2025-07-15".to_string();
        let outcome = run(&record);

        assert_eq!(outcome.penalty, 10);
        assert_eq!(outcome.issues[0].message, "document date lies in the future");
        assert_eq!(outcome.issues[1].field, "eingangsdatum");
    }

    #[test]
    fn test_old_document() {
        let mut record = compliant_receipt();
        record.belegdatum = "2024-01-15".to_string();
        let outcome = run(&record);
        assert_eq!(outcome.penalty, 0);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].severity, Severity::Info);
    }

    #[test]
    fn test_unparsable_date() {
        let mut record = compliant_receipt();
        record.belegdatum = "July 1st".to_string();
        let outcome = run(&record);
        assert_eq!(outcome.penalty, 5);
        assert_eq!(outcome.issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_small_receipt_note() {
        let mut record = compliant_receipt();
        record.steuerberechnung.bruttobetrag = Decimal::new(1190, 2);
        let outcome = run(&record);
        assert_eq!(outcome.penalty, 0);
        assert_eq!(outcome.issues[0].field, "kleinbetragsrechnung");

        record.steuerberechnung.bruttobetrag = Decimal::ZERO;
        let outcome = run(&record);
        assert_eq!(outcome.penalty, 0);
        assert!(outcome.issues.iter().any(|i| i.field == "kleinbetragsrechnung"));
    }
}
