//! GoBD mandatory fields.

use rust_decimal::Decimal;

use crate::models::receipt::GoBDReceiptData;
use crate::models::validation::ValidationIssue;
use crate::validate::{RuleContext, RuleOutcome};

pub fn check(record: &GoBDReceiptData, ctx: &RuleContext<'_>) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    if record.belegnummer.trim().is_empty() {
        outcome.push(
            ValidationIssue::error(
                "belegnummer",
                "document number is mandatory (GoBD, §14 Abs. 4 UStG)",
            ),
            20,
        );
    }

    if record.belegdatum.trim().is_empty() {
        outcome.push(
            ValidationIssue::error("belegdatum", "document date is mandatory (GoBD)"),
            15,
        );
    }

    let supplier = record.lieferant.name.trim();
    if supplier.is_empty() || supplier == ctx.config.unknown_supplier {
        outcome.push(
            ValidationIssue::error("lieferant.name", "supplier name could not be recognized"),
            25,
        );
    }

    if record.steuerberechnung.bruttobetrag <= Decimal::ZERO {
        outcome.push(
            ValidationIssue::error(
                "steuerberechnung.bruttobetrag",
                "gross amount must be greater than 0",
            ),
            30,
        );
    }

    if record.eingangsdatum.trim().is_empty() {
        outcome.push(
            ValidationIssue::warning(
                "eingangsdatum",
                "intake date should be recorded for GoBD compliance",
            ),
            5,
        );
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ValidationConfig;
    use crate::models::validation::Severity;
    use crate::validate::tests::compliant_receipt;
    use chrono::NaiveDate;

    fn run(record: &GoBDReceiptData) -> RuleOutcome {
        let config = ValidationConfig::default();
        let ctx = RuleContext {
            config: &config,
            today: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
        };
        check(record, &ctx)
    }

    #[test]
    fn test_complete_record() {
        assert_eq!(run(&compliant_receipt()), RuleOutcome::default());
    }

    #[test]
    fn test_all_missing() {
        let outcome = run(&GoBDReceiptData::default());
        assert_eq!(outcome.penalty, 20 + 15 + 25 + 30 + 5);

        let fields: Vec<&str> = outcome.issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "belegnummer",
                "belegdatum",
                "lieferant.name",
                "steuerberechnung.bruttobetrag",
                "eingangsdatum"
            ]
        );
        assert_eq!(outcome.issues[4].severity, Severity::Warning);
    }

    #[test]
    fn test_unknown_supplier_sentinel() {
        let mut record = compliant_receipt();
        record.lieferant.name = "Unbekannter Lieferant".to_string();
        let outcome = run(&record);
        assert_eq!(outcome.penalty, 25);
        assert_eq!(outcome.issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_negative_gross() {
        let mut record = compliant_receipt();
        record.steuerberechnung.bruttobetrag = Decimal::new(-500, 2);
        assert_eq!(run(&record).penalty, 30);
    }
}
