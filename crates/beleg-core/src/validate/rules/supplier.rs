//! Supplier master data: address, VAT identifier, tax number, postal code.
//!
//! VAT identifiers are checked for shape only. Identifiers carrying the
//! trusted domestic prefix are accepted; every other well-formed identifier
//! is flagged for verification in the EU VIES registry.

use crate::models::receipt::GoBDReceiptData;
use crate::models::validation::ValidationIssue;
use crate::validate::formats::{is_city_name, is_domestic_postal_code, is_tax_number, is_vat_id};
use crate::validate::{RuleContext, RuleOutcome};

pub fn check(record: &GoBDReceiptData, ctx: &RuleContext<'_>) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    let supplier = &record.lieferant;

    if supplier.adresse.as_deref().is_none_or(|a| a.trim().is_empty()) {
        outcome.push(
            ValidationIssue::warning(
                "lieferant.adresse",
                "supplier address missing; required for invoices above the small-receipt limit",
            ),
            5,
        );
    }

    if let Some(vat_id) = supplier.ust_id_nr.as_deref().filter(|v| !v.trim().is_empty()) {
        check_vat_id(vat_id, ctx, &mut outcome);
    }

    if let Some(tax_number) = supplier.steuernummer.as_deref().filter(|t| !t.trim().is_empty()) {
        if !is_tax_number(tax_number) {
            outcome.push(
                ValidationIssue::warning(
                    "lieferant.steuernummer",
                    format!("tax number \"{}\" has an invalid format", tax_number),
                ),
                8,
            );
        }
    }

    if let (Some(plz), Some(ort)) = (supplier.plz.as_deref(), supplier.ort.as_deref()) {
        if !is_domestic_postal_code(plz) || !is_city_name(ort) {
            outcome.push(
                ValidationIssue::info(
                    "lieferant.plz",
                    format!("postal code {} and city {} do not look consistent", plz, ort),
                ),
                0,
            );
        }
    }

    outcome
}

fn check_vat_id(vat_id: &str, ctx: &RuleContext<'_>, outcome: &mut RuleOutcome) {
    if !is_vat_id(vat_id) {
        outcome.push(
            ValidationIssue::warning(
                "lieferant.ustIdNr",
                format!("VAT ID \"{}\" could not be validated", vat_id),
            )
            .with_suggestion("manual verification required"),
            10,
        );
        outcome.recommend(format!("Verify VAT ID {} manually in the EU VIES system", vat_id));
        return;
    }

    let compact: String = vat_id.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.starts_with(&ctx.config.trusted_vat_prefix) {
        outcome.recommend(format!("VAT ID {} has a valid German format", compact));
    } else {
        outcome.push(
            ValidationIssue::info(
                "lieferant.ustIdNr",
                format!("foreign VAT ID {} needs manual verification", compact),
            ),
            0,
        );
        outcome.recommend(format!("Verify VAT ID {} in the EU VIES system", compact));
    }
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
    fn test_domestic_vat_id() {
        let outcome = run(&compliant_receipt());
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.penalty, 0);
        assert_eq!(outcome.recommendations.len(), 1);
    }

    #[test]
    fn test_malformed_vat_id() {
        let mut record = compliant_receipt();
        record.lieferant.ust_id_nr = Some("DE12".to_string());
        let outcome = run(&record);

        assert_eq!(outcome.penalty, 10);
        assert_eq!(outcome.issues[0].severity, Severity::Warning);
        assert_eq!(
            outcome.issues[0].suggested_value.as_deref(),
            Some("manual verification required")
        );
        assert!(outcome.recommendations[0].contains("VIES"));
    }

    #[test]
    fn test_foreign_vat_id_needs_verification() {
        let mut record = compliant_receipt();
        record.lieferant.ust_id_nr = Some("IE3206488LH".to_string());
        let outcome = run(&record);

        assert_eq!(outcome.penalty, 0);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].severity, Severity::Info);
        assert!(outcome.recommendations[0].contains("VIES"));
    }

    #[test]
    fn test_missing_address_and_bad_tax_number() {
        let mut record = compliant_receipt();
        record.lieferant.adresse = None;
        record.lieferant.steuernummer = Some("12-345".to_string());
        let outcome = run(&record);
        assert_eq!(outcome.penalty, 5 + 8);
    }

    #[test]
    fn test_foreign_postal_code_is_info() {
        let mut record = compliant_receipt();
        record.lieferant.plz = Some("2".to_string());
        record.lieferant.ort = Some("Dublin 2".to_string());
        let outcome = run(&record);

        assert_eq!(outcome.penalty, 0);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].severity, Severity::Info);
        assert_eq!(outcome.issues[0].field, "lieferant.plz");
    }
}
