//! GoBD compliance validation.
//!
//! Six independent rules each inspect a [`GoBDReceiptData`] and return the
//! issues they found together with penalty points. A reducer combines the
//! outcomes into a [`ValidationResult`]:
//!
//! - `score = clamp(100 - sum(penalties), 0, 100)`
//! - `is_compliant` holds exactly when no issue has severity ERROR
//!
//! Rules are pure functions of the record, the configuration and the
//! reference date; validation never fails.

pub mod formats;
pub mod rules;

use chrono::{Local, NaiveDate};

use crate::models::config::ValidationConfig;
use crate::models::receipt::GoBDReceiptData;
use crate::models::validation::{Severity, ValidationIssue, ValidationResult};

/// Score below which a manual re-check of the recognition is recommended.
const RECHECK_THRESHOLD: u8 = 95;

/// Inputs shared by all rules.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub config: &'a ValidationConfig,
    /// Reference date for future/age checks.
    pub today: NaiveDate,
}

/// Issues, penalty points and recommendations produced by one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    pub issues: Vec<ValidationIssue>,
    pub penalty: u32,
    pub recommendations: Vec<String>,
}

impl RuleOutcome {
    /// Record an issue and its penalty.
    pub fn push(&mut self, issue: ValidationIssue, penalty: u32) {
        self.issues.push(issue);
        self.penalty += penalty;
    }

    pub fn recommend(&mut self, recommendation: impl Into<String>) {
        self.recommendations.push(recommendation.into());
    }
}

/// A compliance rule.
pub type Rule = fn(&GoBDReceiptData, &RuleContext<'_>) -> RuleOutcome;

/// Rules in evaluation order.
pub const RULES: [(&str, Rule); 6] = [
    ("mandatory_fields", rules::mandatory::check),
    ("supplier", rules::supplier::check),
    ("tax_calculation", rules::tax::check),
    ("datev_mapping", rules::datev::check),
    ("invoice_logic", rules::invoice_logic::check),
    ("standards", rules::standards::check),
];

/// GoBD compliance validator.
#[derive(Debug, Clone, Default)]
pub struct ComplianceValidator {
    config: ValidationConfig,
}

impl ComplianceValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate against today's local date.
    pub fn validate(&self, record: &GoBDReceiptData) -> ValidationResult {
        self.validate_on(record, Local::now().date_naive())
    }

    /// Validate with an explicit reference date.
    pub fn validate_on(&self, record: &GoBDReceiptData, today: NaiveDate) -> ValidationResult {
        let ctx = RuleContext {
            config: &self.config,
            today,
        };

        let outcomes = RULES.iter().map(|(_, rule)| rule(record, &ctx));
        reduce(record, outcomes)
    }
}

/// Combine rule outcomes and append the always-on recommendations.
fn reduce(
    record: &GoBDReceiptData,
    outcomes: impl IntoIterator<Item = RuleOutcome>,
) -> ValidationResult {
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();
    let mut penalty: u32 = 0;

    for outcome in outcomes {
        issues.extend(outcome.issues);
        recommendations.extend(outcome.recommendations);
        penalty = penalty.saturating_add(outcome.penalty);
    }

    let score = 100u32.saturating_sub(penalty).min(100) as u8;
    let is_compliant = !issues.iter().any(|i| i.severity == Severity::Error);

    if score < RECHECK_THRESHOLD {
        recommendations.push("Manually re-check the recognized fields against the original document".to_string());
    }
    if record.datev.kostenstelle.is_none() {
        recommendations.push("Assign a cost center for cost analysis".to_string());
    }
    if !record.rechnungsdetails.zahlungsbedingungen.has_due_date() {
        recommendations.push("Capture a payment due date for liquidity planning".to_string());
    }

    ValidationResult {
        is_compliant,
        issues,
        score,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::{
        DatevZuordnung, Lieferant, Rechnungsdetails, Steuerberechnung, Zahlungsbedingungen,
    };
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()
    }

    pub(crate) fn compliant_receipt() -> GoBDReceiptData {
        GoBDReceiptData {
            belegnummer: "RE-2025-0042".to_string(),
            belegdatum: "2025-07-01".to_string(),
            eingangsdatum: "2025-07-03".to_string(),
            lieferant: Lieferant {
                name: "Muster GmbH".to_string(),
                adresse: Some("Musterstraße 12".to_string()),
                plz: Some("10115".to_string()),
                ort: Some("Berlin".to_string()),
                land: Some("Deutschland".to_string()),
                ust_id_nr: Some("DE123456789".to_string()),
                steuernummer: Some("12/345/67890".to_string()),
            },
            steuerberechnung: Steuerberechnung {
                nettobetrag: Decimal::new(100000, 2),
                ust_satz: Decimal::new(19, 0),
                ust_betrag: Decimal::new(19000, 2),
                bruttobetrag: Decimal::new(119000, 2),
                kleinunternehmer: false,
                innergemeinschaftlich: false,
            },
            datev: DatevZuordnung {
                konto_nummer: "4200".to_string(),
                gegenkonto: "70000".to_string(),
                belegkreis: "ER".to_string(),
                buchungstext: "Muster GmbH - Rechnung".to_string(),
                kostenstelle: Some("100".to_string()),
            },
            rechnungsdetails: Rechnungsdetails {
                waehrung: "EUR".to_string(),
                zahlungsbedingungen: Zahlungsbedingungen {
                    zahlungsziel: Some(30),
                    faelligkeitsdatum: Some("2025-07-31".to_string()),
                },
            },
        }
    }

    fn validate(record: &GoBDReceiptData) -> ValidationResult {
        ComplianceValidator::default().validate_on(record, today())
    }

    #[test]
    fn test_compliant_receipt() {
        let result = validate(&compliant_receipt());
        assert!(result.issues.is_empty(), "{:?}", result.issues);
        assert!(result.is_compliant);
        assert_eq!(result.score, 100);
        assert_eq!(
            result.recommendations,
            vec!["VAT ID DE123456789 has a valid German format".to_string()]
        );
    }

    #[test]
    fn test_empty_receipt_floors_score() {
        let result = validate(&GoBDReceiptData::default());
        assert_eq!(result.score, 0);
        assert!(!result.is_compliant);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.contains("re-check")));
    }

    #[test]
    fn test_compliance_matches_error_presence() {
        let mut records = vec![compliant_receipt(), GoBDReceiptData::default()];

        let mut warning_only = compliant_receipt();
        warning_only.datev.gegenkonto.clear();
        records.push(warning_only);

        let mut small_business = compliant_receipt();
        small_business.steuerberechnung.kleinunternehmer = true;
        records.push(small_business);

        let mut mismatch = compliant_receipt();
        mismatch.steuerberechnung.ust_satz = Decimal::new(7, 0);
        records.push(mismatch);

        for record in &records {
            let result = validate(record);
            assert!(result.score <= 100);
            assert_eq!(
                result.is_compliant,
                result.issues.iter().all(|i| i.severity != Severity::Error)
            );
        }
    }

    #[test]
    fn test_warning_keeps_compliance() {
        let mut record = compliant_receipt();
        record.datev.gegenkonto.clear();
        let result = validate(&record);
        assert!(result.is_compliant);
        assert_eq!(result.score, 90);
        assert_eq!(result.issues_for("datev.gegenkonto").count(), 1);
    }

    #[test]
    fn test_always_on_recommendations() {
        let mut record = compliant_receipt();
        record.datev.kostenstelle = None;
        record.rechnungsdetails.zahlungsbedingungen = Zahlungsbedingungen::default();
        let result = validate(&record);
        assert!(result.recommendations.iter().any(|r| r.contains("cost center")));
        assert!(result.recommendations.iter().any(|r| r.contains("due date")));
        assert!(!result.recommendations.iter().any(|r| r.contains("re-check")));
    }

    #[test]
    fn test_reduce_saturates() {
        let outcome = RuleOutcome {
            issues: Vec::new(),
            penalty: u32::MAX,
            recommendations: Vec::new(),
        };
        let result = reduce(&compliant_receipt(), [outcome.clone(), outcome]);
        assert_eq!(result.score, 0);
        assert!(result.is_compliant);
    }
}
