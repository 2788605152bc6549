//! Tax calculation plausibility.

use rust_decimal::Decimal;

use crate::extract::rules::round_cents;
use crate::models::receipt::GoBDReceiptData;
use crate::models::validation::ValidationIssue;
use crate::validate::{RuleContext, RuleOutcome};

pub fn check(record: &GoBDReceiptData, ctx: &RuleContext<'_>) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    let tax = &record.steuerberechnung;
    let tolerance = ctx.config.tolerance;
    let factor = tax.ust_satz / Decimal::ONE_HUNDRED;
    let rate = tax.ust_satz.normalize();

    // Compare unrounded products; rounding is for display only.
    let gross_product = tax.nettobetrag * (Decimal::ONE + factor);
    if (gross_product - tax.bruttobetrag).abs() > tolerance {
        let expected_gross = round_cents(gross_product);
        outcome.push(
            ValidationIssue::error(
                "steuerberechnung",
                format!(
                    "implausible tax calculation: net {:.2} + {}% VAT should be {:.2}, not {:.2}",
                    tax.nettobetrag, rate, expected_gross, tax.bruttobetrag
                ),
            )
            .with_suggestion(format!("{:.2}", expected_gross)),
            15,
        );
    }

    let vat_product = tax.nettobetrag * factor;
    if (vat_product - tax.ust_betrag).abs() > tolerance {
        let expected_vat = round_cents(vat_product);
        outcome.push(
            ValidationIssue::warning(
                "steuerberechnung.ustBetrag",
                format!(
                    "implausible VAT amount: {:.2} should be {:.2}",
                    tax.ust_betrag, expected_vat
                ),
            ),
            10,
        );
    }

    if !ctx.config.domestic_vat_rates.contains(&tax.ust_satz) {
        outcome.push(
            ValidationIssue::warning(
                "steuerberechnung.ustSatz",
                format!("unusual VAT rate {}% (German rates: 19%, 7%, 0%)", rate),
            ),
            5,
        );
    }

    if tax.kleinunternehmer && !tax.ust_satz.is_zero() {
        outcome.push(
            ValidationIssue::error(
                "steuerberechnung.kleinunternehmer",
                format!(
                    "supplier under the small-business exemption (§19 UStG) must not charge VAT, but {}% is shown",
                    rate
                ),
            ),
            20,
        );
    }

    if tax.innergemeinschaftlich && !tax.ust_satz.is_zero() {
        outcome.push(
            ValidationIssue::warning(
                "steuerberechnung.innergemeinschaftlich",
                "intra-community supplies are normally zero-rated",
            ),
            10,
        );
    }

    outcome
}
