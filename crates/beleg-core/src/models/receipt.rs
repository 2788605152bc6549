//! Canonical GoBD receipt schema consumed by the compliance validator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::BookingDefaults;
use super::document::DraftExpenseRecord;

/// A booked incoming receipt in GoBD terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoBDReceiptData {
    /// Document number (Belegnummer).
    pub belegnummer: String,

    /// Document date (Belegdatum), `YYYY-MM-DD` or `DD.MM.YYYY`.
    pub belegdatum: String,

    /// Date the document entered bookkeeping (Eingangsdatum).
    pub eingangsdatum: String,

    /// Supplier master data.
    pub lieferant: Lieferant,

    /// Tax block.
    pub steuerberechnung: Steuerberechnung,

    /// DATEV account assignment.
    pub datev: DatevZuordnung,

    /// Currency and payment terms.
    pub rechnungsdetails: Rechnungsdetails,
}

/// Supplier master data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Lieferant {
    pub name: String,

    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,

    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plz: Option<String>,

    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ort: Option<String>,

    /// Country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land: Option<String>,

    /// EU VAT identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ust_id_nr: Option<String>,

    /// German national tax number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steuernummer: Option<String>,
}

/// Tax block of a receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Steuerberechnung {
    pub nettobetrag: Decimal,

    /// VAT rate in percent.
    pub ust_satz: Decimal,

    pub ust_betrag: Decimal,

    pub bruttobetrag: Decimal,

    /// Supplier uses the §19 UStG small-business exemption.
    pub kleinunternehmer: bool,

    /// Intra-community supply.
    pub innergemeinschaftlich: bool,
}

/// DATEV account assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatevZuordnung {
    /// Expense account.
    pub konto_nummer: String,

    /// Counter (creditor) account.
    pub gegenkonto: String,

    /// Document-type code.
    pub belegkreis: String,

    pub buchungstext: String,

    /// Cost center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kostenstelle: Option<String>,
}

/// Currency and payment terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rechnungsdetails {
    pub waehrung: String,

    pub zahlungsbedingungen: Zahlungsbedingungen,
}

impl Default for Rechnungsdetails {
    fn default() -> Self {
        Self {
            waehrung: "EUR".to_string(),
            zahlungsbedingungen: Zahlungsbedingungen::default(),
        }
    }
}

/// Payment terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Zahlungsbedingungen {
    /// Payment term in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zahlungsziel: Option<u32>,

    /// Explicit due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faelligkeitsdatum: Option<String>,
}

impl Zahlungsbedingungen {
    /// Whether a due date can be derived from these terms.
    pub fn has_due_date(&self) -> bool {
        self.zahlungsziel.is_some()
            || self
                .faelligkeitsdatum
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty())
    }
}

impl GoBDReceiptData {
    /// Map an extracted draft onto the GoBD schema.
    ///
    /// `intake_date` becomes the Eingangsdatum; generated document numbers
    /// are derived from `sequence`.
    pub fn from_draft(
        draft: &DraftExpenseRecord,
        defaults: &BookingDefaults,
        intake_date: NaiveDate,
        sequence: u64,
    ) -> Self {
        let belegnummer = if !draft.invoice_number.is_empty() {
            draft.invoice_number.clone()
        } else if defaults.generate_document_number {
            format!("{}-{:06}", defaults.document_number_prefix, sequence % 1_000_000)
        } else {
            String::new()
        };

        let company = &draft.company;
        let lieferant = Lieferant {
            name: draft.vendor.clone(),
            adresse: company.street_address.clone(),
            plz: company.postal_code.clone(),
            ort: company.city.clone(),
            land: company.country.clone(),
            ust_id_nr: company.vat_id.clone(),
            steuernummer: company.tax_number.clone(),
        };

        let steuerberechnung = Steuerberechnung {
            nettobetrag: draft.vat.net_amount,
            ust_satz: draft.vat.rate,
            ust_betrag: draft.vat.vat_amount,
            bruttobetrag: draft.total_amount,
            kleinunternehmer: false,
            innergemeinschaftlich: false,
        };

        let datev = DatevZuordnung {
            konto_nummer: defaults.expense_account.clone(),
            gegenkonto: defaults.creditor_account.clone(),
            belegkreis: defaults.document_type_code.clone(),
            buchungstext: format!("{} - Rechnung", draft.vendor),
            kostenstelle: None,
        };

        let rechnungsdetails = Rechnungsdetails {
            waehrung: draft.currency.clone(),
            zahlungsbedingungen: Zahlungsbedingungen {
                zahlungsziel: defaults.payment_days,
                faelligkeitsdatum: draft.due_date.map(|d| d.to_string()),
            },
        };

        Self {
            belegnummer,
            belegdatum: draft.issue_date.to_string(),
            eingangsdatum: intake_date.to_string(),
            lieferant,
            steuerberechnung,
            datev,
            rechnungsdetails,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{CompanyDetails, VatBreakdown, VatSource};
    use pretty_assertions::assert_eq;

    fn draft() -> DraftExpenseRecord {
        DraftExpenseRecord {
            vendor: "Muster GmbH".to_string(),
            total_amount: Decimal::new(11900, 2),
            currency: "EUR".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            invoice_number: String::new(),
            due_date: NaiveDate::from_ymd_opt(2025, 7, 31),
            vat: VatBreakdown {
                rate: Decimal::new(19, 0),
                vat_amount: Decimal::new(1900, 2),
                net_amount: Decimal::new(10000, 2),
                source: VatSource::DefaultStandardRate,
            },
            company: CompanyDetails {
                postal_code: Some("10115".to_string()),
                city: Some("Berlin".to_string()),
                vat_id: Some("DE123456789".to_string()),
                ..Default::default()
            },
            confidence: 0.8,
            raw_text: String::new(),
        }
    }

    #[test]
    fn test_from_draft() {
        let intake = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();
        let receipt =
            GoBDReceiptData::from_draft(&draft(), &BookingDefaults::default(), intake, 1_234_567);

        assert_eq!(receipt.belegnummer, "ER-234567");
        assert_eq!(receipt.belegdatum, "2025-07-01");
        assert_eq!(receipt.eingangsdatum, "2025-07-03");
        assert_eq!(receipt.lieferant.plz.as_deref(), Some("10115"));
        assert_eq!(receipt.steuerberechnung.bruttobetrag, Decimal::new(11900, 2));
        assert_eq!(receipt.datev.konto_nummer, "4400");
        assert_eq!(receipt.datev.buchungstext, "Muster GmbH - Rechnung");
        assert_eq!(
            receipt.rechnungsdetails.zahlungsbedingungen,
            Zahlungsbedingungen {
                zahlungsziel: Some(30),
                faelligkeitsdatum: Some("2025-07-31".to_string()),
            }
        );
    }

    #[test]
    fn test_from_draft_keeps_invoice_number() {
        let mut draft = draft();
        draft.invoice_number = "RE-2025-0042".to_string();
        let intake = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();
        let receipt = GoBDReceiptData::from_draft(&draft, &BookingDefaults::default(), intake, 1);
        assert_eq!(receipt.belegnummer, "RE-2025-0042");
    }

    #[test]
    fn test_from_draft_without_generated_number() {
        let defaults = BookingDefaults {
            generate_document_number: false,
            ..Default::default()
        };
        let intake = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();
        let receipt = GoBDReceiptData::from_draft(&draft(), &defaults, intake, 1);
        assert!(receipt.belegnummer.is_empty());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "belegnummer": "RE-1",
            "belegdatum": "01.07.2025",
            "lieferant": {"name": "ACME AG", "ustIdNr": "DE123456789"},
            "steuerberechnung": {"nettobetrag": "100.00", "ustSatz": 19, "ustBetrag": "19.00", "bruttobetrag": "119.00"},
            "datev": {"kontoNummer": "4200", "gegenkonto": "70000", "belegkreis": "ER", "buchungstext": "x"}
        }"#;
        let receipt: GoBDReceiptData = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.lieferant.ust_id_nr.as_deref(), Some("DE123456789"));
        assert_eq!(receipt.steuerberechnung.ust_satz, Decimal::new(19, 0));
        assert_eq!(receipt.rechnungsdetails.waehrung, "EUR");
        assert!(receipt.eingangsdatum.is_empty());
    }

    #[test]
    fn test_has_due_date() {
        assert!(!Zahlungsbedingungen::default().has_due_date());
        assert!(Zahlungsbedingungen {
            zahlungsziel: Some(14),
            faelligkeitsdatum: None
        }
        .has_due_date());
        assert!(!Zahlungsbedingungen {
            zahlungsziel: None,
            faelligkeitsdatum: Some(" ".to_string())
        }
        .has_due_date());
    }
}
