//! Common regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Amount with exactly two fraction digits, decimal comma or dot,
/// optional thousands grouping ("1.234,56", "1,234.56", "119.00").
const AMOUNT: &str = r"(\d{1,3}(?:[.,]\d{3})+[.,]\d{2}|\d+[.,]\d{2})\b";

/// Optional currency marker in front of an amount.
const CURRENCY_PREFIX: &str = r"(?:EUR|€|\$|£)?\s*";

lazy_static! {
    // Legal-entity suffixes (GmbH, AG, Ltd., ...)
    pub static ref LEGAL_ENTITY: Regex = Regex::new(
        r"(?:^|[\s,(])(?:GmbH|gGmbH|AG|KG|KGaA|OHG|UG|SE|GbR|e\.K\.|LLC|Limited|Inc\.?|Ltd\.?|Co\.|Corp\.?)(?:$|[\s,.)])"
    ).unwrap();

    pub static ref VENDOR_LABEL: Regex = Regex::new(
        r"(?i)^(?:From|Von|Vendor|Lieferant|Firma|Verkäufer)\s*:\s*(\S.{1,59})"
    ).unwrap();

    // Exact-match header words that are never a vendor
    pub static ref HEADER_WORD: Regex = Regex::new(
        r"(?i)^(?:stripe|Seite|Tax|Invoice|Receipt|Bill|Date|Number|Amount|VAT|Account|Total|Fee|Billing|Payment|Tax Invoice|Bill to|Quittung|Beleg|Rechnung|Schlussrechnung|Kassenbon|Datum|Zahlung|Forderung|Leistungsbeschreibung|Menge|Einheitspreis|Gesamtbetrag|Summe)$"
    ).unwrap();

    // Page numbers, invoice numbers, account statements
    pub static ref REFERENCE_LINE: Regex = Regex::new(
        r"(?i)^(?:Seite\s+\d+|Page\s+\d+|Rechnung\s+Nr\.|Invoice\s+No\.|Nr\.\s*[\d/\-]+|Schlussrechnung\s+Nr\.|Kontoblatt\s+\d{2}\.\d{2}\.\d{4})"
    ).unwrap();

    // Address fragments that look like names
    pub static ref ADDRESS_FRAGMENT: Regex = Regex::new(
        r"(?i)^(?:The One|Grand Canal|Dublin|Ireland|Street|Building|Co\.\s+\w+$)"
    ).unwrap();

    // Totals: labelled amounts
    pub static ref TOTAL_LABELLED: Regex = Regex::new(&format!(
        r"(?i)\b(?:Total|Grand\s+Total|Gesamt\w*|Summe|Endsumme|Rechnungssumme|Rechnungsbetrag|Endbetrag|Zahlbetrag|Zu\s+zahlen|Amount|Betrag)\b[\s:]*{}{}",
        CURRENCY_PREFIX, AMOUNT
    )).unwrap();

    // Totals: gross-labelled amounts
    pub static ref TOTAL_GROSS: Regex = Regex::new(&format!(
        r"(?i)\b(?:Brutto\w*|Gross|Fee\s+Amount|Including\s+VAT|Inkl\.\s*MwSt\.?)[\s:]*{}{}",
        CURRENCY_PREFIX, AMOUNT
    )).unwrap();

    // Bare currency amounts: "€119.00", "EUR 12,50", "12,50 €"
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(&format!(
        r"(?:€|EUR|\$|£)\s*{}",
        AMOUNT
    )).unwrap();

    pub static ref AMOUNT_CURRENCY: Regex = Regex::new(&format!(
        r"{}\s*(?:€|EUR)",
        AMOUNT
    )).unwrap();

    // Dates
    pub static ref DATE_LABELLED_DMY: Regex = Regex::new(
        r"(?i)(?:Rechnungsdatum|Invoice\s+Date|Leistungsdatum|Belegdatum)[\s:]*(\d{1,2})[./\-](\d{1,2})[./\-](\d{4})"
    ).unwrap();

    pub static ref DATE_MONTH_NAME: Regex = Regex::new(
        r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+(\d{1,2}),?\s+(\d{4})\b"
    ).unwrap();

    pub static ref DATE_GERMAN_LONG: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\.\s*(Januar|Februar|März|Maerz|April|Mai|Juni|Juli|August|September|Oktober|November|Dezember)\s+(\d{4})\b"
    ).unwrap();

    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{4})\b"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})\b"
    ).unwrap();

    // Lines about payment deadlines, never the issue date
    pub static ref PAYMENT_DEADLINE: Regex = Regex::new(
        r"(?i)(?:zahlung|payment|due|fällig|zahlbar)"
    ).unwrap();

    pub static ref DUE_DATE_LABEL: Regex = Regex::new(
        r"(?i)(?:Fälligkeitsdatum|Fällig\s+am|Fällig|Zahlbar\s+bis|Zahlungsziel|Zahlung\s+bis|Due\s+Date|Payment\s+Due|Date\s+Due)[\s:]*(.*)"
    ).unwrap();

    // Invoice numbers, in precedence order
    pub static ref INVOICE_NUMBER_LABELLED: Regex = Regex::new(
        r"(?i)(?:Invoice\s+Number|Rechnungs-?(?:nummer|nr\.?)|Belegnummer)[\s:#]*([A-Z0-9/\-]*\d[A-Z0-9/\-]*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_DOCUMENT: Regex = Regex::new(
        r"(?i)\b(?:Invoice|Receipt|Rechnung|Beleg)[ \t]*(?:#|Nr\.?|No\.?|Nummer)?[ \t:#\-]*([A-Z0-9/\-]*\d[A-Z0-9/\-]*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_GENERIC: Regex = Regex::new(
        r"(?i)\b(?:Nummer|Number|No\.|Nr\.)[ \t:#\-]*([A-Z0-9/\-]*\d[A-Z0-9/\-]*)"
    ).unwrap();

    // VAT breakdown
    pub static ref REVERSE_CHARGE: Regex = Regex::new(
        r"(?i)reverse\s+charge|umkehrung\s+der\s+steuerschuldnerschaft|steuerschuldnerschaft\s+des\s+leistungsempfängers"
    ).unwrap();

    pub static ref VAT_ZERO: Regex = Regex::new(
        r"(?i)(?:Total\s+VAT|MwSt\.?|VAT|USt\.?)(?:\s+Amount|\s*-?\s*Betrag)?[\s:]*(?:EUR|€|\$|£)?\s*0[.,]00\b"
    ).unwrap();

    pub static ref VAT_AMOUNT: Regex = Regex::new(&format!(
        r"(?i)(?:Total\s+VAT|MwSt\.?[\s\-]?Betrag|USt\.?[\s\-]?Betrag|VAT\s+Amount|(?:MwSt|USt)\.?\s*\d{{1,2}}(?:[.,]\d)?\s*%)[\s:]*{}{}",
        CURRENCY_PREFIX, AMOUNT
    )).unwrap();

    // Company details
    pub static ref VAT_ID_LABELLED: Regex = Regex::new(
        r"(?:(?i:VAT|USt|Steuer|UID))[\s\-]?(?:(?i:Number|Nummer|IdNr|Id-Nr|Nr|No|ID))?\.?[\s:]*([A-Z]{2}\s?[0-9A-Z]{8,15})\b"
    ).unwrap();

    pub static ref VAT_ID_GENERIC: Regex = Regex::new(
        r"\b([A-Z]{2}\s?[0-9]{8,15}[A-Z]?)\b"
    ).unwrap();

    pub static ref VAT_ID_SHAPE: Regex = Regex::new(
        r"^[A-Z]{2}[0-9A-Z]{8,15}$"
    ).unwrap();

    pub static ref TAX_NUMBER: Regex = Regex::new(
        r"(?i)(?:Steuernummer|Steuer-Nr\.?|St\.?-?Nr\.?)[\s:]*(\d{2,3}/\d{3,4}/\d{4,5}|\d{10,11}|\d{2}\s\d{3}\s\d{5})"
    ).unwrap();

    pub static ref EMAIL: Regex = Regex::new(
        r"\b([a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,})\b"
    ).unwrap();

    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+\d{1,3}[\s.\-]?)?\(?\d{2,4}\)?[\s.\-]?\d{3,4}[\s.\-]?\d{3,4}"
    ).unwrap();

    /// Bank and tax identifiers whose digit groups look like phone numbers.
    pub static ref PHONE_EXCLUDED_LINE: Regex = Regex::new(
        r"(?i)\b(?:IBAN|BIC|SWIFT|BLZ|Konto|Account|USt|VAT|UID|Steuer|St\.?-?Nr)"
    ).unwrap();

    // Address capture
    pub static ref ADDRESS_TRIGGER: Regex = Regex::new(
        r"(?i)(?:Street|Strasse|Straße|Str\.|Building|Avenue|Road|Canal|Platz|Plaza|Allee|Weg\b|Gasse)"
    ).unwrap();

    pub static ref ADDRESS_STOP: Regex = Regex::new(
        r"(?i)^(?:Bill\s+to|Invoice\s+to|Rechnung\s+an|Rechnungsempfänger)"
    ).unwrap();

    pub static ref ADDRESS_SECTION_HEADER: Regex = Regex::new(
        r"(?i)^(?:Account\s+Number|Invoice\s+Number|Invoice\s+Date|Service\s+Month|Due\s+Date|\w+\s+VAT|VAT|USt|Steuernummer|acct_|inv_)"
    ).unwrap();

    pub static ref MONTH_DAY_YEAR_LINE: Regex = Regex::new(
        r"(?i)^(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2},\s+\d{4}$"
    ).unwrap();

    pub static ref MONTH_YEAR_LINE: Regex = Regex::new(
        r"(?i)^(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{4}$"
    ).unwrap();

    pub static ref ADDRESS_HINT: Regex = Regex::new(
        r"(?i)(?:Dublin|Ireland|Street|Lower|Co\.|Germany|Deutschland|Berlin|München|Munich|Hamburg|Vienna|Wien|Zürich|\d{4,6})"
    ).unwrap();

    pub static ref COUNTRY: Regex = Regex::new(
        r"(?i)^(?:Germany|Deutschland|Ireland|Austria|Österreich|Switzerland|Schweiz|France|Frankreich|Italy|Italien|Spain|Spanien|UK|United Kingdom|Belgium|Belgien|Netherlands|Niederlande|Luxembourg|Luxemburg)$"
    ).unwrap();

    // "Dublin 2": city with postal district
    pub static ref CITY_DISTRICT: Regex = Regex::new(
        r"(?i)^(Dublin)\s+(\d{1,2}W?)$"
    ).unwrap();

    // "Co. Dublin": county idiom
    pub static ref COUNTY: Regex = Regex::new(
        r"^Co\.\s+([A-Z][a-z]+)$"
    ).unwrap();

    pub static ref ZIP_CITY: Regex = Regex::new(
        r"^(?:D-)?([A-Z0-9]{4,6})\s+(\p{L}[\p{L}\s.\-]*)$"
    ).unwrap();
}
