//! Syntactic format checks used by the compliance rules.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::config::ValidationConfig;

lazy_static! {
    static ref VAT_ID: Regex = Regex::new(r"^[A-Z]{2}[0-9A-Z]{8,15}$").unwrap();

    static ref TAX_NUMBER_FORMATS: [Regex; 3] = [
        // 12/345/67890
        Regex::new(r"^\d{2,3}/\d{3,4}/\d{4,5}$").unwrap(),
        // 12345678901
        Regex::new(r"^\d{10,11}$").unwrap(),
        // 12 345 67890
        Regex::new(r"^\d{2}\s\d{3}\s\d{5}$").unwrap(),
    ];

    static ref POSTAL_CODE: Regex = Regex::new(r"^\d{5}$").unwrap();

    static ref CITY_NAME: Regex = Regex::new(r"^[a-zA-ZäöüÄÖÜß\s\-]+$").unwrap();

    static ref DOCUMENT_NUMBER_FORMATS: [Regex; 4] = [
        // 123456
        Regex::new(r"^\d+$").unwrap(),
        // RG-123456, INV123
        Regex::new(r"(?i)^[A-Z]{1,3}-?\d+$").unwrap(),
        // 2024-001234
        Regex::new(r"^\d{4}-\d+$").unwrap(),
        // ABC-DEF-123456
        Regex::new(r"(?i)^[A-Z0-9]+-[A-Z0-9]+-\d+$").unwrap(),
    ];
}

/// Whitespace-insensitive VAT identifier shape: two letters, then 8 to 15
/// letters or digits.
pub fn is_vat_id(id: &str) -> bool {
    let compact: String = id.chars().filter(|c| !c.is_whitespace()).collect();
    VAT_ID.is_match(&compact)
}

/// German Steuernummer in one of the accepted notations.
pub fn is_tax_number(number: &str) -> bool {
    let number = number.trim();
    TAX_NUMBER_FORMATS.iter().any(|re| re.is_match(number))
}

/// Five-digit German postal code within 01001 - 99998.
pub fn is_domestic_postal_code(plz: &str) -> bool {
    let plz = plz.trim();
    POSTAL_CODE.is_match(plz)
        && plz
            .parse::<u32>()
            .is_ok_and(|n| (1001..=99998).contains(&n))
}

pub fn is_city_name(city: &str) -> bool {
    let city = city.trim();
    city.chars().count() >= 2 && CITY_NAME.is_match(city)
}

/// Check an expense account against the configured band and allow-list.
///
/// Returns the reason on failure.
pub fn check_account(account: &str, config: &ValidationConfig) -> Result<(), String> {
    let account = account.trim();
    let in_range = account.parse::<u32>().is_ok_and(|n| {
        (config.expense_account_min..=config.expense_account_max).contains(&n)
            || config.special_accounts.contains(&n)
    });

    if in_range {
        Ok(())
    } else {
        Err(format!(
            "account {} outside standard expense range ({}-{})",
            account, config.expense_account_min, config.expense_account_max
        ))
    }
}

/// Check a document number against the accepted shapes.
pub fn check_document_number(number: &str) -> Result<(), &'static str> {
    let number = number.trim();
    if number.chars().count() < 3 {
        return Err("document number too short");
    }
    if DOCUMENT_NUMBER_FORMATS.iter().any(|re| re.is_match(number)) {
        Ok(())
    } else {
        Err("unusual document number format")
    }
}

/// Parse a receipt date in ISO (`2025-07-01`) or German (`01.07.2025`) form.
pub fn parse_receipt_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d.%m.%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vat_id() {
        assert!(is_vat_id("DE123456789"));
        assert!(is_vat_id("DE 123 456 789"));
        assert!(is_vat_id("IE3206488LH"));
        assert!(!is_vat_id("DE1234"));
        assert!(!is_vat_id("123456789"));
        assert!(!is_vat_id("de123456789"));
    }

    #[test]
    fn test_tax_number() {
        assert!(is_tax_number("12/345/67890"));
        assert!(is_tax_number("123/4567/89012"));
        assert!(is_tax_number("12345678901"));
        assert!(is_tax_number("12 345 67890"));
        assert!(!is_tax_number("12-345-67890"));
        assert!(!is_tax_number("1234"));
    }

    #[test]
    fn test_postal_code_and_city() {
        assert!(is_domestic_postal_code("10115"));
        assert!(is_domestic_postal_code("01067"));
        assert!(!is_domestic_postal_code("00999"));
        assert!(!is_domestic_postal_code("99999"));
        assert!(!is_domestic_postal_code("1011"));

        assert!(is_city_name("München"));
        assert!(is_city_name("Halle-Neustadt"));
        assert!(!is_city_name("B"));
        assert!(!is_city_name("Dublin 2"));
    }

    #[test]
    fn test_account() {
        let config = ValidationConfig::default();
        assert!(check_account("4200", &config).is_ok());
        assert!(check_account("1400", &config).is_ok());
        let reason = check_account("1000", &config).unwrap_err();
        assert!(reason.contains("4000-7999"));
        assert!(check_account("abc", &config).is_err());
    }

    #[test]
    fn test_document_number() {
        assert!(check_document_number("123456").is_ok());
        assert!(check_document_number("RG-123456").is_ok());
        assert!(check_document_number("INV123").is_ok());
        assert!(check_document_number("2024-001234").is_ok());
        assert!(check_document_number("ABCD1234-0003-17").is_ok());
        assert_eq!(check_document_number("A1"), Err("document number too short"));
        assert_eq!(
            check_document_number("RE/2025/17"),
            Err("unusual document number format")
        );
    }

    #[test]
    fn test_parse_receipt_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 7, 1);
        assert_eq!(parse_receipt_date("2025-07-01"), expected);
        assert_eq!(parse_receipt_date("01.07.2025"), expected);
        assert_eq!(parse_receipt_date("July 1"), None);
        assert_eq!(parse_receipt_date("31.02.2025"), None);
    }
}
