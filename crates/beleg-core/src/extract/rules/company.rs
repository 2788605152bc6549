//! Supplier company details: legal name, address, VAT id, tax number and
//! contact data.

use super::patterns::{
    ADDRESS_HINT, ADDRESS_SECTION_HEADER, ADDRESS_STOP, ADDRESS_TRIGGER, CITY_DISTRICT, COUNTRY,
    COUNTY, EMAIL, HEADER_WORD, LEGAL_ENTITY, MONTH_DAY_YEAR_LINE, MONTH_YEAR_LINE, PHONE,
    PHONE_EXCLUDED_LINE, REFERENCE_LINE, TAX_NUMBER, VAT_ID_GENERIC, VAT_ID_LABELLED,
    VAT_ID_SHAPE, ZIP_CITY,
};
use super::vendor::extract_legal_name;
use crate::models::config::ExtractionConfig;
use crate::models::document::CompanyDetails;

/// Lines captured after an address trigger.
const ADDRESS_RUN: usize = 5;

/// Extract supplier details from recognized lines.
pub fn extract_company_details(lines: &[&str], config: &ExtractionConfig) -> CompanyDetails {
    let text = lines.join("\n");

    let mut details = CompanyDetails {
        name: extract_legal_name(lines, config),
        vat_id: extract_vat_id(&text),
        tax_number: TAX_NUMBER.captures(&text).map(|c| c[1].to_string()),
        email: extract_email(&text, &config.internal_email_domains),
        phone: extract_phone(lines),
        ..Default::default()
    };

    apply_address(&mut details, &address_lines(lines, config));
    details
}

/// Extract a VAT identifier, labelled first, whitespace removed.
pub fn extract_vat_id(text: &str) -> Option<String> {
    let labelled = VAT_ID_LABELLED
        .captures_iter(text)
        .map(|c| compact(&c[1]))
        .find(|id| VAT_ID_SHAPE.is_match(id));

    labelled.or_else(|| {
        VAT_ID_GENERIC
            .captures_iter(text)
            .map(|c| compact(&c[1]))
            .find(|id| VAT_ID_SHAPE.is_match(id))
    })
}

fn extract_email(text: &str, internal_domains: &[String]) -> Option<String> {
    EMAIL
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .find(|email| {
            let domain = email
                .rsplit_once('@')
                .map(|(_, d)| d.to_lowercase())
                .unwrap_or_default();
            !internal_domains.iter().any(|internal| {
                let internal = internal.to_lowercase();
                domain == internal || domain.ends_with(&format!(".{}", internal))
            })
        })
}

fn extract_phone(lines: &[&str]) -> Option<String> {
    let phone_in = |line: &str| {
        PHONE
            .find_iter(line)
            .map(|m| m.as_str().trim())
            .find(|p| p.contains(['+', '(', ' ', '-']))
            .map(str::to_string)
    };

    let labelled = lines
        .iter()
        .filter(|l| is_phone_line(l))
        .find_map(|l| phone_in(*l));

    labelled.or_else(|| {
        lines
            .iter()
            .filter(|l| !PHONE_EXCLUDED_LINE.is_match(l))
            .find_map(|l| phone_in(*l))
    })
}

fn is_phone_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.starts_with("tel") || lower.starts_with("fon") || lower.contains("phone")
}

/// Collect the lines forming the supplier address block.
fn address_lines<'a>(lines: &[&'a str], config: &ExtractionConfig) -> Vec<&'a str> {
    let mut captured: Vec<&'a str> = Vec::new();
    let mut remaining = 0usize;
    let mut triggered = false;

    for (idx, &raw) in lines.iter().enumerate() {
        let line = raw.trim();

        if ADDRESS_STOP.is_match(line) {
            break;
        }

        if ADDRESS_TRIGGER.is_match(line) {
            if !triggered && idx > 0 {
                let previous: &'a str = lines[idx - 1];
                let previous = previous.trim();
                if is_address_prefix(previous, config) {
                    captured.push(previous);
                }
            }
            triggered = true;
            remaining = ADDRESS_RUN;
        }

        if remaining == 0 {
            continue;
        }
        remaining -= 1;

        if keep_address_line(line) {
            captured.push(line);
        }
        if COUNTRY.is_match(line) {
            remaining = 0;
        }
    }

    captured
}

fn is_address_prefix(line: &str, config: &ExtractionConfig) -> bool {
    let lower = line.to_lowercase();
    !line.is_empty()
        && !HEADER_WORD.is_match(line)
        && !REFERENCE_LINE.is_match(line)
        && !LEGAL_ENTITY.is_match(line)
        && !config
            .known_vendor_markers
            .iter()
            .any(|m| lower.contains(&m.to_lowercase()))
        && keep_address_line(line)
}

fn keep_address_line(line: &str) -> bool {
    if ADDRESS_SECTION_HEADER.is_match(line)
        || MONTH_DAY_YEAR_LINE.is_match(line)
        || MONTH_YEAR_LINE.is_match(line)
        || EMAIL.is_match(line)
        || is_phone_line(line)
        || VAT_ID_SHAPE.is_match(&compact(line))
    {
        return false;
    }
    if line.len() == 1 && line.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    ADDRESS_HINT.is_match(line) || (3..50).contains(&line.chars().count())
}

fn apply_address(details: &mut CompanyDetails, lines: &[&str]) {
    let mut street: Vec<&str> = Vec::new();

    for line in lines {
        if COUNTRY.is_match(line) {
            details.country.get_or_insert_with(|| line.to_string());
        } else if let Some(caps) = CITY_DISTRICT.captures(line) {
            if details.city.is_none() {
                details.city = Some(format!("{} {}", &caps[1], &caps[2]));
                details.postal_code = Some(caps[2].to_string());
            }
        } else if let Some(caps) = COUNTY.captures(line) {
            details.city.get_or_insert_with(|| caps[1].to_string());
        } else if let Some((zip, city)) = zip_city(line) {
            if details.city.is_none() {
                details.postal_code = Some(zip);
                details.city = Some(city);
            }
        } else if details.city.is_none() && details.country.is_none() {
            street.push(line);
        }
    }

    if !street.is_empty() {
        details.street_address = Some(street.join(", "));
    }
}

/// Postal code and city; the postal code must contain a digit.
fn zip_city(line: &str) -> Option<(String, String)> {
    let caps = ZIP_CITY.captures(line)?;
    let zip = &caps[1];
    zip.chars()
        .any(|c| c.is_ascii_digit())
        .then(|| (zip.to_string(), caps[2].trim().to_string()))
}

fn compact(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn details(lines: &[&str]) -> CompanyDetails {
        extract_company_details(lines, &ExtractionConfig::default())
    }

    #[test]
    fn test_irish_address() {
        let lines = [
            "stripe",
            "Invoice",
            "Stripe Payments Europe, Limited",
            "The One Building",
            "1 Grand Canal Street Lower",
            "Dublin 2",
            "Co. Dublin",
            "Ireland",
            "VAT IE3206488LH",
            "Bill to",
            "Kunde GmbH",
            "Musterstraße 1",
            "10115 Berlin",
        ];
        let found = details(&lines);

        assert_eq!(found.name.as_deref(), Some("Stripe Payments Europe, Limited"));
        assert_eq!(
            found.street_address.as_deref(),
            Some("The One Building, 1 Grand Canal Street Lower")
        );
        assert_eq!(found.city.as_deref(), Some("Dublin 2"));
        assert_eq!(found.postal_code.as_deref(), Some("2"));
        assert_eq!(found.country.as_deref(), Some("Ireland"));
        assert_eq!(found.vat_id.as_deref(), Some("IE3206488LH"));
    }

    #[test]
    fn test_german_address() {
        let lines = [
            "Muster GmbH",
            "Musterstraße 12",
            "10115 Berlin",
            "Deutschland",
            "USt-IdNr.: DE 123456789",
            "Steuernummer: 12/345/67890",
            "Tel. +49 30 1234567",
            "info@muster.de",
        ];
        let found = details(&lines);

        assert_eq!(found.name.as_deref(), Some("Muster GmbH"));
        assert_eq!(found.street_address.as_deref(), Some("Musterstraße 12"));
        assert_eq!(found.postal_code.as_deref(), Some("10115"));
        assert_eq!(found.city.as_deref(), Some("Berlin"));
        assert_eq!(found.country.as_deref(), Some("Deutschland"));
        assert_eq!(found.vat_id.as_deref(), Some("DE123456789"));
        assert_eq!(found.tax_number.as_deref(), Some("12/345/67890"));
        assert_eq!(found.phone.as_deref(), Some("+49 30 1234567"));
        assert_eq!(found.email.as_deref(), Some("info@muster.de"));
    }

    #[test]
    fn test_internal_email_skipped() {
        let lines = ["support@stripe.com", "billing@acme.io"];
        assert_eq!(details(&lines).email.as_deref(), Some("billing@acme.io"));
    }

    #[test]
    fn test_iban_is_not_a_phone() {
        let lines = ["IBAN DE89 3704 0044 0532 0130 00"];
        assert_eq!(details(&lines).phone, None);
    }

    #[test]
    fn test_phone_without_country_code() {
        let lines = ["Muster GmbH", "Musterstraße 12", "10115 Berlin", "030 1234 5678"];
        assert_eq!(details(&lines).phone.as_deref(), Some("030 1234 5678"));
    }

    #[test]
    fn test_tax_ids_are_not_phones() {
        let lines = ["Muster GmbH", "USt-IdNr.: DE 811 907 980", "Steuernummer 21 457 300 123"];
        assert_eq!(details(&lines).phone, None);
    }

    #[test]
    fn test_nothing_found() {
        assert!(details(&["Total €10.00"]).is_empty());
    }
}
