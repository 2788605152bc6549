//! Invoice number extraction.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{INVOICE_NUMBER_DOCUMENT, INVOICE_NUMBER_GENERIC, INVOICE_NUMBER_LABELLED};

lazy_static! {
    // Precedence order
    static ref INVOICE_NUMBER_PATTERNS: [&'static Regex; 3] = [
        &*INVOICE_NUMBER_LABELLED,
        &*INVOICE_NUMBER_DOCUMENT,
        &*INVOICE_NUMBER_GENERIC,
    ];
}

/// Extract the invoice number, or an empty string when none is printed.
pub fn extract_invoice_number(text: &str) -> String {
    INVOICE_NUMBER_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_matches(|c| c == '-' || c == '/'))
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}
