//! Total amount extraction.
//!
//! Every localized amount pattern is applied to the whole text and all
//! matches are collected as candidates. Which candidate becomes the total is
//! decided by an [`AmountSelector`]; the default [`MaxAmountSelector`] takes
//! the largest value, so an incidental number larger than the real total
//! (a credit line, a yearly volume) wins over it.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use super::patterns::{AMOUNT_CURRENCY, CURRENCY_AMOUNT, TOTAL_GROSS, TOTAL_LABELLED};

/// Which pattern produced an amount candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountKind {
    /// "Total", "Gesamt", "Summe", "Betrag", ...
    Labelled,
    /// "Brutto", "Gross", "Fee Amount", ...
    Gross,
    /// Bare currency amount.
    Currency,
}

/// An amount found in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountCandidate {
    pub value: Decimal,
    pub kind: AmountKind,
    /// Byte offset of the amount in the text.
    pub position: usize,
}

/// Policy choosing the document total among amount candidates.
pub trait AmountSelector: Send + Sync {
    fn select(&self, candidates: &[AmountCandidate]) -> Option<Decimal>;
}

/// Picks the largest candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxAmountSelector;

impl AmountSelector for MaxAmountSelector {
    fn select(&self, candidates: &[AmountCandidate]) -> Option<Decimal> {
        candidates.iter().map(|c| c.value).max()
    }
}

lazy_static! {
    static ref AMOUNT_PATTERNS: [(&'static Regex, AmountKind); 4] = [
        (&*TOTAL_LABELLED, AmountKind::Labelled),
        (&*TOTAL_GROSS, AmountKind::Gross),
        (&*CURRENCY_AMOUNT, AmountKind::Currency),
        (&*AMOUNT_CURRENCY, AmountKind::Currency),
    ];
}

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Collect every positive amount matched by any amount pattern.
    pub fn candidates(&self, text: &str) -> Vec<AmountCandidate> {
        let mut results = Vec::new();

        for (pattern, kind) in AMOUNT_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                let Some(m) = caps.get(1) else { continue };
                if let Some(value) = parse_amount(m.as_str()).filter(|v| v.is_sign_positive() && !v.is_zero()) {
                    results.push(AmountCandidate {
                        value,
                        kind: *kind,
                        position: m.start(),
                    });
                }
            }
        }

        results.sort_by_key(|c| c.position);
        results
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Select the total from `text` with the given policy, rounded to cents.
pub fn extract_total(text: &str, selector: &dyn AmountSelector) -> Option<Decimal> {
    let candidates = AmountExtractor::new().candidates(text);
    selector.select(&candidates).map(round_cents)
}

/// Parse a localized amount ("1.234,56", "1,234.56", "€ 119.00").
///
/// The last separator followed by exactly two digits is the decimal
/// separator; every other separator is a thousands separator.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = match cleaned.rfind([',', '.']) {
        Some(pos) if cleaned.len() - pos - 1 == 2 => {
            let integer: String = cleaned[..pos].chars().filter(|c| c.is_ascii_digit()).collect();
            let integer = if integer.is_empty() { "0".to_string() } else { integer };
            format!("{}.{}", integer, &cleaned[pos + 1..])
        }
        _ => cleaned.chars().filter(|c| c.is_ascii_digit()).collect(),
    };

    Decimal::from_str(&normalized).ok()
}

/// Round to two fraction digits, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("€ 119.00"), Some(dec("119.00")));
        assert_eq!(parse_amount("12.345.678,90"), Some(dec("12345678.90")));
        assert_eq!(parse_amount("1.234"), Some(dec("1234")));
        assert_eq!(parse_amount("€"), None);
    }

    #[test]
    fn test_total_prefers_max() {
        let text = "Subtotal €100.00\nTotal VAT €19.00\nTotal €119.00\nFee Amount €15.00";
        assert_eq!(extract_total(text, &MaxAmountSelector), Some(dec("119.00")));
    }

    #[test]
    fn test_max_heuristic_picks_larger_non_total() {
        // Known failure mode: a larger incidental amount beats the real total.
        let text = "Total €119.00\nFee Amount €15.00\nMonthly volume processed €2,500.00";
        assert_eq!(extract_total(text, &MaxAmountSelector), Some(dec("2500.00")));
    }

    #[test]
    fn test_german_receipt_amounts() {
        let text = "Netto 84,03 €\nMwSt. 19% 15,97 €\nGesamtbetrag: 100,00 EUR";
        assert_eq!(extract_total(text, &MaxAmountSelector), Some(dec("100.00")));
    }

    #[test]
    fn test_no_amounts() {
        assert_eq!(extract_total("Seite 1 von 2", &MaxAmountSelector), None);
        assert_eq!(extract_total("Total €0.00", &MaxAmountSelector), None);
    }

    #[test]
    fn test_candidates_kinds() {
        let candidates = AmountExtractor::new().candidates("Brutto: 59,50\nSumme 59,50 €");
        assert!(candidates.iter().any(|c| c.kind == AmountKind::Gross));
        assert!(candidates.iter().any(|c| c.kind == AmountKind::Labelled));
        assert!(candidates.iter().any(|c| c.kind == AmountKind::Currency));
    }

    struct FirstLabelled;

    impl AmountSelector for FirstLabelled {
        fn select(&self, candidates: &[AmountCandidate]) -> Option<Decimal> {
            candidates
                .iter()
                .find(|c| c.kind == AmountKind::Labelled)
                .map(|c| c.value)
        }
    }

    #[test]
    fn test_selector_is_swappable() {
        let text = "Total €119.00\nRefund credit €500.00";
        assert_eq!(extract_total(text, &FirstLabelled), Some(dec("119.00")));
        assert_eq!(extract_total(text, &MaxAmountSelector), Some(dec("500.00")));
    }
}
