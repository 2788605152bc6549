//! Vendor name extraction.
//!
//! Vendor detection is a table of rules evaluated in precedence order. Each
//! rule scans the leading lines on its own; the first rule that yields a
//! name wins, regardless of where a later rule would have matched.

use super::patterns::{ADDRESS_FRAGMENT, HEADER_WORD, LEGAL_ENTITY, REFERENCE_LINE, VENDOR_LABEL};
use crate::models::config::ExtractionConfig;

/// Lines longer than this are prose, not a company name.
const MAX_NAME_LEN: usize = 100;

/// A vendor detection rule.
pub struct VendorRule {
    pub name: &'static str,
    /// Inspect the line at the given index; later lines may be consulted.
    pub extract: fn(&[&str], usize, &ExtractionConfig) -> Option<String>,
}

/// Vendor rules in precedence order.
pub static VENDOR_RULES: &[VendorRule] = &[
    VendorRule {
        name: "known_marker",
        extract: known_marker,
    },
    VendorRule {
        name: "legal_entity",
        extract: legal_entity,
    },
    VendorRule {
        name: "labelled",
        extract: labelled,
    },
];

/// Extract the vendor from the first `vendor_scan_lines` lines.
pub fn extract_vendor(lines: &[&str], config: &ExtractionConfig) -> Option<String> {
    run_rules(lines, config.vendor_scan_lines, config)
        .next()
        .map(|(_, name)| name)
}

/// Extract a legal company name (a line carrying a legal-entity suffix)
/// from the first `company_scan_lines` lines.
pub fn extract_legal_name(lines: &[&str], config: &ExtractionConfig) -> Option<String> {
    run_rules(lines, config.company_scan_lines, config)
        .map(|(_, name)| name)
        .find(|name| LEGAL_ENTITY.is_match(name))
}

/// Lazily evaluate rules rule-outer over the first `limit` lines.
fn run_rules<'a>(
    lines: &'a [&'a str],
    limit: usize,
    config: &'a ExtractionConfig,
) -> impl Iterator<Item = (&'static str, String)> + 'a {
    let window = limit.min(lines.len());
    VENDOR_RULES.iter().flat_map(move |rule| {
        (0..window).filter_map(move |idx| (rule.extract)(lines, idx, config).map(|n| (rule.name, n)))
    })
}

fn known_marker(lines: &[&str], idx: usize, config: &ExtractionConfig) -> Option<String> {
    let line = lines[idx].trim();
    let lower = line.to_lowercase();

    let marker = config
        .known_vendor_markers
        .iter()
        .find(|m| lower.contains(&m.to_lowercase()))?;

    if is_provider_name(line) {
        return Some(clean(line));
    }

    if line.eq_ignore_ascii_case(marker) {
        // Bare logo text: prefer the full legal name printed further down
        let marker_lower = marker.to_lowercase();
        let legal = lines[idx + 1..].iter().map(|l| l.trim()).find(|l| {
            l.to_lowercase().contains(&marker_lower) && is_provider_name(l)
        });
        return Some(clean(legal.unwrap_or(line)));
    }

    None
}

/// A legal name, or a payment provider's trading name on a marker line.
fn is_provider_name(line: &str) -> bool {
    LEGAL_ENTITY.is_match(line) || line.to_lowercase().contains("payments")
}

fn legal_entity(lines: &[&str], idx: usize, _config: &ExtractionConfig) -> Option<String> {
    let line = lines[idx].trim();
    if is_noise(line) || line.len() > MAX_NAME_LEN {
        return None;
    }
    LEGAL_ENTITY.is_match(line).then(|| clean(line))
}

fn labelled(lines: &[&str], idx: usize, _config: &ExtractionConfig) -> Option<String> {
    let line = lines[idx].trim();
    let caps = VENDOR_LABEL.captures(line)?;
    let name = clean(&caps[1]);
    (!name.is_empty() && !is_noise(&name)).then_some(name)
}

fn is_noise(line: &str) -> bool {
    HEADER_WORD.is_match(line) || REFERENCE_LINE.is_match(line) || ADDRESS_FRAGMENT.is_match(line)
}

fn clean(name: &str) -> String {
    name.trim().trim_end_matches([',', ';', ':']).trim().to_string()
}
