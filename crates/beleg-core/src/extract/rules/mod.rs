//! Rule-based field extractors for receipts and invoices.

pub mod amounts;
pub mod company;
pub mod dates;
pub mod invoice_number;
pub mod patterns;
pub mod vat;
pub mod vendor;

pub use amounts::{
    extract_total, parse_amount, round_cents, AmountCandidate, AmountExtractor, AmountKind,
    AmountSelector, MaxAmountSelector,
};
pub use company::extract_company_details;
pub use dates::{extract_due_date, extract_issue_date, parse_date};
pub use invoice_number::extract_invoice_number;
pub use vat::extract_vat_breakdown;
pub use vendor::{extract_vendor, VendorRule, VENDOR_RULES};
