//! VAT breakdown of a total amount.

use rust_decimal::{Decimal, RoundingStrategy};

use super::amounts::{parse_amount, round_cents};
use super::patterns::{REVERSE_CHARGE, VAT_AMOUNT, VAT_ZERO};
use crate::models::document::{VatBreakdown, VatSource};

/// German standard VAT rate in percent.
pub const STANDARD_RATE: u32 = 19;

/// Split `total` into net and VAT.
///
/// Precedence: reverse-charge wording, an explicit zero VAT amount, an
/// explicit VAT amount, and finally the 19% standard rate.
pub fn extract_vat_breakdown(text: &str, total: Decimal) -> VatBreakdown {
    if REVERSE_CHARGE.is_match(text) {
        return zero_rated(total, VatSource::ReverseCharge);
    }

    if VAT_ZERO.is_match(text) {
        return zero_rated(total, VatSource::ExplicitZero);
    }

    if let Some(breakdown) = explicit_amount(text, total) {
        return breakdown;
    }

    standard_rate(total)
}

fn zero_rated(total: Decimal, source: VatSource) -> VatBreakdown {
    VatBreakdown {
        rate: Decimal::ZERO,
        vat_amount: Decimal::ZERO,
        net_amount: total,
        source,
    }
}

fn explicit_amount(text: &str, total: Decimal) -> Option<VatBreakdown> {
    VAT_AMOUNT.captures_iter(text).find_map(|caps| {
        let vat = parse_amount(caps.get(1)?.as_str())?;
        let net = total - vat;

        // A VAT figure at or above the total cannot belong to it
        if vat >= total || net <= Decimal::ZERO {
            return None;
        }

        let rate = (vat / net * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        Some(VatBreakdown {
            rate,
            vat_amount: vat,
            net_amount: net,
            source: VatSource::ExplicitAmount,
        })
    })
}

fn standard_rate(total: Decimal) -> VatBreakdown {
    let rate = Decimal::from(STANDARD_RATE);
    let divisor = Decimal::ONE + rate / Decimal::ONE_HUNDRED;
    let net = round_cents(total / divisor);

    VatBreakdown {
        rate,
        vat_amount: round_cents(total - net),
        net_amount: net,
        source: VatSource::DefaultStandardRate,
    }
}
