//! FICA (social security + medicare) refund inputs and outcome.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::income::{IncomeDocument, clamped};

/// Inputs to the FICA refund eligibility rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaInput {
    /// Total FICA withheld: sum of box 4 and box 6 across all documents.
    pub total_fica_paid: Decimal,
    /// U.S. entry date from the visa section; absent when never collected.
    pub date_entered_us: Option<NaiveDate>,
}

impl FicaInput {
    /// Sums FICA withholding across `documents`, clamping negatives like the
    /// income aggregate does.
    pub fn from_documents(documents: &[IncomeDocument], date_entered_us: Option<NaiveDate>) -> Self {
        let mut total = Decimal::ZERO;
        for (index, document) in documents.iter().enumerate() {
            total += clamped(
                document.social_security_tax_withheld,
                index,
                "social_security_tax_withheld",
            );
            total += clamped(document.medicare_tax_withheld, index, "medicare_tax_withheld");
        }
        Self {
            total_fica_paid: total,
            date_entered_us,
        }
    }
}

/// Outcome of the FICA refund eligibility rule.
///
/// `years_since_entry` of `None` means the entry date was never collected —
/// a "not eligible, reason: missing data" state the presentation layer
/// renders differently from `Some(n)` with `n` past the exemption window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaBreakdown {
    pub total_fica: Decimal,
    pub date_entered_us: Option<NaiveDate>,
    pub years_since_entry: Option<u32>,
    pub eligible_for_refund: bool,
    /// Full `total_fica` when eligible, zero otherwise. Partial refunds are
    /// not modeled.
    pub fica_refund: Decimal,
}
