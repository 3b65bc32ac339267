//! The calculation result returned to the presentation layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bracket::TaxBracket;
use super::fica::FicaBreakdown;

/// The numeric range of the bracket a taxable income landed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRange {
    pub lower_bound: Decimal,
    /// `None` for the unbounded top bracket.
    pub upper_bound: Option<Decimal>,
}

impl From<&TaxBracket> for BracketRange {
    fn from(bracket: &TaxBracket) -> Self {
        Self {
            lower_bound: bracket.lower_bound,
            upper_bound: bracket.upper_bound,
        }
    }
}

/// Line items behind the headline numbers, for rendering the "how we got
/// here" view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationBreakdown {
    pub total_wages: Decimal,
    pub total_state_wages: Decimal,
    pub total_state_tax_withheld: Decimal,
    /// State tax actually deducted from wages after the SALT cap.
    pub salt_deduction: Decimal,
    /// Whether the SALT cap reduced the deduction.
    pub salt_capped: bool,
}

/// The sole externally visible output of the engine.
///
/// A fresh value object per request; nothing here is cached or mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    /// The year the caller asked for.
    pub tax_year: i32,
    /// The year whose bracket schedule was actually applied. Differs from
    /// `tax_year` only when the registry fell back to another year's table.
    pub effective_tax_year: i32,
    pub taxable_income: Decimal,
    /// Marginal-rate label of the bracket containing `taxable_income`,
    /// e.g. `"22%"`.
    pub tax_bracket_label: String,
    pub bracket_range: BracketRange,
    pub calculated_tax: Decimal,
    pub total_federal_withheld: Decimal,
    /// `calculated_tax - total_federal_withheld`; negative means federal
    /// withholding alone already overshoots the liability.
    pub tax_owed: Decimal,
    pub fica: FicaBreakdown,
    /// `tax_owed - fica.fica_refund`. Negative is a refund to the filer,
    /// positive an amount owed.
    pub net_amount: Decimal,
    pub breakdown: CalculationBreakdown,
}
