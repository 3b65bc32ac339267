//! Composition of the engine: aggregation, deduction, brackets, FICA, net.
//!
//! # Pipeline
//!
//! | Step | Computation |
//! |------|-------------|
//! | 1    | SALT cap over aggregated state tax withheld |
//! | 2    | Taxable income: wages minus deductible state tax, floored at 0 |
//! | 3    | Bracket lookup for the filing year (effective year surfaced) |
//! | 4    | Progressive tax over the bracket schedule |
//! | 5    | Tax owed: calculated tax minus federal withholding |
//! | 6    | FICA refund eligibility against December 31 of the filing year |
//! | 7    | Net amount: tax owed minus FICA refund (negative = refund) |
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use filing_core::{BracketRegistry, FilingData, IncomeDocument, IncomeDocumentKind, TaxCalculator};
//!
//! let registry = BracketRegistry::builtin();
//! let calculator = TaxCalculator::new(&registry);
//!
//! let filing = FilingData {
//!     tax_year: 2024,
//!     documents: Some(vec![IncomeDocument {
//!         kind: IncomeDocumentKind::W2,
//!         wages: dec!(50000),
//!         federal_tax_withheld: dec!(4000),
//!         social_security_tax_withheld: dec!(2565),
//!         medicare_tax_withheld: dec!(435),
//!         state_wages: dec!(50000),
//!         state_tax_withheld: dec!(12000),
//!     }]),
//!     date_entered_us: NaiveDate::from_ymd_opt(2021, 12, 31),
//! };
//!
//! let result = calculator.calculate(&filing).unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(40000.00));
//! assert_eq!(result.calculated_tax, dec!(4568.00));
//! assert_eq!(result.net_amount, dec!(-2432.00));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::brackets::BracketRegistry;
use crate::calculations::common::round_half_up;
use crate::calculations::progressive::calculate_tax;
use crate::calculations::residency::{end_of_year, evaluate_fica_eligibility};
use crate::calculations::salt::apply_salt_cap;
use crate::models::{
    BracketRange, CalculationBreakdown, FicaInput, FilingData, IncomeAggregate,
    TaxCalculationResult,
};

/// Errors that can end a calculation request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxCalculationError {
    /// The income section was never completed. Distinct from a completed
    /// section with zero documents, which computes a legitimate zero-income
    /// result.
    #[error("no income documents collected for tax year {0}")]
    MissingIncomeData(i32),
}

/// The tax calculation engine, borrowing its bracket registry.
///
/// Stateless beyond the borrowed registry; safe to share across threads and
/// to call concurrently with unrelated requests.
#[derive(Debug, Clone, Copy)]
pub struct TaxCalculator<'a> {
    registry: &'a BracketRegistry,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(registry: &'a BracketRegistry) -> Self {
        Self { registry }
    }

    /// Runs the full pipeline over collected filing data.
    ///
    /// # Errors
    ///
    /// [`TaxCalculationError::MissingIncomeData`] when `filing.documents` is
    /// absent — tax on never-collected income must not silently read as tax
    /// on zero income.
    pub fn calculate(
        &self,
        filing: &FilingData,
    ) -> Result<TaxCalculationResult, TaxCalculationError> {
        let documents = filing
            .documents
            .as_deref()
            .ok_or(TaxCalculationError::MissingIncomeData(filing.tax_year))?;

        let aggregate = IncomeAggregate::from_documents(documents);
        let fica_input = FicaInput::from_documents(documents, filing.date_entered_us);

        Ok(self.calculate_from_aggregate(&aggregate, &fica_input, filing.tax_year))
    }

    /// Runs the pipeline over pre-aggregated sums, the input contract for
    /// callers that aggregate elsewhere. Infallible: the aggregate's
    /// existence already answers the missing-data question.
    pub fn calculate_from_aggregate(
        &self,
        aggregate: &IncomeAggregate,
        fica_input: &FicaInput,
        tax_year: i32,
    ) -> TaxCalculationResult {
        let state_deduction = apply_salt_cap(aggregate.total_state_tax_withheld);

        let taxable_income = round_half_up(aggregate.total_wages - state_deduction.deductible)
            .max(Decimal::ZERO);

        let lookup = self.registry.get(tax_year);
        let calculated_tax = calculate_tax(taxable_income, lookup.table);
        let tax_owed = calculated_tax - aggregate.total_federal_tax_withheld;

        let fica = evaluate_fica_eligibility(fica_input, end_of_year(tax_year));
        let net_amount = tax_owed - fica.fica_refund;

        let bracket = lookup.table.bracket_for(taxable_income);

        debug!(
            tax_year,
            effective_year = lookup.effective_year,
            %taxable_income,
            %calculated_tax,
            %net_amount,
            "tax calculation composed"
        );

        TaxCalculationResult {
            tax_year,
            effective_tax_year: lookup.effective_year,
            taxable_income,
            tax_bracket_label: bracket.label(),
            bracket_range: BracketRange::from(bracket),
            calculated_tax,
            total_federal_withheld: aggregate.total_federal_tax_withheld,
            tax_owed,
            fica,
            net_amount,
            breakdown: CalculationBreakdown {
                total_wages: aggregate.total_wages,
                total_state_wages: aggregate.total_state_wages,
                total_state_tax_withheld: aggregate.total_state_tax_withheld,
                salt_deduction: state_deduction.deductible,
                salt_capped: state_deduction.capped,
            },
        }
    }
}
