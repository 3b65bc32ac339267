//! Progressive tax bracket tables.
//!
//! A [`BracketTable`] is an ordered, immutable set of marginal-rate brackets
//! covering all income from zero upward. Tables are validated on
//! construction; every consumer downstream can rely on the invariants
//! without re-checking them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One marginal-rate bracket of a progressive schedule.
///
/// The bracket applies to income in the half-open interval
/// `[lower_bound, upper_bound)`. `upper_bound` of `None` marks the top
/// bracket, which is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    /// Whether `income` falls inside this bracket's half-open interval.
    ///
    /// An amount exactly equal to `upper_bound` belongs to the next bracket
    /// up, not this one.
    pub fn contains(&self, income: Decimal) -> bool {
        income >= self.lower_bound && self.upper_bound.is_none_or(|upper| income < upper)
    }

    /// Human-readable marginal-rate label, e.g. `"22%"`.
    pub fn label(&self) -> String {
        format!("{}%", (self.rate * Decimal::ONE_HUNDRED).normalize())
    }
}

/// Errors raised when a bracket table violates a structural invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table must contain at least one bracket")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    FirstLowerBound(Decimal),

    #[error("bracket starting at {lower} has upper bound {upper} at or below it")]
    InvertedBounds { lower: Decimal, upper: Decimal },

    #[error("only the top bracket may be unbounded, found unbounded bracket starting at {0}")]
    UnboundedBelowTop(Decimal),

    #[error("top bracket must be unbounded, found upper bound {0}")]
    BoundedTop(Decimal),

    #[error("bracket starting at {found} does not begin at previous upper bound {expected}")]
    Gap { expected: Decimal, found: Decimal },

    #[error("bracket rate must be non-negative, got {0}")]
    NegativeRate(Decimal),

    #[error("bracket rate {next} is below preceding rate {previous}")]
    RateDecrease { previous: Decimal, next: Decimal },
}

/// A validated progressive bracket schedule for one tax year.
///
/// Invariants, enforced by [`BracketTable::new`]:
/// - at least one bracket, ordered by lower bound;
/// - the first bracket starts at 0 and the last is unbounded, so the table
///   covers `[0, ∞)` with no gaps;
/// - each bracket's upper bound equals the next bracket's lower bound;
/// - rates are non-negative and non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    tax_year: i32,
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a table after checking every structural invariant.
    ///
    /// Brackets must already be sorted by `lower_bound`; callers assembling
    /// tables from unordered sources sort before constructing.
    pub fn new(tax_year: i32, brackets: Vec<TaxBracket>) -> Result<Self, BracketTableError> {
        let Some(first) = brackets.first() else {
            return Err(BracketTableError::Empty);
        };
        if first.lower_bound != Decimal::ZERO {
            return Err(BracketTableError::FirstLowerBound(first.lower_bound));
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO {
                return Err(BracketTableError::NegativeRate(bracket.rate));
            }

            let is_top = index == brackets.len() - 1;
            match (bracket.upper_bound, is_top) {
                (Some(upper), true) => return Err(BracketTableError::BoundedTop(upper)),
                (None, false) => {
                    return Err(BracketTableError::UnboundedBelowTop(bracket.lower_bound));
                }
                (Some(upper), false) if upper <= bracket.lower_bound => {
                    return Err(BracketTableError::InvertedBounds {
                        lower: bracket.lower_bound,
                        upper,
                    });
                }
                _ => {}
            }

            if let Some(next) = brackets.get(index + 1) {
                // upper_bound is Some here; the unbounded-below-top arm above
                // has already rejected the None case.
                let expected = bracket.upper_bound.unwrap_or_default();
                if next.lower_bound != expected {
                    return Err(BracketTableError::Gap {
                        expected,
                        found: next.lower_bound,
                    });
                }
                if next.rate < bracket.rate {
                    return Err(BracketTableError::RateDecrease {
                        previous: bracket.rate,
                        next: next.rate,
                    });
                }
            }
        }

        Ok(Self { tax_year, brackets })
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The bracket whose `[lower, upper)` interval contains `income`.
    ///
    /// Negative amounts are treated as zero and land in the first bracket.
    /// Total coverage of `[0, ∞)` guarantees a match for everything else.
    pub fn bracket_for(&self, income: Decimal) -> &TaxBracket {
        let income = income.max(Decimal::ZERO);
        self.brackets
            .iter()
            .find(|bracket| bracket.contains(income))
            .unwrap_or(&self.brackets[self.brackets.len() - 1])
    }
}
