mod bracket;
mod fica;
mod income;
mod result;

pub use bracket::{BracketTable, BracketTableError, TaxBracket};
pub use fica::{FicaBreakdown, FicaInput};
pub use income::{FilingData, IncomeAggregate, IncomeDocument, IncomeDocumentKind};
pub use result::{BracketRange, CalculationBreakdown, TaxCalculationResult};
