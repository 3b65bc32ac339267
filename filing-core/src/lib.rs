pub mod brackets;
pub mod calculations;
pub mod models;

pub use brackets::{BracketRegistry, RegistryError, TableLookup};
pub use calculations::{
    SaltDeduction, TaxCalculationError, TaxCalculator, apply_salt_cap, calculate_tax, end_of_year,
    evaluate_fica_eligibility,
};
pub use models::*;
