//! The tax calculation engine proper.
//!
//! Pure functions plus the [`TaxCalculator`] orchestrator that composes
//! them. Nothing here touches a clock, performs I/O, or keeps state between
//! calls; every entry point is reentrant and safe to run concurrently.

pub mod common;
pub mod orchestrator;
pub mod progressive;
pub mod residency;
pub mod salt;

pub use orchestrator::{TaxCalculationError, TaxCalculator};
pub use progressive::calculate_tax;
pub use residency::{end_of_year, evaluate_fica_eligibility};
pub use salt::{SaltDeduction, apply_salt_cap};
