//! State-and-local-tax (SALT) deduction cap.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deductible portion of state tax after the cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaltDeduction {
    pub deductible: Decimal,
    /// Set only when the cap actually reduced the deduction; exactly at the
    /// cap is not capped.
    pub capped: bool,
}

fn salt_cap() -> Decimal {
    Decimal::new(10_000, 0)
}

/// Caps the deductible state tax at 10 000.
pub fn apply_salt_cap(total_state_tax: Decimal) -> SaltDeduction {
    let cap = salt_cap();
    SaltDeduction {
        deductible: total_state_tax.min(cap),
        capped: total_state_tax > cap,
    }
}
