//! Builtin federal single-filer bracket schedules.
//!
//! One schedule per supported tax year, straight from the IRS rate tables.
//! New years are normally shipped as CSV through the data loader; these
//! constants are the floor the engine can always fall back to.

use rust_decimal::Decimal;

use crate::models::{BracketTable, TaxBracket};

/// (lower bound, upper bound, marginal rate in hundredths).
type Row = (i64, Option<i64>, i64);

const SCHEDULE_2023: [Row; 7] = [
    (0, Some(11_000), 10),
    (11_000, Some(44_725), 12),
    (44_725, Some(95_375), 22),
    (95_375, Some(182_100), 24),
    (182_100, Some(231_250), 32),
    (231_250, Some(578_125), 35),
    (578_125, None, 37),
];

const SCHEDULE_2024: [Row; 7] = [
    (0, Some(11_600), 10),
    (11_600, Some(47_150), 12),
    (47_150, Some(100_525), 22),
    (100_525, Some(191_950), 24),
    (191_950, Some(243_725), 32),
    (243_725, Some(609_350), 35),
    (609_350, None, 37),
];

const SCHEDULE_2025: [Row; 7] = [
    (0, Some(11_925), 10),
    (11_925, Some(48_475), 12),
    (48_475, Some(103_350), 22),
    (103_350, Some(197_300), 24),
    (197_300, Some(250_525), 32),
    (250_525, Some(626_350), 35),
    (626_350, None, 37),
];

fn schedule(tax_year: i32, rows: &[Row]) -> BracketTable {
    let brackets = rows
        .iter()
        .map(|&(lower, upper, rate)| TaxBracket {
            lower_bound: Decimal::from(lower),
            upper_bound: upper.map(Decimal::from),
            rate: Decimal::new(rate, 2),
        })
        .collect();

    BracketTable::new(tax_year, brackets).expect("builtin bracket schedule is valid")
}

pub(crate) fn builtin_tables() -> Vec<BracketTable> {
    vec![
        schedule(2023, &SCHEDULE_2023),
        schedule(2024, &SCHEDULE_2024),
        schedule(2025, &SCHEDULE_2025),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn builtin_tables_cover_three_years() {
        let years: Vec<i32> = builtin_tables().iter().map(BracketTable::tax_year).collect();

        assert_eq!(years, vec![2023, 2024, 2025]);
    }

    #[test]
    fn builtin_tables_all_pass_validation() {
        // schedule() would have panicked otherwise; spot-check a boundary.
        let tables = builtin_tables();
        let table_2024 = &tables[1];

        assert_eq!(table_2024.brackets().len(), 7);
        assert_eq!(table_2024.brackets()[2].lower_bound, dec!(47150));
        assert_eq!(table_2024.brackets()[2].rate, dec!(0.22));
        assert_eq!(table_2024.brackets()[6].upper_bound, None);
    }
}
