//! Marginal-rate taxation across a bracket schedule.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::models::BracketTable;

/// Computes the liability for `taxable_income` under `table`.
///
/// Each bracket taxes only the slice of income inside its own
/// `[lower, min(upper, income))` interval; an income exactly at a bracket's
/// upper bound is therefore taxed entirely at that bracket's rate. The sum
/// is rounded half-up to two places once at the end, not per bracket, so
/// rounding never drifts with the number of brackets crossed.
///
/// Zero or negative input yields zero. Never errors; negative amounts are a
/// caller defect already clamped upstream, and are answered with zero here
/// too when hit directly.
pub fn calculate_tax(taxable_income: Decimal, table: &BracketTable) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut total = Decimal::ZERO;
    for bracket in table.brackets() {
        if bracket.lower_bound >= taxable_income {
            break;
        }

        let slice_top = match bracket.upper_bound {
            Some(upper) => upper.min(taxable_income),
            None => taxable_income,
        };
        total += (slice_top - bracket.lower_bound) * bracket.rate;

        if slice_top == taxable_income {
            break;
        }
    }

    round_half_up(total)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::TaxBracket;

    fn bracket(lower: Decimal, upper: Option<Decimal>, rate: Decimal) -> TaxBracket {
        TaxBracket {
            lower_bound: lower,
            upper_bound: upper,
            rate,
        }
    }

    fn table_2024() -> BracketTable {
        BracketTable::new(
            2024,
            vec![
                bracket(dec!(0), Some(dec!(11600)), dec!(0.10)),
                bracket(dec!(11600), Some(dec!(47150)), dec!(0.12)),
                bracket(dec!(47150), None, dec!(0.22)),
            ],
        )
        .expect("table is valid")
    }

    #[test]
    fn zero_income_owes_zero() {
        assert_eq!(calculate_tax(dec!(0), &table_2024()), dec!(0));
    }

    #[test]
    fn negative_income_owes_zero_without_panicking() {
        assert_eq!(calculate_tax(dec!(-1000), &table_2024()), dec!(0));
    }

    #[test]
    fn income_within_first_bracket_taxed_at_first_rate() {
        // 10000 * 0.10
        assert_eq!(calculate_tax(dec!(10000), &table_2024()), dec!(1000.00));
    }

    #[test]
    fn income_at_bracket_boundary_taxed_entirely_at_lower_rate() {
        // Exactly the first upper bound: no 12% slice exists yet.
        assert_eq!(calculate_tax(dec!(11600), &table_2024()), dec!(1160.00));
    }

    #[test]
    fn one_unit_past_boundary_adds_one_unit_at_next_rate() {
        // 1160 + 1 * 0.12
        assert_eq!(calculate_tax(dec!(11601), &table_2024()), dec!(1160.12));
    }

    #[test]
    fn income_spanning_two_brackets_sums_marginal_slices() {
        // 11600 * 0.10 + (40000 - 11600) * 0.12 = 1160 + 3408
        assert_eq!(calculate_tax(dec!(40000), &table_2024()), dec!(4568.00));
    }

    #[test]
    fn income_reaching_top_bracket_uses_unbounded_slice() {
        // 1160 + 35550 * 0.12 + (100000 - 47150) * 0.22 = 1160 + 4266 + 11627
        assert_eq!(calculate_tax(dec!(100000), &table_2024()), dec!(17053.00));
    }

    #[test]
    fn tax_is_monotone_in_income() {
        let table = table_2024();
        let incomes = [
            dec!(0),
            dec!(500),
            dec!(11599),
            dec!(11600),
            dec!(11601),
            dec!(47150),
            dec!(90000),
            dec!(250000),
        ];

        let taxes: Vec<Decimal> = incomes
            .iter()
            .map(|&income| calculate_tax(income, &table))
            .collect();

        assert!(taxes.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn rounding_happens_once_at_the_end() {
        // Each slice alone is 1.005 and would round to 1.01; the true sum
        // 2.010 must not become 2.02.
        let table = BracketTable::new(
            2024,
            vec![
                bracket(dec!(0), Some(dec!(10)), dec!(0.1005)),
                bracket(dec!(10), None, dec!(0.1005)),
            ],
        )
        .expect("table is valid");

        assert_eq!(calculate_tax(dec!(20), &table), dec!(2.01));
    }
}
