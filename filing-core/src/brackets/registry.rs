//! Immutable year-to-table registry.
//!
//! Built once at process start and passed by reference into the calculator,
//! so tests can inject synthetic tables and concurrent readers share one
//! set of schedules without synchronization. Hot-reloading a new year means
//! building a fresh registry and swapping the reference, never mutating a
//! table in place.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::warn;

use super::tables::builtin_tables;
use crate::models::BracketTable;

/// Errors raised when assembling a registry from caller-supplied tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("bracket registry requires at least one table")]
    Empty,

    #[error("more than one bracket table supplied for tax year {0}")]
    DuplicateYear(i32),
}

/// A bracket-table lookup outcome.
///
/// `effective_year` is the year whose schedule will actually be applied.
/// Callers must surface it whenever `is_fallback` is set — silently
/// substituting another year's brackets changes the answer.
#[derive(Debug, Clone, Copy)]
pub struct TableLookup<'a> {
    pub table: &'a BracketTable,
    pub effective_year: i32,
    pub is_fallback: bool,
}

/// Immutable map from tax year to its validated bracket schedule.
#[derive(Debug, Clone)]
pub struct BracketRegistry {
    tables: BTreeMap<i32, BracketTable>,
}

impl BracketRegistry {
    /// Registry over the builtin federal schedules.
    pub fn builtin() -> Self {
        Self {
            tables: builtin_tables()
                .into_iter()
                .map(|table| (table.tax_year(), table))
                .collect(),
        }
    }

    /// Registry over caller-supplied tables, e.g. CSV-loaded schedules or
    /// synthetic test fixtures.
    pub fn new(tables: Vec<BracketTable>) -> Result<Self, RegistryError> {
        if tables.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut by_year = BTreeMap::new();
        for table in tables {
            let year = table.tax_year();
            if by_year.insert(year, table).is_some() {
                return Err(RegistryError::DuplicateYear(year));
            }
        }

        Ok(Self { tables: by_year })
    }

    /// Tax years with a schedule of their own, ascending.
    pub fn supported_years(&self) -> Vec<i32> {
        self.tables.keys().copied().collect()
    }

    /// Looks up the schedule for `tax_year`. Never fails.
    ///
    /// An unsupported year falls back to the most recent supported year at
    /// or below the request, or to the earliest table for years before
    /// coverage. The fallback is logged and reported through
    /// [`TableLookup::effective_year`] rather than hidden.
    pub fn get(&self, tax_year: i32) -> TableLookup<'_> {
        if let Some(table) = self.tables.get(&tax_year) {
            return TableLookup {
                table,
                effective_year: tax_year,
                is_fallback: false,
            };
        }

        let (&effective_year, table) = self
            .tables
            .range(..=tax_year)
            .next_back()
            .or_else(|| self.tables.first_key_value())
            .expect("registry always holds at least one table");

        warn!(
            requested_year = tax_year,
            effective_year, "no bracket table for requested year, falling back"
        );

        TableLookup {
            table,
            effective_year,
            is_fallback: true,
        }
    }
}

impl Default for BracketRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::TaxBracket;

    fn flat_table(tax_year: i32) -> BracketTable {
        BracketTable::new(
            tax_year,
            vec![TaxBracket {
                lower_bound: dec!(0),
                upper_bound: None,
                rate: dec!(0.10),
            }],
        )
        .expect("table is valid")
    }

    #[test]
    fn new_rejects_empty_table_set() {
        let result = BracketRegistry::new(vec![]);

        assert!(matches!(result, Err(RegistryError::Empty)));
    }

    #[test]
    fn new_rejects_duplicate_years() {
        let result = BracketRegistry::new(vec![flat_table(2024), flat_table(2024)]);

        assert!(matches!(result, Err(RegistryError::DuplicateYear(2024))));
    }

    #[test]
    fn get_returns_exact_year_without_fallback() {
        let registry = BracketRegistry::builtin();

        let lookup = registry.get(2024);

        assert_eq!(lookup.effective_year, 2024);
        assert!(!lookup.is_fallback);
        assert_eq!(lookup.table.tax_year(), 2024);
    }

    #[test]
    fn get_falls_back_to_most_recent_year_at_or_below() {
        let registry = BracketRegistry::builtin();

        let lookup = registry.get(2030);

        assert_eq!(lookup.effective_year, 2025);
        assert!(lookup.is_fallback);
    }

    #[test]
    fn get_falls_back_to_earliest_table_before_coverage() {
        let registry = BracketRegistry::builtin();

        let lookup = registry.get(2019);

        assert_eq!(lookup.effective_year, 2023);
        assert!(lookup.is_fallback);
    }

    #[test]
    fn get_serves_injected_synthetic_tables() {
        let registry =
            BracketRegistry::new(vec![flat_table(2022)]).expect("registry builds");

        let lookup = registry.get(2022);

        assert_eq!(lookup.table.brackets()[0].rate, dec!(0.10));
        assert!(!lookup.is_fallback);
    }

    #[test]
    fn builtin_supports_three_consecutive_years() {
        let registry = BracketRegistry::builtin();

        assert_eq!(registry.supported_years(), vec![2023, 2024, 2025]);
    }
}
