use std::collections::BTreeMap;
use std::io::Read;

use filing_core::{BracketRegistry, BracketTable, BracketTableError, RegistryError, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading bracket schedule data.
#[derive(Debug, Error)]
pub enum BracketCsvError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("no bracket records in input")]
    EmptyInput,

    #[error("invalid bracket table for tax year {tax_year}: {source}")]
    InvalidTable {
        tax_year: i32,
        source: BracketTableError,
    },

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl From<csv::Error> for BracketCsvError {
    fn from(err: csv::Error) -> Self {
        BracketCsvError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket schedule CSV file.
///
/// Columns:
/// - `tax_year`: the tax year the bracket belongs to (e.g., 2024)
/// - `lower_bound`: where the bracket starts
/// - `upper_bound`: where it ends (empty for the unbounded top bracket)
/// - `rate`: the marginal rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket schedules from CSV files.
///
/// Parsing and table construction are split so a validator can report how
/// far a bad file got: records that do not even parse, versus records that
/// parse but violate a table invariant (gap, decreasing rate, bounded top).
/// Tables come out of the same validating constructor the builtin schedules
/// use, so a CSV-loaded year is exactly as trustworthy as a compiled-in one.
pub struct BracketCsvLoader;

impl BracketCsvLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketCsvError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by tax year and build one validated table per year.
    ///
    /// Records may arrive in any order; each year's brackets are sorted by
    /// lower bound before validation.
    pub fn build_tables(records: &[BracketRecord]) -> Result<Vec<BracketTable>, BracketCsvError> {
        if records.is_empty() {
            return Err(BracketCsvError::EmptyInput);
        }

        let mut by_year: BTreeMap<i32, Vec<TaxBracket>> = BTreeMap::new();
        for record in records {
            by_year.entry(record.tax_year).or_default().push(TaxBracket {
                lower_bound: record.lower_bound,
                upper_bound: record.upper_bound,
                rate: record.rate,
            });
        }

        let mut tables = Vec::with_capacity(by_year.len());
        for (tax_year, mut brackets) in by_year {
            brackets.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));
            let table = BracketTable::new(tax_year, brackets)
                .map_err(|source| BracketCsvError::InvalidTable { tax_year, source })?;
            tables.push(table);
        }

        Ok(tables)
    }

    /// Build a ready-to-serve registry from parsed records.
    pub fn load(records: &[BracketRecord]) -> Result<BracketRegistry, BracketCsvError> {
        Ok(BracketRegistry::new(Self::build_tables(records)?)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_single_record() {
        let csv = "tax_year,lower_bound,upper_bound,rate\n2024,0,11600,0.10";

        let records = BracketCsvLoader::parse(csv.as_bytes()).expect("CSV parses");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            BracketRecord {
                tax_year: 2024,
                lower_bound: dec!(0),
                upper_bound: Some(dec!(11600)),
                rate: dec!(0.10),
            }
        );
    }

    #[test]
    fn parse_empty_upper_bound_as_unbounded() {
        let csv = "tax_year,lower_bound,upper_bound,rate\n2024,609350,,0.37";

        let records = BracketCsvLoader::parse(csv.as_bytes()).expect("CSV parses");

        assert_eq!(records[0].upper_bound, None);
        assert_eq!(records[0].rate, dec!(0.37));
    }

    #[test]
    fn parse_rejects_malformed_amounts() {
        let csv = "tax_year,lower_bound,upper_bound,rate\n2024,abc,11600,0.10";

        let result = BracketCsvLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(BracketCsvError::CsvParse(_))));
    }

    #[test]
    fn build_tables_sorts_unordered_records() {
        let records = vec![
            BracketRecord {
                tax_year: 2024,
                lower_bound: dec!(11600),
                upper_bound: None,
                rate: dec!(0.12),
            },
            BracketRecord {
                tax_year: 2024,
                lower_bound: dec!(0),
                upper_bound: Some(dec!(11600)),
                rate: dec!(0.10),
            },
        ];

        let tables = BracketCsvLoader::build_tables(&records).expect("table builds");

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].brackets()[0].lower_bound, dec!(0));
        assert_eq!(tables[0].brackets()[1].upper_bound, None);
    }

    #[test]
    fn build_tables_rejects_empty_input() {
        let result = BracketCsvLoader::build_tables(&[]);

        assert!(matches!(result, Err(BracketCsvError::EmptyInput)));
    }

    #[test]
    fn build_tables_names_the_year_of_an_invalid_table() {
        let records = vec![
            BracketRecord {
                tax_year: 2024,
                lower_bound: dec!(0),
                upper_bound: Some(dec!(11600)),
                rate: dec!(0.10),
            },
            BracketRecord {
                tax_year: 2024,
                lower_bound: dec!(12000),
                upper_bound: None,
                rate: dec!(0.12),
            },
        ];

        let result = BracketCsvLoader::build_tables(&records);

        assert!(matches!(
            result,
            Err(BracketCsvError::InvalidTable {
                tax_year: 2024,
                source: BracketTableError::Gap { .. },
            })
        ));
    }
}
