pub mod loader;

pub use loader::{BracketCsvError, BracketCsvLoader, BracketRecord};
