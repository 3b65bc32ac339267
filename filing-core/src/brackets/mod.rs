//! Year-versioned bracket schedules and the registry that serves them.

mod registry;
mod tables;

pub use registry::{BracketRegistry, RegistryError, TableLookup};
