//! Income documents and the aggregate the engine computes from them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The kind of income document a set of box values was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeDocumentKind {
    #[serde(rename = "w2")]
    W2,
    #[serde(rename = "1099")]
    Form1099,
    #[serde(rename = "1042s")]
    Form1042S,
}

/// Parsed numeric fields of one income document.
///
/// Field names follow the W-2 box layout; 1099 and 1042-S values are mapped
/// into the same slots upstream. Amounts here are raw caller input — the
/// aggregation step owns clamping, not this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeDocument {
    pub kind: IncomeDocumentKind,
    /// Box 1: wages, tips, other compensation.
    pub wages: Decimal,
    /// Box 2: federal income tax withheld.
    pub federal_tax_withheld: Decimal,
    /// Box 4: social security tax withheld.
    pub social_security_tax_withheld: Decimal,
    /// Box 6: medicare tax withheld.
    pub medicare_tax_withheld: Decimal,
    /// Box 16: state wages.
    pub state_wages: Decimal,
    /// Box 17: state income tax withheld.
    pub state_tax_withheld: Decimal,
}

/// Sums across all income documents of one filing.
///
/// Every field is non-negative: negative document values are a defect in the
/// collecting caller and are clamped to zero during aggregation rather than
/// rejected. Zero documents produce the zero aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeAggregate {
    pub total_wages: Decimal,
    pub total_state_wages: Decimal,
    pub total_state_tax_withheld: Decimal,
    pub total_federal_tax_withheld: Decimal,
}

impl IncomeAggregate {
    /// Sums the four engine-relevant fields across `documents`.
    pub fn from_documents(documents: &[IncomeDocument]) -> Self {
        let mut aggregate = Self::default();
        for (index, document) in documents.iter().enumerate() {
            aggregate.total_wages += clamped(document.wages, index, "wages");
            aggregate.total_state_wages += clamped(document.state_wages, index, "state_wages");
            aggregate.total_state_tax_withheld +=
                clamped(document.state_tax_withheld, index, "state_tax_withheld");
            aggregate.total_federal_tax_withheld +=
                clamped(document.federal_tax_withheld, index, "federal_tax_withheld");
        }
        aggregate
    }
}

/// Clamps a document field at zero, logging the caller defect.
pub(crate) fn clamped(value: Decimal, document_index: usize, field: &'static str) -> Decimal {
    if value < Decimal::ZERO {
        warn!(document_index, field, %value, "negative document value clamped to zero");
        Decimal::ZERO
    } else {
        value
    }
}

/// Everything one calculation request needs, as collected by the wizard.
///
/// `documents` distinguishes two states the aggregate alone cannot:
/// `None` means the income section was never completed, `Some(vec![])` means
/// it was completed with no documents (a legitimate zero-income filing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingData {
    pub tax_year: i32,
    pub documents: Option<Vec<IncomeDocument>>,
    pub date_entered_us: Option<NaiveDate>,
}
