//! FICA refund eligibility for temporary visa holders.
//!
//! Filers are exempt from FICA for a limited window after entering the U.S.
//! and can reclaim what was withheld while the window is open. The window is
//! measured in whole years between the entry date and the fixed tax-year-end
//! cutoff — never against the wall clock, so a calculation replayed later
//! gives the same answer.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{FicaBreakdown, FicaInput};

/// Years since entry beyond which the refund window closes.
pub const FICA_EXEMPT_YEARS: u32 = 5;

/// December 31 of the filing year. Out-of-range years saturate instead of
/// panicking.
pub fn end_of_year(tax_year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(tax_year, 12, 31).unwrap_or(if tax_year > 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Whole years between `entry` and `as_of`, counting a partial year in
/// progress as a full year: the smallest `n >= 0` with
/// `entry + n years >= as_of`.
///
/// This is the only reading consistent with the refund rule's boundary
/// behavior — exactly five years to the day stays eligible, five years and
/// one day does not — and it matches the IRS any-part-of-a-year convention
/// for exempt individuals. A Feb 29 entry clamps to Feb 28 in common years.
fn years_since_entry(entry: NaiveDate, as_of: NaiveDate) -> u32 {
    if entry >= as_of {
        return 0;
    }

    let span = (as_of.year() - entry.year()).max(0) as u32;
    let anniversary = entry
        .checked_add_months(Months::new(span * 12))
        .unwrap_or(NaiveDate::MAX);

    if anniversary >= as_of { span } else { span + 1 }
}

/// Applies the refund eligibility rule against the fixed year-end cutoff.
///
/// A missing entry date yields `years_since_entry: None` and no refund —
/// "not eligible, reason: missing data", which callers can tell apart from
/// an entry date past the exemption window. When eligible, the refund is
/// the full FICA amount paid; partial refunds are not modeled.
pub fn evaluate_fica_eligibility(input: &FicaInput, tax_year_end: NaiveDate) -> FicaBreakdown {
    let years_since_entry = input
        .date_entered_us
        .map(|entry| years_since_entry(entry, tax_year_end));
    let eligible_for_refund = matches!(years_since_entry, Some(n) if n <= FICA_EXEMPT_YEARS);
    let fica_refund = if eligible_for_refund {
        input.total_fica_paid
    } else {
        Decimal::ZERO
    };

    FicaBreakdown {
        total_fica: input.total_fica_paid,
        date_entered_us: input.date_entered_us,
        years_since_entry,
        eligible_for_refund,
        fica_refund,
    }
}
