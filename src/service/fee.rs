//! Administrative fee computation.
//!
//! The fee charges a partial amount for the month an entry is created in and
//! a flat amount per full month of granted validity. Entries created late in
//! the month are not charged for it at all; their first full month starts
//! with the following one.

use chrono::{Datelike, NaiveDateTime};

use crate::error::entry::ValidationError;

/// Charge per full month of validity.
const FULL_MONTH_FEE: i32 = 10;

/// Lowest admissible fee.
pub const FEE_MIN: i32 = 0;
/// Highest admissible fee.
pub const FEE_MAX: i32 = 999;

/// Computes the administrative fee for an entry.
///
/// The partial-month charge depends on the day of month of `created_at`:
/// day 1-10 charges the full 10, day 11-25 charges 5, and later days are
/// free. On top of that, every full month until `valid_until` charges 10.
/// Deterministic and non-negative for all input pairs.
pub fn compute_fee(created_at: NaiveDateTime, valid_until: NaiveDateTime) -> i32 {
    let day = created_at.day();

    let partial_charge = if day <= 10 {
        10
    } else if day <= 25 {
        5
    } else {
        0
    };

    // Entries created after the 25th skip their creation month entirely.
    let start_month_bump = if day > 25 { 1 } else { 0 };

    let start_month_index = created_at.year() * 12 + created_at.month0() as i32 + start_month_bump;
    let end_month_index = valid_until.year() * 12 + valid_until.month0() as i32;

    let full_months = (end_month_index - start_month_index).max(0);

    partial_charge + full_months * FULL_MONTH_FEE
}

/// Checks a fee against the admissible range.
///
/// Applied to manually supplied fees and to auto-computed ones alike, so a
/// validity period long enough to push the computed fee past the bound is
/// rejected instead of silently stored.
pub fn validate_fee(fee: i32) -> Result<(), ValidationError> {
    if (FEE_MIN..=FEE_MAX).contains(&fee) {
        Ok(())
    } else {
        Err(ValidationError::FeeOutOfRange(fee))
    }
}
