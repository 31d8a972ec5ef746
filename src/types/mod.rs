//! Types module
//!
//! Contains core data structures used throughout the crate.
//! This module organizes types into logical submodules:
//! - `member`: group members and their identifiers
//! - `expense`: expenses, splits, and the split-strategy enums
//! - `settlement`: derived payment instructions
//! - `error`: error types for the trip ledger
//!
//! It also hosts the shared floating-tolerance constants. Equal and
//! percentage splits divide at full `Decimal` precision, so split sums can
//! miss their target by a sub-cent remainder; every sum check in the crate
//! absorbs that remainder through these two constants rather than demanding
//! exact equality. They are deliberately defined once so the split builder
//! and the settlement engine cannot drift apart.

pub mod error;
pub mod expense;
pub mod member;
pub mod settlement;

pub use error::LedgerError;
pub use expense::{Expense, ExpenseCategory, ExpenseId, Split, SplitType};
pub use member::{Member, MemberId};
pub use settlement::Settlement;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer};

/// Tolerance for currency-amount comparisons, in currency units
///
/// Split sums, balance dead-zones, and settlement emission all treat
/// differences at or below one cent as zero.
pub const AMOUNT_EPSILON: Decimal = dec!(0.01);

/// Tolerance for percentage comparisons, in percentage points
///
/// Active percentages must reach 100 within this tolerance; it is wider than
/// [`AMOUNT_EPSILON`] because fair shares are rounded to two decimal places
/// (three members get 33.33% each, summing to 99.99).
pub const PERCENT_EPSILON: Decimal = dec!(0.1);

/// Deserialize an opaque id that may arrive as a JSON string or number
///
/// The remote store is inconsistent about id representation across
/// endpoints; both forms normalize to a string.
pub(crate) fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
