//! Expense-related types for the trip ledger
//!
//! This module defines the Expense record as fetched from the remote store,
//! together with the per-member Split entries and the enums describing how
//! splits were derived.

use super::member::MemberId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque expense identifier
///
/// Assigned by the remote store on creation. Before confirmation a
/// temporary clock-based id may stand in (see [`crate::api::temp_expense_id`]).
pub type ExpenseId = String;

/// Split strategies supported by the ledger
///
/// Each variant determines how an expense's splits were derived and which
/// validation rule applies to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    /// Total divided evenly among the selected participants
    Equal,

    /// Each participant owes a user-entered percentage of the total
    ///
    /// Active percentages must sum to 100 within [`super::PERCENT_EPSILON`].
    Percentage,

    /// Each participant owes a user-entered currency amount
    ///
    /// Active amounts must sum to the total within [`super::AMOUNT_EPSILON`].
    Custom,
}

impl SplitType {
    /// Human-readable label used in validation messages
    pub fn label(&self) -> &'static str {
        match self {
            SplitType::Equal => "equal",
            SplitType::Percentage => "percentage",
            SplitType::Custom => "custom",
        }
    }
}

/// Expense categories
///
/// Purely descriptive; no ledger behavior depends on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Accommodation,
    Activities,
    Shopping,
    Other,
}

/// One member's share of an expense
///
/// Order within an expense is irrelevant. The invariant maintained by the
/// split builder is that the amounts of all splits sum to the expense total
/// within [`super::AMOUNT_EPSILON`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    /// The member this share belongs to
    #[serde(deserialize_with = "super::opaque_id", alias = "userId")]
    pub member_id: MemberId,

    /// Share of the expense total owed by this member
    pub amount: Decimal,

    /// Share as a percentage of the total
    ///
    /// Given directly for percentage splits, derived for the other two
    /// strategies so every split can be rendered the same way.
    pub percentage: Decimal,
}

/// One payment event within a group
///
/// Created through the split builder, persisted by the remote store, read
/// back for settlement computation and display. Expenses are never mutated
/// in place; an edit is a delete followed by a recreate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Opaque identifier assigned by the remote store
    #[serde(deserialize_with = "super::opaque_id")]
    pub id: ExpenseId,

    /// Non-empty description of what the money was spent on
    pub description: String,

    /// Positive total amount, currency-agnostic
    pub amount: Decimal,

    /// Descriptive category
    pub category: ExpenseCategory,

    /// The member who fronted the money
    #[serde(deserialize_with = "super::opaque_id")]
    pub paid_by: MemberId,

    /// How the splits were derived
    pub split_type: SplitType,

    /// Per-member shares, summing to `amount` within epsilon
    ///
    /// Some backend versions return this field as `ExpenseSplits`.
    #[serde(alias = "ExpenseSplits", default)]
    pub splits: Vec<Split>,

    /// Creation timestamp, immutable thereafter
    pub date: DateTime<Utc>,
}
