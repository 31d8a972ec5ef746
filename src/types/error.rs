//! Error types for the trip ledger
//!
//! This module defines all error types that can occur while building splits,
//! talking to the remote expense store, and reducing balances to settlements.
//!
//! # Error Categories
//!
//! - **Validation Errors**: a split configuration does not satisfy its
//!   invariant (bad sums, no participants, non-positive total). Always caught
//!   locally before anything is sent over the network, and always carry the
//!   observed numeric discrepancy so the user can correct it.
//! - **Remote Errors**: a request to the expense store failed, returned a
//!   non-success status, or returned a body that could not be decoded. Local
//!   state is never mutated as if the operation had succeeded.
//! - **Integrity Errors**: the settlement reduction terminated with an
//!   unmatched leftover, indicating a malformed split written by some other
//!   client (or a bug). Detected and reported, never rendered as a valid
//!   empty settlement.

use super::expense::SplitType;
use super::member::MemberId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the trip ledger
///
/// Each variant carries enough context to surface a specific, actionable
/// message. Validation variants never leave the split builder as anything
/// other than a refusal to produce splits; remote variants propagate to the
/// caller as a distinct failure signal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// The expense total is zero or negative
    ///
    /// Validation error; nothing is submitted.
    #[error("Expense amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The rejected total
        amount: Decimal,
    },

    /// The expense description is empty
    ///
    /// Validation error; nothing is submitted.
    #[error("Expense description must not be empty")]
    EmptyDescription,

    /// No active participant for the selected split strategy
    ///
    /// Validation error. For equal splits this means no member was selected;
    /// for percentage/custom splits it means no member has a positive value.
    #[error("Select at least one member for the {} split", split_type.label())]
    NoParticipants {
        /// The strategy that had no participants
        split_type: SplitType,
    },

    /// Active percentages do not sum to 100
    ///
    /// Validation error. The observed total is reported so the user can see
    /// the discrepancy (e.g. "currently 87.5%").
    #[error("Percentages must add up to 100%, currently {total}%")]
    PercentageSum {
        /// Sum of the active percentages as entered
        total: Decimal,
    },

    /// Active custom amounts do not sum to the expense total
    ///
    /// Validation error, reporting both totals.
    #[error("Split amounts must add up to {expected}, currently {actual}")]
    CustomAmountSum {
        /// The expense total
        expected: Decimal,
        /// Sum of the active custom amounts as entered
        actual: Decimal,
    },

    /// The payer is not a member of the group
    ///
    /// Validation error; the expense is rejected before submission.
    #[error("Payer {member_id} is not a member of this group")]
    UnknownPayer {
        /// The id that did not match any roster member
        member_id: MemberId,
    },

    /// A request to the remote expense store failed
    ///
    /// Covers connection failures, timeouts, and other transport errors.
    /// The snapshot is left unchanged; the caller may resubmit.
    #[error("Remote store request failed: {message}")]
    Remote {
        /// Description of the transport failure
        message: String,
    },

    /// The remote expense store returned a non-success status
    #[error("Remote store returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// A response body could not be decoded into the expected shape
    #[error("Failed to decode remote response: {message}")]
    Decode {
        /// Description of the decode failure
        message: String,
    },

    /// Settlement reduction terminated with an unmatched leftover
    ///
    /// Indicates a split whose amounts do not sum to its expense total
    /// beyond epsilon somewhere in the snapshot. The computed settlements
    /// are still internally consistent but do not fully clear all balances.
    #[error("Settlement left {leftover} unmatched; an expense has malformed splits")]
    UnsettledLeftover {
        /// Absolute balance that could not be matched
        leftover: Decimal,
    },
}

// Conversion from reqwest::Error to LedgerError
impl From<reqwest::Error> for LedgerError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            LedgerError::Decode {
                message: error.to_string(),
            }
        } else {
            LedgerError::Remote {
                message: error.to_string(),
            }
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a NonPositiveAmount error
    pub fn non_positive_amount(amount: Decimal) -> Self {
        LedgerError::NonPositiveAmount { amount }
    }

    /// Create a NoParticipants error
    pub fn no_participants(split_type: SplitType) -> Self {
        LedgerError::NoParticipants { split_type }
    }

    /// Create a PercentageSum error
    pub fn percentage_sum(total: Decimal) -> Self {
        LedgerError::PercentageSum { total }
    }

    /// Create a CustomAmountSum error
    pub fn custom_amount_sum(expected: Decimal, actual: Decimal) -> Self {
        LedgerError::CustomAmountSum { expected, actual }
    }

    /// Create an UnknownPayer error
    pub fn unknown_payer(member_id: &str) -> Self {
        LedgerError::UnknownPayer {
            member_id: member_id.to_string(),
        }
    }

    /// Create an Api error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        LedgerError::Api {
            status,
            message: message.into(),
        }
    }

    /// True for errors the user can fix by editing the form
    ///
    /// Remote and integrity errors are not validation errors: resubmitting
    /// the same data may succeed.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::NonPositiveAmount { .. }
                | LedgerError::EmptyDescription
                | LedgerError::NoParticipants { .. }
                | LedgerError::PercentageSum { .. }
                | LedgerError::CustomAmountSum { .. }
                | LedgerError::UnknownPayer { .. }
        )
    }
}
