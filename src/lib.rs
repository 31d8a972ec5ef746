//! Trip Ledger Library
//! # Overview
//!
//! This library provides the expense-splitting and settlement-computation
//! core of a group-travel coordination client: validated per-member splits,
//! net balances, and a minimal list of payment instructions, layered over a
//! remote REST expense store.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Member, Expense, Split, Settlement, errors)
//!   and the shared tolerance constants
//! - [`split`] - The Split Builder:
//!   - [`split::builder`] - Pure, fail-closed split construction for the
//!     equal / percentage / custom strategies
//!   - [`split::draft`] - In-progress form state as a tagged union with
//!     reset-on-switch semantics
//! - [`settle`] - The Settlement Engine:
//!   - [`settle::balance`] - Per-member net balances, recomputed from scratch
//!   - [`settle::engine`] - Greedy debtor/creditor reduction into at most
//!     `members - 1` payment instructions
//! - [`api`] - Typed boundary with the remote expense store (trait + HTTP
//!   implementation, wire payloads)
//! - [`ledger`] - Snapshot coordinator enforcing mutate-then-refetch and
//!   memoizing the derived views per snapshot generation
//!
//! # Split Strategies
//!
//! An expense's total is attributed to members by one of three strategies:
//!
//! - **Equal**: divided evenly among the selected participants
//! - **Percentage**: user-entered percentages summing to 100 (±0.1)
//! - **Custom**: user-entered amounts summing to the total (±0.01)
//!
//! All money values are [`rust_decimal::Decimal`]; the tolerances exist to
//! absorb division remainders from the equal and percentage strategies, not
//! to forgive bad input.

// Module declarations
pub mod api;
pub mod ledger;
pub mod settle;
pub mod split;
pub mod types;

pub use api::{ExpenseStore, HttpExpenseStore, NewExpense, SplitEntry, SplitSpec};
pub use ledger::GroupLedger;
pub use settle::{compute_balances, compute_settlements, Balances, SettlementPlan};
pub use split::{
    build_custom_splits, build_equal_splits, build_percentage_splits, SplitDraft,
};
pub use types::{
    Expense, ExpenseCategory, ExpenseId, LedgerError, Member, MemberId, Settlement, Split,
    SplitType, AMOUNT_EPSILON, PERCENT_EPSILON,
};
