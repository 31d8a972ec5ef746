//! Remote expense store boundary
//!
//! The ledger core is a client over a REST-style expense store. This module
//! contains:
//! - `payload` - typed request/response shapes, including the tagged
//!   split-specification variant serialized to the store's wire format
//! - `client` - the [`ExpenseStore`] trait and its HTTP implementation
//!
//! Persistence, authorization, and idempotency are the store's concern;
//! every call here is a plain request/response that may fail, and a failed
//! mutation leaves local state untouched.

pub mod client;
pub mod payload;

pub use client::{ExpenseStore, HttpExpenseStore};
pub use payload::{temp_expense_id, NewExpense, SplitEntry, SplitSpec};
