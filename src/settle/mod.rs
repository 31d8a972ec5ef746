//! Settlement Engine module
//!
//! Consumes the fetched expense snapshot and the member roster to produce:
//! - `balance` - per-member net balances (pure, recomputed from scratch)
//! - `engine` - the greedy debtor/creditor reduction into a minimal list of
//!   payment instructions
//!
//! Both computations are pure functions of `(expenses, members)`; nothing
//! here maintains incremental state. Callers re-run them whenever the
//! snapshot changes (see [`crate::ledger::GroupLedger`] for the memoizing
//! wrapper).

pub mod balance;
pub mod engine;

pub use balance::{compute_balances, Balances};
pub use engine::{compute_settlements, SettlementPlan};
