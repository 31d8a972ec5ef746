//! Per-member net balance computation
//!
//! A balance is the signed net position of one member across all expenses:
//! positive means they are owed money, negative means they owe. Balances are
//! derived data, recomputed from the full expense list every time; they are
//! never stored or incrementally maintained.

use crate::types::{Expense, Member, MemberId};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Signed net balance per member
///
/// A `BTreeMap` so iteration order (member-id order) is deterministic,
/// which keeps the settlement reduction deterministic across runs.
pub type Balances = BTreeMap<MemberId, Decimal>;

/// Compute every member's net balance across all expenses
///
/// For each split of each expense, the split's member is debited the split
/// amount and the payer is credited the same amount. A self-split (the payer
/// owing their own share) debits and credits the same member and nets to
/// zero; it is processed like any other split. Crediting per split rather
/// than per expense total means a malformed expense whose splits undershoot
/// its total cannot mint money into the payer's balance.
///
/// Every roster member gets an entry, zero if they appear in no expense.
/// Ids referenced by an expense but missing from the roster still get
/// entries, so stale snapshots cannot silently drop debt.
///
/// # Arguments
///
/// * `expenses` - The last successfully fetched expense snapshot
/// * `members` - The group roster
///
/// # Returns
///
/// Member id to signed net balance; the values sum to zero within epsilon
/// whenever every expense's splits are well-formed.
pub fn compute_balances(expenses: &[Expense], members: &[Member]) -> Balances {
    let mut balances: Balances = members
        .iter()
        .map(|member| (member.id.clone(), Decimal::ZERO))
        .collect();

    for expense in expenses {
        for split in &expense.splits {
            *balances.entry(split.member_id.clone()).or_default() -= split.amount;
            *balances.entry(expense.paid_by.clone()).or_default() += split.amount;
        }
    }

    balances
}
