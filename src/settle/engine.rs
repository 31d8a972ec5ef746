//! Greedy settlement reduction
//!
//! Reduces a balance table to a short list of "A pays B amount X"
//! instructions: partition members into debtors and creditors outside the
//! ±[`AMOUNT_EPSILON`] dead-zone, sort both sides descending by outstanding
//! amount, then merge with two pointers, always matching the largest
//! remaining debtor against the largest remaining creditor.
//!
//! Because balances net to ~0 globally, both sides exhaust together and the
//! result has at most `members - 1` instructions. A persistent leftover
//! means some expense's splits do not sum to its total beyond epsilon; the
//! plan records it instead of hiding it.

use crate::settle::balance::Balances;
use crate::types::{LedgerError, MemberId, Settlement, AMOUNT_EPSILON};
use rust_decimal::Decimal;

/// Outstanding amount on one side of the match
struct Outstanding {
    member_id: MemberId,
    remaining: Decimal,
}

/// Result of a settlement reduction
///
/// Carries the instructions plus the unmatched leftover so data-integrity
/// anomalies stay observable. A well-formed snapshot always produces
/// `leftover <= AMOUNT_EPSILON`.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementPlan {
    /// Payment instructions, largest debts first
    pub settlements: Vec<Settlement>,

    /// Absolute balance left unmatched when one side ran out
    pub leftover: Decimal,
}

impl SettlementPlan {
    /// Whether the plan clears every balance within epsilon
    pub fn is_balanced(&self) -> bool {
        self.leftover <= AMOUNT_EPSILON
    }

    /// The integrity anomaly, if the plan did not balance
    ///
    /// Lets callers propagate the leftover as an error instead of rendering
    /// an incomplete plan as if it settled everything.
    pub fn integrity_error(&self) -> Option<LedgerError> {
        if self.is_balanced() {
            None
        } else {
            Some(LedgerError::UnsettledLeftover {
                leftover: self.leftover,
            })
        }
    }
}

/// Reduce net balances to a minimal list of payment instructions
///
/// Members within ±[`AMOUNT_EPSILON`] of zero are already settled and are
/// excluded. The sort is stable, so members with equal outstanding amounts
/// keep the balance table's iteration order; the output is deterministic for
/// a given input, but callers must not rely on any particular order beyond
/// that.
///
/// Following every instruction drives all balances to within epsilon of
/// zero whenever the input nets to zero. If it does not, the shortfall is
/// reported in [`SettlementPlan::leftover`] and logged; it is never
/// silently dropped.
///
/// # Arguments
///
/// * `balances` - Net balance per member, as produced by
///   [`crate::settle::compute_balances`]
pub fn compute_settlements(balances: &Balances) -> SettlementPlan {
    let mut debtors: Vec<Outstanding> = Vec::new();
    let mut creditors: Vec<Outstanding> = Vec::new();

    for (member_id, balance) in balances {
        if *balance < -AMOUNT_EPSILON {
            debtors.push(Outstanding {
                member_id: member_id.clone(),
                remaining: balance.abs(),
            });
        } else if *balance > AMOUNT_EPSILON {
            creditors.push(Outstanding {
                member_id: member_id.clone(),
                remaining: *balance,
            });
        }
    }

    // Stable descending sort keeps equal amounts in table order.
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut settlements = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].remaining.min(creditors[j].remaining);

        if amount > AMOUNT_EPSILON {
            settlements.push(Settlement {
                from: debtors[i].member_id.clone(),
                to: creditors[j].member_id.clone(),
                amount,
            });
        }

        debtors[i].remaining -= amount;
        creditors[j].remaining -= amount;

        if debtors[i].remaining < AMOUNT_EPSILON {
            i += 1;
        }
        if creditors[j].remaining < AMOUNT_EPSILON {
            j += 1;
        }
    }

    let leftover: Decimal = debtors[i..]
        .iter()
        .chain(&creditors[j..])
        .map(|side| side.remaining)
        .sum();

    if leftover > AMOUNT_EPSILON {
        log::warn!(
            "settlement reduction left {} unmatched; some expense has malformed splits",
            leftover
        );
        debug_assert!(
            false,
            "unmatched settlement leftover {}: balances do not net to zero",
            leftover
        );
    }

    SettlementPlan {
        settlements,
        leftover,
    }
}
