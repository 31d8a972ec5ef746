//! Group ledger coordination
//!
//! [`GroupLedger`] owns the last successfully fetched snapshot of one
//! group's expenses and members and derives balances and settlements from
//! it on demand. It enforces the two rules the rest of the crate relies on:
//!
//! - **Mutate, then refetch**: every create/delete is followed by a full
//!   refetch before anything is recomputed, so derived values always
//!   reflect server-confirmed state rather than an optimistic local merge.
//! - **Snapshot purity**: balances and settlements are pure functions of
//!   `(expenses, members)`, memoized per snapshot generation. A failed
//!   request leaves the snapshot, and therefore every derived view,
//!   untouched; stale data is shown rather than blocking.
//!
//! The generation counter also serves navigation: results computed from a
//! superseded snapshot carry an old generation, so a caller that moved on
//! can recognize and drop them instead of applying them to a dead view.

use crate::api::{ExpenseStore, NewExpense, SplitSpec};
use crate::settle::{compute_balances, compute_settlements, Balances, SettlementPlan};
use crate::split::SplitDraft;
use crate::types::{Expense, ExpenseCategory, LedgerError, Member};
use rust_decimal::Decimal;

/// Derived views of one snapshot generation
struct Views {
    generation: u64,
    balances: Balances,
    plan: SettlementPlan,
}

/// Client-side coordinator for one group's expenses
///
/// Generic over the store so tests can substitute an in-memory fake for the
/// HTTP implementation.
pub struct GroupLedger<S: ExpenseStore> {
    store: S,
    group_id: String,
    expenses: Vec<Expense>,
    members: Vec<Member>,
    generation: u64,
    views: Option<Views>,
}

impl<S: ExpenseStore> GroupLedger<S> {
    /// Create a ledger with an empty snapshot
    ///
    /// Call [`refresh`](Self::refresh) to load the first snapshot.
    pub fn new(store: S, group_id: impl Into<String>) -> Self {
        GroupLedger {
            store,
            group_id: group_id.into(),
            expenses: Vec::new(),
            members: Vec::new(),
            generation: 0,
            views: None,
        }
    }

    /// Fetch a fresh snapshot of expenses and members
    ///
    /// The two fetches are issued concurrently; the snapshot is replaced
    /// only if both succeed, and the generation is bumped so memoized views
    /// are recomputed on next access.
    ///
    /// # Errors
    ///
    /// Any remote error from either fetch. The previous snapshot is kept.
    pub async fn refresh(&mut self) -> Result<(), LedgerError> {
        let (expenses, members) = futures::future::try_join(
            self.store.fetch_expenses(&self.group_id),
            self.store.fetch_members(&self.group_id),
        )
        .await?;

        self.expenses = expenses;
        self.members = members;
        self.generation += 1;
        Ok(())
    }

    /// Validate a filled-in expense form into a submittable request
    ///
    /// Fails closed: any validation error means nothing may be submitted.
    /// The split draft is built against the total here, so a draft that was
    /// valid for a different total is re-checked against this one.
    ///
    /// # Errors
    ///
    /// * [`LedgerError::EmptyDescription`] for a blank description
    /// * [`LedgerError::UnknownPayer`] if `paid_by` is not in the roster
    /// * Any error from [`SplitDraft::build`] (non-positive total, no
    ///   participants, sum mismatches)
    pub fn prepare_expense(
        &self,
        description: &str,
        amount: Decimal,
        category: ExpenseCategory,
        paid_by: &str,
        draft: &SplitDraft,
    ) -> Result<NewExpense, LedgerError> {
        if description.trim().is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        if !self.members.iter().any(|member| member.id == paid_by) {
            return Err(LedgerError::unknown_payer(paid_by));
        }

        let splits = draft.build(amount)?;

        Ok(NewExpense {
            group_id: self.group_id.clone(),
            description: description.trim().to_string(),
            amount,
            category,
            paid_by: paid_by.to_string(),
            split: SplitSpec::from_splits(draft.split_type(), &splits),
        })
    }

    /// Create an expense on the store, then refetch the snapshot
    ///
    /// # Errors
    ///
    /// Any remote error. A failed create leaves the snapshot unchanged so
    /// the caller can keep the form open and resubmit.
    pub async fn add_expense(&mut self, expense: &NewExpense) -> Result<(), LedgerError> {
        self.store.create_expense(expense).await?;
        self.refresh().await
    }

    /// Delete an expense on the store, then refetch the snapshot
    ///
    /// # Errors
    ///
    /// Any remote error. A failed delete leaves the snapshot unchanged.
    pub async fn remove_expense(&mut self, expense_id: &str) -> Result<(), LedgerError> {
        self.store.delete_expense(expense_id).await?;
        self.refresh().await
    }

    /// The current expense snapshot
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// The current member roster
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// The snapshot generation, bumped on every successful refresh
    ///
    /// Results derived before a navigation/refresh carry an older
    /// generation and can be discarded by comparing against this value.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Net balance per member, memoized per snapshot
    pub fn balances(&mut self) -> &Balances {
        &self.ensure_views().balances
    }

    /// Minimized settlement instructions, memoized per snapshot
    ///
    /// The plan carries its unmatched leftover; callers rendering it should
    /// check [`SettlementPlan::integrity_error`] before presenting it as a
    /// complete settlement.
    pub fn settlements(&mut self) -> &SettlementPlan {
        &self.ensure_views().plan
    }

    /// Recompute the derived views if the snapshot changed
    fn ensure_views(&mut self) -> &Views {
        let current = self.generation;
        let stale = self
            .views
            .as_ref()
            .map_or(true, |views| views.generation != current);

        if stale {
            let balances = compute_balances(&self.expenses, &self.members);
            let plan = compute_settlements(&balances);
            self.views = Some(Views {
                generation: current,
                balances,
                plan,
            });
        }

        match self.views.as_ref() {
            Some(views) => views,
            None => unreachable!("views computed above"),
        }
    }
}
