//! In-progress split configuration
//!
//! [`SplitDraft`] is the form state behind the three split-strategy tabs,
//! modeled as a tagged union so exactly one strategy's state exists at a
//! time. Switching strategies discards the previous state and seeds the new
//! one with its default; partially-entered data never leaks between
//! strategies.
//!
//! The percentage variant carries the one designed convenience of the form:
//! editing a member's value redistributes the remainder evenly across the
//! other active members so the total stays at 100, and toggling a member
//! in or out re-deals an equal fair share to everyone active. Custom amounts
//! get no such help; the user must make them sum to the total themselves.

use crate::split::builder::{build_custom_splits, build_equal_splits, build_percentage_splits};
use crate::types::{LedgerError, Member, MemberId, Split, SplitType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

const ONE_HUNDRED: Decimal = dec!(100);

/// Form state for one split strategy
///
/// Exactly one variant is live at a time. All transitions are methods on
/// the draft; the maps keep an entry per roster member so toggles never
/// need the roster again after seeding.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitDraft {
    /// Equal split: the checked participant ids
    Equal {
        /// Members currently selected to share the expense
        participants: Vec<MemberId>,
    },

    /// Percentage split: per-member percentage, zero meaning inactive
    Percentage {
        /// Member id to percentage share
        shares: BTreeMap<MemberId, Decimal>,
    },

    /// Custom split: per-member amount, `None` meaning inactive
    ///
    /// An active member with amount zero is distinct from an inactive one:
    /// the slot is open for typing but contributes nothing yet.
    Custom {
        /// Member id to entered amount
        amounts: BTreeMap<MemberId, Option<Decimal>>,
    },
}

impl SplitDraft {
    /// Seed a fresh draft for the given strategy
    ///
    /// Defaults mirror the tab-switch behavior of the expense form:
    /// - equal: all members selected
    /// - percentage: a rounded fair share (`100 / n`, two decimal places)
    ///   dealt to every member
    /// - custom: every member present but inactive
    pub fn seed(split_type: SplitType, members: &[Member]) -> Self {
        match split_type {
            SplitType::Equal => SplitDraft::Equal {
                participants: members.iter().map(|m| m.id.clone()).collect(),
            },
            SplitType::Percentage => {
                let fair = fair_share(members.len());
                SplitDraft::Percentage {
                    shares: members.iter().map(|m| (m.id.clone(), fair)).collect(),
                }
            }
            SplitType::Custom => SplitDraft::Custom {
                amounts: members.iter().map(|m| (m.id.clone(), None)).collect(),
            },
        }
    }

    /// Switch strategies, discarding the current state
    ///
    /// Pure transition: the previous variant's data is dropped and the new
    /// variant starts from its seed defaults.
    pub fn switch_to(self, split_type: SplitType, members: &[Member]) -> Self {
        SplitDraft::seed(split_type, members)
    }

    /// The strategy this draft configures
    pub fn split_type(&self) -> SplitType {
        match self {
            SplitDraft::Equal { .. } => SplitType::Equal,
            SplitDraft::Percentage { .. } => SplitType::Percentage,
            SplitDraft::Custom { .. } => SplitType::Custom,
        }
    }

    /// Toggle a member's participation
    ///
    /// - equal: check/uncheck the member
    /// - percentage: recompute an equal fair share across the new active set
    /// - custom: flip the slot between inactive and active-at-zero
    pub fn toggle_member(&mut self, member_id: &str) {
        match self {
            SplitDraft::Equal { participants } => {
                if let Some(position) = participants.iter().position(|id| id == member_id) {
                    participants.remove(position);
                } else {
                    participants.push(member_id.to_string());
                }
            }
            SplitDraft::Percentage { shares } => {
                let was_active = shares
                    .get(member_id)
                    .map(|share| *share > Decimal::ZERO)
                    .unwrap_or(false);

                let mut active: Vec<MemberId> = shares
                    .iter()
                    .filter(|(id, share)| id.as_str() != member_id && **share > Decimal::ZERO)
                    .map(|(id, _)| id.clone())
                    .collect();
                if !was_active {
                    active.push(member_id.to_string());
                }

                let fair = fair_share(active.len());
                for (id, share) in shares.iter_mut() {
                    *share = if active.contains(id) {
                        fair
                    } else {
                        Decimal::ZERO
                    };
                }
            }
            SplitDraft::Custom { amounts } => {
                if let Some(slot) = amounts.get_mut(member_id) {
                    *slot = match slot {
                        Some(_) => None,
                        None => Some(Decimal::ZERO),
                    };
                }
            }
        }
    }

    /// Set one member's percentage, redistributing the remainder
    ///
    /// The value is clamped to [0, 100]. Whatever remains up to 100 is dealt
    /// evenly (two decimal places) across the other currently-active members
    /// so the total stays at 100 without manual balancing.
    ///
    /// No-op on non-percentage drafts.
    pub fn set_percentage(&mut self, member_id: &str, value: Decimal) {
        let SplitDraft::Percentage { shares } = self else {
            return;
        };
        if !shares.contains_key(member_id) {
            return;
        }

        let value = value.clamp(Decimal::ZERO, ONE_HUNDRED);

        let others: Vec<MemberId> = shares
            .iter()
            .filter(|(id, share)| id.as_str() != member_id && **share > Decimal::ZERO)
            .map(|(id, _)| id.clone())
            .collect();

        let remaining = (ONE_HUNDRED - value).max(Decimal::ZERO);
        let per_other = if others.is_empty() {
            Decimal::ZERO
        } else {
            (remaining / Decimal::from(others.len())).round_dp(2)
        };

        shares.insert(member_id.to_string(), value);
        for id in others {
            shares.insert(id, per_other);
        }
    }

    /// Set one member's custom amount, activating the slot
    ///
    /// Negative input is clamped to zero. No-op on non-custom drafts.
    pub fn set_amount(&mut self, member_id: &str, value: Decimal) {
        let SplitDraft::Custom { amounts } = self else {
            return;
        };
        if let Some(slot) = amounts.get_mut(member_id) {
            *slot = Some(value.max(Decimal::ZERO));
        }
    }

    /// Build validated splits from this draft
    ///
    /// Bridges the form state to the pure builders; fails closed with the
    /// same validation errors they produce.
    ///
    /// # Errors
    ///
    /// Whatever the strategy's builder returns: non-positive total, no
    /// participants, or a sum mismatch.
    pub fn build(&self, total: Decimal) -> Result<Vec<Split>, LedgerError> {
        match self {
            SplitDraft::Equal { participants } => build_equal_splits(total, participants),
            SplitDraft::Percentage { shares } => build_percentage_splits(total, shares),
            SplitDraft::Custom { amounts } => {
                let entered: BTreeMap<MemberId, Decimal> = amounts
                    .iter()
                    .filter_map(|(id, amount)| amount.map(|a| (id.clone(), a)))
                    .collect();
                build_custom_splits(total, &entered)
            }
        }
    }
}

/// Equal share of 100% across `count` members, rounded to two decimals
fn fair_share(count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (ONE_HUNDRED / Decimal::from(count)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn members() -> Vec<Member> {
        vec![
            Member::new("a", "Ana", "ana@example.com"),
            Member::new("b", "Ben", "ben@example.com"),
            Member::new("c", "Cam", "cam@example.com"),
        ]
    }

    #[rstest]
    fn test_seed_equal_selects_all_members(members: Vec<Member>) {
        let draft = SplitDraft::seed(SplitType::Equal, &members);
        assert_eq!(
            draft,
            SplitDraft::Equal {
                participants: vec!["a".into(), "b".into(), "c".into()]
            }
        );
    }

    #[rstest]
    fn test_seed_percentage_deals_fair_shares(members: Vec<Member>) {
        let draft = SplitDraft::seed(SplitType::Percentage, &members);
        let SplitDraft::Percentage { shares } = &draft else {
            panic!("expected percentage draft");
        };
        assert!(shares.values().all(|share| *share == dec!(33.33)));
    }

    #[rstest]
    fn test_seed_custom_starts_inactive(members: Vec<Member>) {
        let draft = SplitDraft::seed(SplitType::Custom, &members);
        let SplitDraft::Custom { amounts } = &draft else {
            panic!("expected custom draft");
        };
        assert!(amounts.values().all(|amount| amount.is_none()));
    }

    #[rstest]
    fn test_switch_discards_previous_state(members: Vec<Member>) {
        let mut draft = SplitDraft::seed(SplitType::Percentage, &members);
        draft.set_percentage("a", dec!(80));

        let draft = draft.switch_to(SplitType::Custom, &members);
        let draft = draft.switch_to(SplitType::Percentage, &members);

        // Back to fair shares, not the edited 80/10/10.
        let SplitDraft::Percentage { shares } = &draft else {
            panic!("expected percentage draft");
        };
        assert!(shares.values().all(|share| *share == dec!(33.33)));
    }

    #[rstest]
    fn test_toggle_equal_member(members: Vec<Member>) {
        let mut draft = SplitDraft::seed(SplitType::Equal, &members);

        draft.toggle_member("b");
        assert_eq!(
            draft,
            SplitDraft::Equal {
                participants: vec!["a".into(), "c".into()]
            }
        );

        draft.toggle_member("b");
        assert_eq!(
            draft,
            SplitDraft::Equal {
                participants: vec!["a".into(), "c".into(), "b".into()]
            }
        );
    }

    #[rstest]
    fn test_toggle_percentage_member_re_deals_fair_share(members: Vec<Member>) {
        let mut draft = SplitDraft::seed(SplitType::Percentage, &members);

        draft.toggle_member("c");

        let SplitDraft::Percentage { shares } = &draft else {
            panic!("expected percentage draft");
        };
        assert_eq!(shares["a"], dec!(50));
        assert_eq!(shares["b"], dec!(50));
        assert_eq!(shares["c"], dec!(0));
    }

    #[rstest]
    fn test_toggle_percentage_member_back_in(members: Vec<Member>) {
        let mut draft = SplitDraft::seed(SplitType::Percentage, &members);
        draft.toggle_member("c");
        draft.toggle_member("c");

        let SplitDraft::Percentage { shares } = &draft else {
            panic!("expected percentage draft");
        };
        assert!(shares.values().all(|share| *share == dec!(33.33)));
    }

    #[rstest]
    fn test_set_percentage_redistributes_remainder(members: Vec<Member>) {
        let mut draft = SplitDraft::seed(SplitType::Percentage, &members);

        draft.set_percentage("a", dec!(50));

        let SplitDraft::Percentage { shares } = &draft else {
            panic!("expected percentage draft");
        };
        assert_eq!(shares["a"], dec!(50));
        assert_eq!(shares["b"], dec!(25));
        assert_eq!(shares["c"], dec!(25));

        let total: Decimal = shares.values().copied().sum();
        assert_eq!(total, dec!(100));
    }

    #[rstest]
    #[case::above_range(dec!(150), dec!(100))]
    #[case::below_range(dec!(-20), dec!(0))]
    fn test_set_percentage_clamps_input(
        members: Vec<Member>,
        #[case] input: Decimal,
        #[case] stored: Decimal,
    ) {
        let mut draft = SplitDraft::seed(SplitType::Percentage, &members);
        draft.set_percentage("a", input);

        let SplitDraft::Percentage { shares } = &draft else {
            panic!("expected percentage draft");
        };
        assert_eq!(shares["a"], stored);
    }

    #[rstest]
    fn test_toggle_custom_member_activates_at_zero(members: Vec<Member>) {
        let mut draft = SplitDraft::seed(SplitType::Custom, &members);

        draft.toggle_member("a");
        let SplitDraft::Custom { amounts } = &draft else {
            panic!("expected custom draft");
        };
        assert_eq!(amounts["a"], Some(dec!(0)));

        draft.toggle_member("a");
        let SplitDraft::Custom { amounts } = &draft else {
            panic!("expected custom draft");
        };
        assert_eq!(amounts["a"], None);
    }

    #[rstest]
    fn test_build_equal(members: Vec<Member>) {
        let draft = SplitDraft::seed(SplitType::Equal, &members);
        let splits = draft.build(dec!(90)).unwrap();

        assert_eq!(splits.len(), 3);
        assert!(splits.iter().all(|s| s.amount == dec!(30)));
    }

    #[rstest]
    fn test_build_custom_requires_manual_balance(members: Vec<Member>) {
        let mut draft = SplitDraft::seed(SplitType::Custom, &members);
        draft.set_amount("a", dec!(40));
        draft.set_amount("b", dec!(50));

        assert_eq!(
            draft.build(dec!(100)).unwrap_err(),
            LedgerError::CustomAmountSum {
                expected: dec!(100),
                actual: dec!(90)
            }
        );

        draft.set_amount("b", dec!(60));
        let splits = draft.build(dec!(100)).unwrap();
        assert_eq!(splits.len(), 2);
    }

    #[rstest]
    fn test_build_percentage_after_edits(members: Vec<Member>) {
        let mut draft = SplitDraft::seed(SplitType::Percentage, &members);
        draft.set_percentage("a", dec!(60));

        let splits = draft.build(dec!(200)).unwrap();
        let amount_sum: Decimal = splits.iter().map(|s| s.amount).sum();
        assert_eq!(amount_sum, dec!(200.00));
    }
}
