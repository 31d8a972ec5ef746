//! Pure split construction and validation
//!
//! Each builder takes the expense total and the strategy-specific
//! configuration and either returns a complete `Vec<Split>` or refuses with
//! a validation error naming the observed discrepancy.
//!
//! # Numeric Policy
//!
//! Equal shares are computed at full `Decimal` precision with no remainder
//! redistribution, so the sum of shares may miss the total by a sub-cent
//! remainder (e.g. three shares of 100/3). Every downstream sum check
//! absorbs this through [`AMOUNT_EPSILON`] instead of treating it as a
//! failure. Percentage-derived and custom-derived display values are rounded
//! to two decimal places, matching what the remote store echoes back.

use crate::types::{LedgerError, MemberId, Split, SplitType, AMOUNT_EPSILON, PERCENT_EPSILON};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

const ONE_HUNDRED: Decimal = dec!(100);

/// Reject non-positive expense totals
fn ensure_positive_total(total: Decimal) -> Result<(), LedgerError> {
    if total <= Decimal::ZERO {
        return Err(LedgerError::non_positive_amount(total));
    }
    Ok(())
}

/// Build splits dividing the total evenly among the participants
///
/// Every participant receives `total / n` and `100 / n` percent, at full
/// precision.
///
/// # Arguments
///
/// * `total` - The expense total, must be positive
/// * `participants` - Member ids to split among, must be non-empty
///
/// # Errors
///
/// * [`LedgerError::NonPositiveAmount`] if `total <= 0`
/// * [`LedgerError::NoParticipants`] if `participants` is empty
pub fn build_equal_splits(
    total: Decimal,
    participants: &[MemberId],
) -> Result<Vec<Split>, LedgerError> {
    ensure_positive_total(total)?;

    if participants.is_empty() {
        return Err(LedgerError::no_participants(SplitType::Equal));
    }

    let count = Decimal::from(participants.len());
    let share = total / count;
    let percentage = ONE_HUNDRED / count;

    Ok(participants
        .iter()
        .map(|member_id| Split {
            member_id: member_id.clone(),
            amount: share,
            percentage,
        })
        .collect())
}

/// Build splits from a per-member percentage map
///
/// Only entries with a positive percentage are active participants. Each
/// active member's amount is `total * percentage / 100`, rounded to two
/// decimal places for display.
///
/// # Arguments
///
/// * `total` - The expense total, must be positive
/// * `percentages` - Member id to percentage; zero entries are inactive
///
/// # Errors
///
/// * [`LedgerError::NonPositiveAmount`] if `total <= 0`
/// * [`LedgerError::NoParticipants`] if no entry is positive
/// * [`LedgerError::PercentageSum`] if active percentages miss 100 by more
///   than [`PERCENT_EPSILON`], reporting the actual total
pub fn build_percentage_splits(
    total: Decimal,
    percentages: &BTreeMap<MemberId, Decimal>,
) -> Result<Vec<Split>, LedgerError> {
    ensure_positive_total(total)?;

    let active: Vec<(&MemberId, Decimal)> = percentages
        .iter()
        .filter(|(_, percentage)| **percentage > Decimal::ZERO)
        .map(|(member_id, percentage)| (member_id, *percentage))
        .collect();

    if active.is_empty() {
        return Err(LedgerError::no_participants(SplitType::Percentage));
    }

    let sum: Decimal = active.iter().map(|(_, percentage)| *percentage).sum();
    if (sum - ONE_HUNDRED).abs() > PERCENT_EPSILON {
        return Err(LedgerError::percentage_sum(sum));
    }

    Ok(active
        .into_iter()
        .map(|(member_id, percentage)| Split {
            member_id: member_id.clone(),
            amount: (total * percentage / ONE_HUNDRED).round_dp(2),
            percentage,
        })
        .collect())
}

/// Build splits from a per-member custom amount map
///
/// Only entries with a positive amount are active participants. Each active
/// member's percentage is derived as `amount / total * 100` (two decimal
/// places) so custom splits render consistently with percentage splits.
/// No auto-redistribution is performed; the amounts must already sum to the
/// total.
///
/// # Arguments
///
/// * `total` - The expense total, must be positive
/// * `amounts` - Member id to custom amount; zero entries are inactive
///
/// # Errors
///
/// * [`LedgerError::NonPositiveAmount`] if `total <= 0`
/// * [`LedgerError::NoParticipants`] if no entry is positive
/// * [`LedgerError::CustomAmountSum`] if active amounts miss the total by
///   more than [`AMOUNT_EPSILON`], reporting both totals
pub fn build_custom_splits(
    total: Decimal,
    amounts: &BTreeMap<MemberId, Decimal>,
) -> Result<Vec<Split>, LedgerError> {
    ensure_positive_total(total)?;

    let active: Vec<(&MemberId, Decimal)> = amounts
        .iter()
        .filter(|(_, amount)| **amount > Decimal::ZERO)
        .map(|(member_id, amount)| (member_id, *amount))
        .collect();

    if active.is_empty() {
        return Err(LedgerError::no_participants(SplitType::Custom));
    }

    let sum: Decimal = active.iter().map(|(_, amount)| *amount).sum();
    if (sum - total).abs() > AMOUNT_EPSILON {
        return Err(LedgerError::custom_amount_sum(total, sum));
    }

    Ok(active
        .into_iter()
        .map(|(member_id, amount)| Split {
            member_id: member_id.clone(),
            amount,
            percentage: (amount / total * ONE_HUNDRED).round_dp(2),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ids(ids: &[&str]) -> Vec<MemberId> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn map(entries: &[(&str, Decimal)]) -> BTreeMap<MemberId, Decimal> {
        entries
            .iter()
            .map(|(id, value)| (id.to_string(), *value))
            .collect()
    }

    // Equal splits

    #[rstest]
    #[case::two_way(dec!(90), &["a", "b"], dec!(45), dec!(50))]
    #[case::single_member(dec!(25.50), &["a"], dec!(25.50), dec!(100))]
    fn test_equal_split_exact_division(
        #[case] total: Decimal,
        #[case] participants: &[&str],
        #[case] expected_share: Decimal,
        #[case] expected_percentage: Decimal,
    ) {
        let splits = build_equal_splits(total, &ids(participants)).unwrap();
        assert_eq!(splits.len(), participants.len());
        for split in &splits {
            assert_eq!(split.amount, expected_share);
            assert_eq!(split.percentage, expected_percentage);
        }
    }

    #[rstest]
    #[case::three_way_repeating(dec!(100), 3)]
    #[case::seven_way(dec!(33.37), 7)]
    #[case::many_members(dec!(1), 11)]
    fn test_equal_split_sum_within_epsilon(#[case] total: Decimal, #[case] count: usize) {
        let participants: Vec<MemberId> = (0..count).map(|i| format!("m{}", i)).collect();
        let splits = build_equal_splits(total, &participants).unwrap();

        let amount_sum: Decimal = splits.iter().map(|s| s.amount).sum();
        let percentage_sum: Decimal = splits.iter().map(|s| s.percentage).sum();

        assert!((amount_sum - total).abs() <= AMOUNT_EPSILON);
        assert!((percentage_sum - dec!(100)).abs() <= PERCENT_EPSILON);
    }

    #[test]
    fn test_equal_split_rejects_empty_participants() {
        let result = build_equal_splits(dec!(100), &[]);
        assert_eq!(
            result.unwrap_err(),
            LedgerError::NoParticipants {
                split_type: SplitType::Equal
            }
        );
    }

    #[rstest]
    #[case::zero(dec!(0))]
    #[case::negative(dec!(-10))]
    fn test_equal_split_rejects_non_positive_total(#[case] total: Decimal) {
        let result = build_equal_splits(total, &ids(&["a"]));
        assert!(matches!(
            result.unwrap_err(),
            LedgerError::NonPositiveAmount { .. }
        ));
    }

    // Percentage splits

    #[test]
    fn test_percentage_split_amounts() {
        let splits =
            build_percentage_splits(dec!(200), &map(&[("a", dec!(25)), ("b", dec!(75))])).unwrap();

        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].member_id, "a");
        assert_eq!(splits[0].amount, dec!(50.00));
        assert_eq!(splits[1].amount, dec!(150.00));
    }

    #[test]
    fn test_percentage_split_ignores_inactive_members() {
        let splits = build_percentage_splits(
            dec!(100),
            &map(&[("a", dec!(60)), ("b", dec!(0)), ("c", dec!(40))]),
        )
        .unwrap();

        assert_eq!(splits.len(), 2);
        assert!(splits.iter().all(|s| s.member_id != "b"));
    }

    #[test]
    fn test_percentage_split_tolerates_rounded_fair_shares() {
        // Three fair shares of 33.33 sum to 99.99, inside the 0.1 tolerance.
        let fair = dec!(33.33);
        let splits = build_percentage_splits(
            dec!(100),
            &map(&[("a", fair), ("b", fair), ("c", fair)]),
        )
        .unwrap();

        let amount_sum: Decimal = splits.iter().map(|s| s.amount).sum();
        assert!((amount_sum - dec!(100)).abs() <= AMOUNT_EPSILON);
    }

    #[rstest]
    #[case::undershoot(dec!(40), dec!(47.5), dec!(87.5))]
    #[case::overshoot(dec!(60), dec!(60), dec!(120))]
    fn test_percentage_split_rejects_bad_sum(
        #[case] first: Decimal,
        #[case] second: Decimal,
        #[case] reported_total: Decimal,
    ) {
        let result = build_percentage_splits(dec!(100), &map(&[("a", first), ("b", second)]));
        assert_eq!(
            result.unwrap_err(),
            LedgerError::PercentageSum {
                total: reported_total
            }
        );
    }

    #[test]
    fn test_percentage_split_rejects_all_inactive() {
        let result = build_percentage_splits(dec!(100), &map(&[("a", dec!(0)), ("b", dec!(0))]));
        assert_eq!(
            result.unwrap_err(),
            LedgerError::NoParticipants {
                split_type: SplitType::Percentage
            }
        );
    }

    // Custom splits

    #[test]
    fn test_custom_split_accepts_exact_sum() {
        let splits =
            build_custom_splits(dec!(100), &map(&[("a", dec!(40)), ("b", dec!(60))])).unwrap();

        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].amount, dec!(40));
        assert_eq!(splits[0].percentage, dec!(40.00));
        assert_eq!(splits[1].percentage, dec!(60.00));
    }

    #[test]
    fn test_custom_split_rejects_sum_mismatch() {
        let result = build_custom_splits(dec!(100), &map(&[("a", dec!(40)), ("b", dec!(50))]));
        assert_eq!(
            result.unwrap_err(),
            LedgerError::CustomAmountSum {
                expected: dec!(100),
                actual: dec!(90)
            }
        );
    }

    #[test]
    fn test_custom_split_accepts_sub_cent_mismatch() {
        let result = build_custom_splits(dec!(100), &map(&[("a", dec!(49.995)), ("b", dec!(50))]));
        assert!(result.is_ok());
    }

    #[test]
    fn test_custom_split_rejects_all_inactive() {
        let result = build_custom_splits(dec!(100), &map(&[("a", dec!(0))]));
        assert_eq!(
            result.unwrap_err(),
            LedgerError::NoParticipants {
                split_type: SplitType::Custom
            }
        );
    }

    #[test]
    fn test_custom_split_derived_percentages() {
        let splits =
            build_custom_splits(dec!(30), &map(&[("a", dec!(10)), ("b", dec!(20))])).unwrap();

        assert_eq!(splits[0].percentage, dec!(33.33));
        assert_eq!(splits[1].percentage, dec!(66.67));
    }
}
