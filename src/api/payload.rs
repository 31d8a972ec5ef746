//! Request payloads for the remote expense store
//!
//! The store selects the split-related fields by the `splitType` string:
//! equal sends a flat `splitWith` id list, percentage and custom send
//! `customSplits` entries. [`SplitSpec`] models this as a tagged variant so
//! an equal payload cannot carry custom entries (or vice versa) by
//! construction, and serializes to the exact wire shape the store expects.

use crate::types::{ExpenseCategory, ExpenseId, MemberId, Split, SplitType};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// One entry of a percentage or custom split payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitEntry {
    /// The member this entry applies to
    pub member_id: MemberId,

    /// Share as a percentage of the total, two decimal places
    pub percentage: Decimal,

    /// Share in currency units, two decimal places
    pub amount: Decimal,
}

/// Split configuration of a create-expense request
///
/// Tagged by strategy; only the fields meaningful for that strategy exist.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitSpec {
    /// Equal split among the listed participants
    Equal {
        /// Participant ids to divide the total among
        split_with: Vec<MemberId>,
    },

    /// Percentage split with explicit entries
    Percentage {
        /// Active entries, percentages summing to ~100
        splits: Vec<SplitEntry>,
    },

    /// Custom-amount split with explicit entries
    Custom {
        /// Active entries, amounts summing to ~total
        splits: Vec<SplitEntry>,
    },
}

impl SplitSpec {
    /// Build a spec from validated splits
    ///
    /// `splits` must come from the split builder for the same strategy; the
    /// equal variant keeps only the participant ids (the store recomputes
    /// even shares server-side), the other two carry full entries with
    /// display values rounded to two decimal places.
    pub fn from_splits(split_type: SplitType, splits: &[Split]) -> Self {
        match split_type {
            SplitType::Equal => SplitSpec::Equal {
                split_with: splits.iter().map(|split| split.member_id.clone()).collect(),
            },
            SplitType::Percentage => SplitSpec::Percentage {
                splits: splits.iter().map(SplitEntry::from_split).collect(),
            },
            SplitType::Custom => SplitSpec::Custom {
                splits: splits.iter().map(SplitEntry::from_split).collect(),
            },
        }
    }

    /// The strategy tag serialized as `splitType`
    pub fn split_type(&self) -> SplitType {
        match self {
            SplitSpec::Equal { .. } => SplitType::Equal,
            SplitSpec::Percentage { .. } => SplitType::Percentage,
            SplitSpec::Custom { .. } => SplitType::Custom,
        }
    }
}

impl SplitEntry {
    fn from_split(split: &Split) -> Self {
        SplitEntry {
            member_id: split.member_id.clone(),
            percentage: split.percentage.round_dp(2),
            amount: split.amount.round_dp(2),
        }
    }
}

/// Create-expense request
///
/// Validated client-side before submission; the response echoes the created
/// [`crate::types::Expense`] with its server-assigned id and resolved splits.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The group this expense belongs to
    pub group_id: String,

    /// Non-empty description
    pub description: String,

    /// Positive total amount
    pub amount: Decimal,

    /// Descriptive category
    pub category: ExpenseCategory,

    /// The member who fronted the money
    pub paid_by: MemberId,

    /// Strategy-tagged split configuration
    pub split: SplitSpec,
}

/// Wire shape of a create-expense request
///
/// Flattened view of [`NewExpense`]: the optional fields are populated from
/// the [`SplitSpec`] variant and omitted when absent, matching the store's
/// dynamic payload shape.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireNewExpense<'a> {
    group_id: &'a str,
    description: &'a str,
    amount: Decimal,
    category: ExpenseCategory,
    paid_by: &'a str,
    split_type: SplitType,
    #[serde(skip_serializing_if = "Option::is_none")]
    split_with: Option<&'a [MemberId]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_splits: Option<&'a [SplitEntry]>,
}

impl Serialize for NewExpense {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (split_with, custom_splits) = match &self.split {
            SplitSpec::Equal { split_with } => (Some(split_with.as_slice()), None),
            SplitSpec::Percentage { splits } | SplitSpec::Custom { splits } => {
                (None, Some(splits.as_slice()))
            }
        };

        WireNewExpense {
            group_id: &self.group_id,
            description: &self.description,
            amount: self.amount,
            category: self.category,
            paid_by: &self.paid_by,
            split_type: self.split.split_type(),
            split_with,
            custom_splits,
        }
        .serialize(serializer)
    }
}

/// Temporary clock-based expense id
///
/// Stands in for the server-assigned id when an unconfirmed expense needs
/// one locally (e.g. as a list key while the create is in flight). Replaced
/// by the real id on the post-create refetch.
pub fn temp_expense_id() -> ExpenseId {
    format!("tmp-{}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn base_expense(split: SplitSpec) -> NewExpense {
        NewExpense {
            group_id: "g-1".to_string(),
            description: "Dinner".to_string(),
            amount: dec!(90),
            category: ExpenseCategory::Food,
            paid_by: "a".to_string(),
            split,
        }
    }

    #[test]
    fn test_equal_wire_shape() {
        let expense = base_expense(SplitSpec::Equal {
            split_with: vec!["a".to_string(), "b".to_string()],
        });

        let wire = serde_json::to_value(&expense).unwrap();
        assert_eq!(
            wire,
            json!({
                "groupId": "g-1",
                "description": "Dinner",
                "amount": 90.0,
                "category": "food",
                "paidBy": "a",
                "splitType": "equal",
                "splitWith": ["a", "b"]
            })
        );
    }

    #[test]
    fn test_percentage_wire_shape() {
        let expense = base_expense(SplitSpec::Percentage {
            splits: vec![
                SplitEntry {
                    member_id: "a".to_string(),
                    percentage: dec!(60.00),
                    amount: dec!(54.00),
                },
                SplitEntry {
                    member_id: "b".to_string(),
                    percentage: dec!(40.00),
                    amount: dec!(36.00),
                },
            ],
        });

        let wire = serde_json::to_value(&expense).unwrap();
        assert_eq!(wire["splitType"], "percentage");
        assert!(wire.get("splitWith").is_none());
        assert_eq!(wire["customSplits"][0]["memberId"], "a");
        assert_eq!(wire["customSplits"][0]["percentage"], 60.0);
        assert_eq!(wire["customSplits"][1]["amount"], 36.0);
    }

    #[test]
    fn test_custom_wire_shape_omits_split_with() {
        let expense = base_expense(SplitSpec::Custom {
            splits: vec![SplitEntry {
                member_id: "b".to_string(),
                percentage: dec!(100.00),
                amount: dec!(90.00),
            }],
        });

        let wire = serde_json::to_value(&expense).unwrap();
        assert_eq!(wire["splitType"], "custom");
        assert!(wire.get("splitWith").is_none());
        assert_eq!(wire["customSplits"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_from_splits_equal_keeps_ids_only() {
        let splits = crate::split::build_equal_splits(
            dec!(90),
            &["a".to_string(), "b".to_string(), "c".to_string()],
        )
        .unwrap();

        let spec = SplitSpec::from_splits(SplitType::Equal, &splits);
        assert_eq!(
            spec,
            SplitSpec::Equal {
                split_with: vec!["a".to_string(), "b".to_string(), "c".to_string()]
            }
        );
    }

    #[test]
    fn test_from_splits_rounds_display_values() {
        let splits = crate::split::build_equal_splits(
            dec!(100),
            &["a".to_string(), "b".to_string(), "c".to_string()],
        )
        .unwrap();

        // Force entries (the equal path would drop them) to check rounding.
        let spec = SplitSpec::from_splits(SplitType::Custom, &splits);
        let SplitSpec::Custom { splits: entries } = spec else {
            panic!("expected custom spec");
        };
        assert!(entries.iter().all(|entry| entry.amount == dec!(33.33)));
    }

    #[test]
    fn test_temp_expense_id_prefix() {
        assert!(temp_expense_id().starts_with("tmp-"));
    }
}
