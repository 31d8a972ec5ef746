//! Settlement instruction type
//!
//! A settlement is derived data: it is recomputed from the expense snapshot
//! whenever needed and never persisted.

use super::member::MemberId;
use rust_decimal::Decimal;
use serde::Serialize;

/// A single payment instruction
///
/// "`from` pays `to` `amount`". Following every instruction in a computed
/// settlement list drives every member's balance to within
/// [`super::AMOUNT_EPSILON`] of zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settlement {
    /// The member who owes money
    pub from: MemberId,

    /// The member who should receive it
    pub to: MemberId,

    /// Positive amount to transfer
    pub amount: Decimal,
}
