//! Split Builder module
//!
//! Turns user-facing split configuration into a normalized, validated list
//! of per-member shares before an expense is submitted:
//! - `builder` - pure construction/validation for the three strategies
//! - `draft` - the in-progress form state as a tagged union
//!
//! All three strategies fail closed: the builder refuses to produce splits
//! until its sum invariant holds, and the caller must not submit the expense
//! until it does.

pub mod builder;
pub mod draft;

pub use builder::{build_custom_splits, build_equal_splits, build_percentage_splits};
pub use draft::SplitDraft;
