//! Member-related types for the trip ledger
//!
//! This module defines the Member structure representing one person in a
//! travel group. Members are owned by the external group-management service;
//! this crate only reads them.

use serde::{Deserialize, Serialize};

/// Opaque member identifier
///
/// The remote store assigns ids; some backends echo them as JSON numbers,
/// others as strings. They are carried as strings internally and compared
/// for equality only.
pub type MemberId = String;

/// One member of a travel group
///
/// Identity is by `id`. Members are immutable from this crate's perspective:
/// they are fetched from the group endpoint and used as the roster for
/// split construction and balance computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Opaque identifier assigned by the remote store
    #[serde(deserialize_with = "super::opaque_id")]
    pub id: MemberId,

    /// Display name
    pub name: String,

    /// Contact email, shown when a member has no display name
    pub email: String,
}

impl Member {
    /// Create a member record
    ///
    /// # Arguments
    ///
    /// * `id` - Opaque member identifier
    /// * `name` - Display name
    /// * `email` - Contact email
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Member {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}
