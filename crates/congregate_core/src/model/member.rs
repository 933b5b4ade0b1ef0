//! Member domain model.
//!
//! # Responsibility
//! - Define the congregation member record owned by the domain store.
//!
//! # Invariants
//! - `id` is assigned by the creator and is never regenerated by core.
//! - Transactions, attendance sets and sessions reference members by id only.

use serde::{Deserialize, Serialize};

/// Opaque member identifier assigned by the creator.
pub type MemberId = String;

/// Display name used when a weak member reference no longer resolves.
pub const UNKNOWN_MEMBER_NAME: &str = "Unknown Member";

/// Membership lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Active,
    Inactive,
    Visitor,
}

/// Congregation member record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub group: String,
    pub status: MemberStatus,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub join_date: String,
    pub marital_status: String,
    pub membership_type: String,
    pub age: u32,
    pub gender: String,
}

impl Member {
    /// Creates an active member with empty contact details.
    pub fn new(
        id: impl Into<MemberId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: String::new(),
            email: String::new(),
            location: String::new(),
            group: String::new(),
            status: MemberStatus::Active,
            join_date: String::new(),
            marital_status: String::new(),
            membership_type: String::new(),
            age: 0,
            gender: String::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}
