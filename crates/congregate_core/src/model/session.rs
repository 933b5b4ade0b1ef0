//! Authenticated identity model.
//!
//! # Responsibility
//! - Define the session shape mirrored into the durable session record.
//! - Provide the role vocabulary and the role -> initial view mapping input.
//!
//! # Invariants
//! - A session with `Role::Member` carries a `member_id`.
//! - `branch` is never blank once a session passed through login.

use crate::model::member::MemberId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Congregation role attached to one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Pastor,
    Treasurer,
    Secretary,
    Member,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Pastor,
        Role::Treasurer,
        Role::Secretary,
        Role::Member,
    ];

    /// Stable wire value, matching the durable record.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Pastor => "PASTOR",
            Self::Treasurer => "TREASURER",
            Self::Secretary => "SECRETARY",
            Self::Member => "MEMBER",
        }
    }

    /// Human-readable label used in toast messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Pastor => "Pastor",
            Self::Treasurer => "Treasurer",
            Self::Secretary => "Secretary",
            Self::Member => "Member",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and role/branch context for the current run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub branch: String,
    /// Weak link to the member record behind a `Role::Member` session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<MemberId>,
    #[serde(default)]
    pub avatar: String,
}

impl Session {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            branch: String::new(),
            member_id: None,
            avatar: String::new(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_member_id(mut self, member_id: impl Into<MemberId>) -> Self {
        self.member_id = Some(member_id.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    /// Returns whether the branch still needs the configured default.
    pub fn has_blank_branch(&self) -> bool {
        self.branch.trim().is_empty()
    }

    /// Validates structural session invariants.
    ///
    /// Referential checks against the member collection belong to the shell.
    pub fn validate(&self) -> Result<(), SessionValidationError> {
        if self.id.trim().is_empty() {
            return Err(SessionValidationError::EmptyId);
        }
        if self.role == Role::Member
            && self
                .member_id
                .as_deref()
                .map_or(true, |id| id.trim().is_empty())
        {
            return Err(SessionValidationError::MissingMemberLink);
        }
        Ok(())
    }
}

/// Structural session validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionValidationError {
    EmptyId,
    MissingMemberLink,
}

impl Display for SessionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "session id must not be empty"),
            Self::MissingMemberLink => {
                write!(f, "member sessions must reference a member record")
            }
        }
    }
}

impl Error for SessionValidationError {}
