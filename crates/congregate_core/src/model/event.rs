//! Church event model.
//!
//! # Invariants
//! - `attendance` is replaced as a whole by roll-call, never patched.
//! - Attendance entries are weak member references.

use crate::model::member::MemberId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Opaque event identifier assigned by the creator.
pub type EventId = String;

/// Scheduled congregation event with its roll-call set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurchEvent {
    pub id: EventId,
    pub title: String,
    pub description: String,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// Local wall-clock start, e.g. `09:00`.
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub attendance: BTreeSet<MemberId>,
}

impl ChurchEvent {
    /// Creates an event with an empty roll-call.
    pub fn new(id: impl Into<EventId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            date: String::new(),
            time: String::new(),
            location: String::new(),
            attendance: BTreeSet::new(),
        }
    }
}
