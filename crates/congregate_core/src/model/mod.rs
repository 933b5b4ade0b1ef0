//! Congregation domain model.
//!
//! # Responsibility
//! - Define the records shared by the session store, domain store and shell.
//! - Keep wire naming aligned with the durable session record and seed data.
//!
//! # Invariants
//! - Entity ids are opaque strings assigned by the creator.
//! - Cross-entity links are plain id fields (weak references), never owners.

pub mod event;
pub mod member;
pub mod notification;
pub mod session;
pub mod toast;
pub mod transaction;

use uuid::Uuid;

/// Generates a fresh opaque entity id for callers creating records.
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}
