//! Repository layer for durable state.
//!
//! # Responsibility
//! - Define the durable session record contract.
//! - Isolate SQLite query details from the session store.
//!
//! # Invariants
//! - Exactly one durable record key is used for the active session.
//! - Repositories move opaque payload text; parsing belongs to the caller.

pub mod session_repo;
