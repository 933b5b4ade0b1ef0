//! Core use-case services.
//!
//! # Responsibility
//! - Own the session, the congregation collections and the toast queue.
//! - Keep screens decoupled from storage details.

pub mod domain_store;
pub mod session_store;
pub mod summary;
pub mod toast_queue;
