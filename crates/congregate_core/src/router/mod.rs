//! View routing state machine.
//!
//! # Responsibility
//! - Decide which screen is active for the current authentication state.
//! - Keep the legality table in one pure transition function.
//!
//! # Invariants
//! - Protected views are unreachable while unauthenticated.
//! - Public views are reachable from every state.
//! - Every (state, event) pair maps to a defined next state.

pub mod view;
pub mod view_router;
