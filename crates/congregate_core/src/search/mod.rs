//! Directory search over in-memory snapshots.

pub mod member_search;
