//! Core logic for the congregation-management console.
//! This crate is the single source of truth for session, routing and
//! collection invariants; screens only consume its public contract.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod router;
pub mod search;
pub mod service;
pub mod shell;

pub use config::{ConfigError, CoreConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::event::{ChurchEvent, EventId};
pub use model::member::{Member, MemberId, MemberStatus, UNKNOWN_MEMBER_NAME};
pub use model::new_entity_id;
pub use model::notification::{Notification, NotificationId, NotificationType};
pub use model::session::{Role, Session, SessionValidationError};
pub use model::toast::{Toast, ToastId, ToastKind};
pub use model::transaction::{PaymentMethod, Transaction, TransactionId, TransactionType};
pub use repo::session_repo::{
    RepoError, RepoResult, SessionRecordRepository, SqliteSessionRecordRepository,
    SESSION_RECORD_KEY,
};
pub use router::view::{ProtectedView, PublicView, View, ViewRequest};
pub use router::view_router::{transition, RouteEvent, RouteState, TransitionOutcome, ViewRouter};
pub use search::member_search::{search_members, MemberSearchQuery};
pub use service::domain_store::{
    Attendee, Collection, DomainStore, StoreError, StoreResult, StoreSeed,
};
pub use service::session_store::SessionStore;
pub use service::summary::{FinanceSummary, MembershipSummary};
pub use service::toast_queue::{Clock, ManualClock, SystemClock, ToastQueue, DEFAULT_TOAST_TTL};
pub use shell::app_shell::{AppShell, LoginError};
pub use shell::screens::{
    DashboardProps, EventActions, FinanceActions, MemberActions, NotificationActions,
    PortalProps, ProtectedScreen, Screen, ScreenProps,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
