//! Screen-facing snapshots and capability handles.
//!
//! # Responsibility
//! - Hand each screen owned read-only snapshots of the data it shows.
//! - Hand each screen only the mutation callbacks it is allowed to use.
//!
//! # Invariants
//! - Authorization is structural: a screen cannot reach a mutation whose
//!   handle it was not given. The store performs no role checks.
//! - `ProtectedScreen` is only constructed from an active session.

use crate::model::event::ChurchEvent;
use crate::model::member::{Member, MemberId, UNKNOWN_MEMBER_NAME};
use crate::model::notification::Notification;
use crate::model::session::Session;
use crate::model::transaction::Transaction;
use crate::router::view::{ProtectedView, PublicView};
use crate::service::domain_store::{Attendee, DomainStore, StoreResult};
use crate::service::summary::{FinanceSummary, MembershipSummary};
use crate::service::toast_queue::ToastQueue;

/// Number of recent transactions shown on the dashboard.
pub const DASHBOARD_RECENT_TRANSACTIONS: usize = 5;

/// What the shell renders right now.
pub enum Screen<'a> {
    Login,
    Public {
        view: PublicView,
        authenticated: bool,
    },
    Protected(ProtectedScreen<'a>),
}

impl Screen<'_> {
    pub fn protected_view(&self) -> Option<ProtectedView> {
        match self {
            Self::Protected(screen) => Some(screen.view),
            Self::Login | Self::Public { .. } => None,
        }
    }
}

/// A protected screen together with the session it renders for.
pub struct ProtectedScreen<'a> {
    pub session: Session,
    pub view: ProtectedView,
    pub unread_notifications: usize,
    pub props: ScreenProps<'a>,
}

pub enum ScreenProps<'a> {
    Dashboard(DashboardProps),
    MyPortal(PortalProps),
    Members {
        members: Vec<Member>,
        actions: MemberActions<'a>,
    },
    Groups {
        members: Vec<Member>,
        membership: MembershipSummary,
    },
    Sermons,
    Finance {
        transactions: Vec<Transaction>,
        members: Vec<Member>,
        summary: FinanceSummary,
        actions: FinanceActions<'a>,
    },
    Events {
        events: Vec<ChurchEvent>,
        members: Vec<Member>,
        actions: EventActions<'a>,
    },
    Communication {
        notifications: Vec<Notification>,
        members: Vec<Member>,
        actions: NotificationActions<'a>,
    },
    Reports {
        members: Vec<Member>,
        transactions: Vec<Transaction>,
        events: Vec<ChurchEvent>,
        finance: FinanceSummary,
        membership: MembershipSummary,
    },
    Analytics {
        finance: FinanceSummary,
        membership: MembershipSummary,
        events: Vec<ChurchEvent>,
    },
    Settings {
        session: Session,
        branches: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardProps {
    pub membership: MembershipSummary,
    pub finance: FinanceSummary,
    pub recent_transactions: Vec<Transaction>,
    pub events: Vec<ChurchEvent>,
}

impl DashboardProps {
    pub(crate) fn from_store(store: &DomainStore) -> Self {
        Self {
            membership: MembershipSummary::from_members(store.members()),
            finance: FinanceSummary::from_transactions(store.transactions()),
            recent_transactions: store
                .transactions()
                .iter()
                .take(DASHBOARD_RECENT_TRANSACTIONS)
                .cloned()
                .collect(),
            events: store.events().to_vec(),
        }
    }
}

/// Self-service view of the member behind a `Role::Member` session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalProps {
    /// `None` when the session's member link no longer resolves.
    pub member: Option<Member>,
    pub display_name: String,
    pub giving: Vec<Transaction>,
    pub attended_events: Vec<ChurchEvent>,
    pub events: Vec<ChurchEvent>,
}

impl PortalProps {
    pub(crate) fn from_store(store: &DomainStore, member_id: Option<&str>) -> Self {
        let Some(member_id) = member_id else {
            return Self {
                member: None,
                display_name: UNKNOWN_MEMBER_NAME.to_string(),
                giving: Vec::new(),
                attended_events: Vec::new(),
                events: store.events().to_vec(),
            };
        };

        Self {
            member: store.member(member_id).cloned(),
            display_name: store.resolve_member_name(member_id),
            giving: store
                .transactions_for_member(member_id)
                .into_iter()
                .cloned()
                .collect(),
            attended_events: store
                .events()
                .iter()
                .filter(|event| event.attendance.contains(member_id))
                .cloned()
                .collect(),
            events: store.events().to_vec(),
        }
    }
}

/// Member directory mutations.
pub struct MemberActions<'a> {
    store: &'a mut DomainStore,
    toasts: &'a mut ToastQueue,
}

impl<'a> MemberActions<'a> {
    pub(crate) fn new(store: &'a mut DomainStore, toasts: &'a mut ToastQueue) -> Self {
        Self { store, toasts }
    }

    pub fn add_member(&mut self, member: Member) {
        self.store.add_member(member, self.toasts);
    }

    pub fn update_member(&mut self, member: Member) -> StoreResult<()> {
        self.store.update_member(member, self.toasts)
    }

    pub fn delete_member(&mut self, id: &str) -> StoreResult<()> {
        self.store.delete_member(id, self.toasts)
    }
}

/// Finance mutations: recording only.
pub struct FinanceActions<'a> {
    store: &'a mut DomainStore,
    toasts: &'a mut ToastQueue,
}

impl<'a> FinanceActions<'a> {
    pub(crate) fn new(store: &'a mut DomainStore, toasts: &'a mut ToastQueue) -> Self {
        Self { store, toasts }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.store.add_transaction(transaction, self.toasts);
    }
}

/// Event scheduling and roll-call mutations.
pub struct EventActions<'a> {
    store: &'a mut DomainStore,
    toasts: &'a mut ToastQueue,
}

impl<'a> EventActions<'a> {
    pub(crate) fn new(store: &'a mut DomainStore, toasts: &'a mut ToastQueue) -> Self {
        Self { store, toasts }
    }

    pub fn add_event(&mut self, event: ChurchEvent) {
        self.store.add_event(event, self.toasts);
    }

    pub fn delete_event(&mut self, id: &str) -> StoreResult<()> {
        self.store.delete_event(id, self.toasts)
    }

    pub fn set_attendance(
        &mut self,
        event_id: &str,
        member_ids: Vec<MemberId>,
    ) -> StoreResult<()> {
        self.store.set_attendance(event_id, member_ids, self.toasts)
    }

    pub fn attendance_roster(&self, event_id: &str) -> Option<Vec<Attendee>> {
        self.store.attendance_roster(event_id)
    }
}

/// Inbox mutations.
pub struct NotificationActions<'a> {
    store: &'a mut DomainStore,
    toasts: &'a mut ToastQueue,
}

impl<'a> NotificationActions<'a> {
    pub(crate) fn new(store: &'a mut DomainStore, toasts: &'a mut ToastQueue) -> Self {
        Self { store, toasts }
    }

    pub fn mark_read(&mut self, id: &str) -> StoreResult<()> {
        self.store.mark_notification_read(id, self.toasts)
    }

    pub fn mark_all_read(&mut self) -> usize {
        self.store.mark_all_notifications_read(self.toasts)
    }

    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        self.store.delete_notification(id, self.toasts)
    }
}
