//! Application shell composing session, router, store and toasts.
//!
//! # Responsibility
//! - Restore the durable session at start-up and route accordingly.
//! - Validate login candidates against the member collection.
//! - Build the active screen with its snapshots and capability handles.
//!
//! # Invariants
//! - Router authentication state always mirrors the session store.
//! - No protected screen is built without an active session.
//! - A successful role switch re-enters the router as a fresh login.
//! - Restored and freshly logged-in sessions pass the same member-link check.

use crate::config::CoreConfig;
use crate::model::session::{Role, Session, SessionValidationError};
use crate::model::toast::{Toast, ToastId};
use crate::repo::session_repo::SessionRecordRepository;
use crate::router::view::{ProtectedView, ViewRequest};
use crate::router::view_router::{RouteState, TransitionOutcome, ViewRouter};
use crate::service::domain_store::DomainStore;
use crate::service::session_store::SessionStore;
use crate::service::summary::{FinanceSummary, MembershipSummary};
use crate::service::toast_queue::{Clock, SystemClock, ToastQueue};
use crate::shell::screens::{
    DashboardProps, EventActions, FinanceActions, MemberActions, NotificationActions,
    PortalProps, ProtectedScreen, Screen, ScreenProps,
};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Login rejection reasons raised at the shell boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    Invalid(SessionValidationError),
    /// The member link does not resolve to a member record.
    UnknownMember(String),
}

impl Display for LoginError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::UnknownMember(id) => write!(f, "no member record found for id {id}"),
        }
    }
}

impl Error for LoginError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::UnknownMember(_) => None,
        }
    }
}

impl From<SessionValidationError> for LoginError {
    fn from(value: SessionValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Composition root owning all core state for one running instance.
pub struct AppShell<R: SessionRecordRepository> {
    config: CoreConfig,
    session: SessionStore<R>,
    store: DomainStore,
    router: ViewRouter,
    toasts: ToastQueue,
}

impl<R: SessionRecordRepository> AppShell<R> {
    /// Starts the shell on the wall clock.
    pub fn start(repo: R, store: DomainStore, config: CoreConfig) -> Self {
        Self::start_with_clock(repo, store, config, Arc::new(SystemClock))
    }

    /// Starts the shell, restoring any durable session.
    ///
    /// A restored MEMBER session whose member link no longer resolves is
    /// discarded and the shell starts logged out.
    pub fn start_with_clock(
        repo: R,
        store: DomainStore,
        config: CoreConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut toasts = ToastQueue::with_clock(clock, config.toast_ttl());
        let mut session = SessionStore::new(repo, config.default_branch.clone());
        let mut router = ViewRouter::new();

        match session.restore() {
            Some(restored) => match check_candidate(&store, &restored) {
                Ok(()) => {
                    router.logged_in(restored.role);
                    info!(
                        "event=shell_start module=shell status=ok restored=true role={}",
                        restored.role
                    );
                }
                Err(err) => {
                    warn!(
                        "event=shell_start module=shell status=degraded restored=false reason={err}"
                    );
                    session.logout(&mut toasts);
                }
            },
            None => info!("event=shell_start module=shell status=ok restored=false"),
        }

        Self {
            config,
            session,
            store,
            router,
            toasts,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.current()
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn route(&self) -> RouteState {
        self.router.state()
    }

    /// Accepts a candidate from the login provider.
    ///
    /// Member candidates must link to an existing member record. A rejected
    /// candidate leaves the shell logged out and pushes one error toast.
    pub fn login(&mut self, candidate: Session) -> Result<Session, LoginError> {
        if let Err(err) = check_candidate(&self.store, &candidate) {
            warn!("event=shell_login module=shell status=rejected reason={err}");
            self.toasts.error(format!("Sign-in failed: {err}"));
            return Err(err);
        }

        let session = self.session.login(candidate, &mut self.toasts);
        self.router.logged_in(session.role);
        self.toasts.info(format!("Welcome, {}", session.name));
        Ok(session)
    }

    pub fn logout(&mut self) {
        self.session.logout(&mut self.toasts);
        self.router.logged_out();
    }

    pub fn navigate(&mut self, request: impl Into<ViewRequest>) -> TransitionOutcome {
        self.router.navigate(request)
    }

    /// Navigates by wire key; unknown keys follow the fallback policy.
    pub fn navigate_key(&mut self, key: &str) -> TransitionOutcome {
        self.router.navigate(ViewRequest::parse(key))
    }

    pub fn back(&mut self) -> TransitionOutcome {
        self.router.back()
    }

    pub fn switch_branch(&mut self, branch: &str) -> Option<Session> {
        self.session.switch_branch(branch, &mut self.toasts)
    }

    /// Switches role and re-enters routing at the role's initial view.
    pub fn switch_role(&mut self, role: Role) -> Option<Session> {
        if role == Role::Member {
            let linked = self
                .session
                .current()
                .and_then(|session| session.member_id.as_deref())
                .map(|member_id| (member_id.to_string(), self.store.member(member_id).is_some()));
            if let Some((member_id, false)) = linked {
                warn!(
                    "event=shell_switch_role module=shell status=rejected reason=unknown_member member_id={member_id}"
                );
                self.toasts
                    .error(LoginError::UnknownMember(member_id).to_string());
                return None;
            }
        }

        let session = self.session.switch_role(role, &mut self.toasts)?;
        self.router.logged_in(session.role);
        Some(session)
    }

    /// Live toasts in display order.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.entries()
    }

    /// Runs due toast expiries.
    pub fn tick(&mut self) -> Vec<ToastId> {
        self.toasts.tick()
    }

    pub fn dismiss_toast(&mut self, id: ToastId) {
        self.toasts.dismiss(id);
    }

    /// Builds the active screen.
    pub fn screen(&mut self) -> Screen<'_> {
        let Some(session) = self.session.current().cloned() else {
            return match self.router.state() {
                RouteState::Public { view, .. } => Screen::Public {
                    view,
                    authenticated: false,
                },
                RouteState::Unauthenticated | RouteState::Authenticated(_) => Screen::Login,
            };
        };

        let view = match self.router.state() {
            RouteState::Authenticated(view) => view,
            RouteState::Public {
                view,
                authenticated,
            } => {
                return Screen::Public {
                    view,
                    authenticated,
                }
            }
            RouteState::Unauthenticated => return Screen::Login,
        };

        let unread_notifications = self.store.unread_notification_count();
        let props = self.props_for(view, &session);
        Screen::Protected(ProtectedScreen {
            session,
            view,
            unread_notifications,
            props,
        })
    }

    fn props_for(&mut self, view: ProtectedView, session: &Session) -> ScreenProps<'_> {
        let store = &mut self.store;
        let toasts = &mut self.toasts;
        match view {
            ProtectedView::Dashboard => ScreenProps::Dashboard(DashboardProps::from_store(store)),
            ProtectedView::MyPortal => {
                ScreenProps::MyPortal(PortalProps::from_store(store, session.member_id.as_deref()))
            }
            ProtectedView::Members => ScreenProps::Members {
                members: store.members().to_vec(),
                actions: MemberActions::new(store, toasts),
            },
            ProtectedView::Groups => ScreenProps::Groups {
                members: store.members().to_vec(),
                membership: MembershipSummary::from_members(store.members()),
            },
            ProtectedView::Sermons => ScreenProps::Sermons,
            ProtectedView::Finance => ScreenProps::Finance {
                transactions: store.transactions().to_vec(),
                members: store.members().to_vec(),
                summary: FinanceSummary::from_transactions(store.transactions()),
                actions: FinanceActions::new(store, toasts),
            },
            ProtectedView::Events => ScreenProps::Events {
                events: store.events().to_vec(),
                members: store.members().to_vec(),
                actions: EventActions::new(store, toasts),
            },
            ProtectedView::Communication => ScreenProps::Communication {
                notifications: store.notifications().to_vec(),
                members: store.members().to_vec(),
                actions: NotificationActions::new(store, toasts),
            },
            ProtectedView::Reports => ScreenProps::Reports {
                members: store.members().to_vec(),
                transactions: store.transactions().to_vec(),
                events: store.events().to_vec(),
                finance: FinanceSummary::from_transactions(store.transactions()),
                membership: MembershipSummary::from_members(store.members()),
            },
            ProtectedView::Analytics => ScreenProps::Analytics {
                finance: FinanceSummary::from_transactions(store.transactions()),
                membership: MembershipSummary::from_members(store.members()),
                events: store.events().to_vec(),
            },
            ProtectedView::Settings => ScreenProps::Settings {
                session: session.clone(),
                branches: self.config.branch_choices(),
            },
        }
    }
}

/// Applies the login rules a stored or candidate session must satisfy.
fn check_candidate(store: &DomainStore, candidate: &Session) -> Result<(), LoginError> {
    candidate.validate()?;
    if candidate.role == Role::Member {
        if let Some(member_id) = candidate.member_id.as_deref() {
            if store.member(member_id).is_none() {
                return Err(LoginError::UnknownMember(member_id.to_string()));
            }
        }
    }
    Ok(())
}
