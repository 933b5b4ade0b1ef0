//! Gated view router.
//!
//! # Invariants
//! - `transition` is total: every state/event pair yields a defined state.
//! - Logging in always lands on the role's initial view.
//! - Logging out always lands on `RouteState::Unauthenticated`.
//! - Back from a public view returns to Settings when authenticated, else
//!   to the login screen.

use crate::model::session::Role;
use crate::router::view::{ProtectedView, PublicView, View, ViewRequest};
use log::{debug, info};

/// Router state; `Unauthenticated` renders the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RouteState {
    #[default]
    Unauthenticated,
    Authenticated(ProtectedView),
    Public {
        view: PublicView,
        authenticated: bool,
    },
}

impl RouteState {
    pub fn is_authenticated(self) -> bool {
        match self {
            Self::Unauthenticated => false,
            Self::Authenticated(_) => true,
            Self::Public { authenticated, .. } => authenticated,
        }
    }

    /// View currently on screen; `None` for the login screen.
    pub fn view(self) -> Option<View> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticated(view) => Some(View::Protected(view)),
            Self::Public { view, .. } => Some(View::Public(view)),
        }
    }

    fn label(self) -> &'static str {
        self.view().map_or("LOGIN", View::as_str)
    }
}

/// Inputs driving the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEvent {
    Navigate(ViewRequest),
    LoggedIn(Role),
    LoggedOut,
    Back,
}

/// How a transition treated its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The requested target was applied.
    Applied,
    /// A protected or unknown view was requested without a session.
    Rejected,
    /// An unknown view was requested with a session; routed to the fallback.
    Fallback,
    /// The event has no effect in this state.
    Unchanged,
}

/// Pure transition function encoding the routing legality table.
pub fn transition(state: RouteState, event: &RouteEvent) -> (RouteState, TransitionOutcome) {
    use RouteState::{Authenticated, Public, Unauthenticated};

    match event {
        RouteEvent::LoggedIn(role) => (
            Authenticated(ProtectedView::initial_for(*role)),
            TransitionOutcome::Applied,
        ),
        RouteEvent::LoggedOut => (Unauthenticated, TransitionOutcome::Applied),
        RouteEvent::Back => match state {
            Public {
                authenticated: true,
                ..
            } => (
                Authenticated(ProtectedView::Settings),
                TransitionOutcome::Applied,
            ),
            Public {
                authenticated: false,
                ..
            } => (Unauthenticated, TransitionOutcome::Applied),
            Unauthenticated | Authenticated(_) => (state, TransitionOutcome::Unchanged),
        },
        RouteEvent::Navigate(request) => {
            let authenticated = state.is_authenticated();
            match (request, authenticated) {
                (ViewRequest::Known(View::Public(view)), _) => (
                    Public {
                        view: *view,
                        authenticated,
                    },
                    TransitionOutcome::Applied,
                ),
                (ViewRequest::Known(View::Protected(view)), true) => {
                    (Authenticated(*view), TransitionOutcome::Applied)
                }
                (ViewRequest::Unknown(_), true) => (
                    Authenticated(ProtectedView::FALLBACK),
                    TransitionOutcome::Fallback,
                ),
                (ViewRequest::Known(View::Protected(_)) | ViewRequest::Unknown(_), false) => {
                    (Unauthenticated, TransitionOutcome::Rejected)
                }
            }
        }
    }
}

/// Stateful wrapper applying [`transition`] to the live route.
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    state: RouteState,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    pub fn apply(&mut self, event: &RouteEvent) -> TransitionOutcome {
        let (next, outcome) = transition(self.state, event);
        match outcome {
            TransitionOutcome::Rejected => info!(
                "event=route module=router status=rejected from={} reason=unauthenticated",
                self.state.label()
            ),
            TransitionOutcome::Fallback => info!(
                "event=route module=router status=fallback from={} to={}",
                self.state.label(),
                next.label()
            ),
            TransitionOutcome::Applied | TransitionOutcome::Unchanged => debug!(
                "event=route module=router status=ok from={} to={}",
                self.state.label(),
                next.label()
            ),
        }
        self.state = next;
        outcome
    }

    pub fn navigate(&mut self, request: impl Into<ViewRequest>) -> TransitionOutcome {
        self.apply(&RouteEvent::Navigate(request.into()))
    }

    pub fn logged_in(&mut self, role: Role) -> TransitionOutcome {
        self.apply(&RouteEvent::LoggedIn(role))
    }

    pub fn logged_out(&mut self) -> TransitionOutcome {
        self.apply(&RouteEvent::LoggedOut)
    }

    pub fn back(&mut self) -> TransitionOutcome {
        self.apply(&RouteEvent::Back)
    }
}
