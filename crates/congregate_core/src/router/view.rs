//! View vocabulary and role defaults.

use crate::model::session::Role;
use std::fmt::{Display, Formatter};

/// Screens that require an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtectedView {
    Dashboard,
    MyPortal,
    Members,
    Groups,
    Sermons,
    Finance,
    Events,
    Communication,
    Reports,
    Analytics,
    Settings,
}

impl ProtectedView {
    pub const ALL: [ProtectedView; 11] = [
        ProtectedView::Dashboard,
        ProtectedView::MyPortal,
        ProtectedView::Members,
        ProtectedView::Groups,
        ProtectedView::Sermons,
        ProtectedView::Finance,
        ProtectedView::Events,
        ProtectedView::Communication,
        ProtectedView::Reports,
        ProtectedView::Analytics,
        ProtectedView::Settings,
    ];

    /// Target for requests naming no known view while authenticated.
    pub const FALLBACK: ProtectedView = ProtectedView::Dashboard;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "DASHBOARD",
            Self::MyPortal => "MY_PORTAL",
            Self::Members => "MEMBERS",
            Self::Groups => "GROUPS",
            Self::Sermons => "SERMONS",
            Self::Finance => "FINANCE",
            Self::Events => "EVENTS",
            Self::Communication => "COMMUNICATION",
            Self::Reports => "REPORTS",
            Self::Analytics => "ANALYTICS",
            Self::Settings => "SETTINGS",
        }
    }

    /// Initial authenticated view for each role.
    pub fn initial_for(role: Role) -> Self {
        match role {
            Role::Member => Self::MyPortal,
            Role::Admin | Role::Pastor | Role::Treasurer | Role::Secretary => Self::Dashboard,
        }
    }
}

/// Screens rendered independently of session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PublicView {
    Privacy,
    Compliance,
    Security,
}

impl PublicView {
    pub const ALL: [PublicView; 3] = [
        PublicView::Privacy,
        PublicView::Compliance,
        PublicView::Security,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Privacy => "PRIVACY",
            Self::Compliance => "COMPLIANCE",
            Self::Security => "SECURITY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Protected(ProtectedView),
    Public(PublicView),
}

impl View {
    /// Parses a wire view key such as `FINANCE` or `privacy`.
    pub fn parse(key: &str) -> Option<Self> {
        let normalized = key.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        ProtectedView::ALL
            .into_iter()
            .find(|view| view.as_str() == normalized)
            .map(Self::Protected)
            .or_else(|| {
                PublicView::ALL
                    .into_iter()
                    .find(|view| view.as_str() == normalized)
                    .map(Self::Public)
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Protected(view) => view.as_str(),
            Self::Public(view) => view.as_str(),
        }
    }
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation request as issued by a screen or menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRequest {
    Known(View),
    /// A key that maps to no view.
    Unknown(String),
}

impl ViewRequest {
    pub fn parse(key: &str) -> Self {
        match View::parse(key) {
            Some(view) => Self::Known(view),
            None => Self::Unknown(key.to_string()),
        }
    }
}

impl From<View> for ViewRequest {
    fn from(value: View) -> Self {
        Self::Known(value)
    }
}

impl From<ProtectedView> for ViewRequest {
    fn from(value: ProtectedView) -> Self {
        Self::Known(View::Protected(value))
    }
}

impl From<PublicView> for ViewRequest {
    fn from(value: PublicView) -> Self {
        Self::Known(View::Public(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{ProtectedView, PublicView, View, ViewRequest};
    use crate::model::session::Role;

    #[test]
    fn parse_accepts_wire_and_loose_spellings() {
        assert_eq!(
            View::parse("MY_PORTAL"),
            Some(View::Protected(ProtectedView::MyPortal))
        );
        assert_eq!(
            View::parse(" my-portal "),
            Some(View::Protected(ProtectedView::MyPortal))
        );
        assert_eq!(View::parse("privacy"), Some(View::Public(PublicView::Privacy)));
        assert_eq!(View::parse("PAYROLL"), None);
    }

    #[test]
    fn unknown_keys_become_unknown_requests() {
        assert_eq!(
            ViewRequest::parse("PAYROLL"),
            ViewRequest::Unknown("PAYROLL".to_string())
        );
    }

    #[test]
    fn every_role_has_an_initial_view() {
        for role in Role::ALL {
            let view = ProtectedView::initial_for(role);
            if role == Role::Member {
                assert_eq!(view, ProtectedView::MyPortal);
            } else {
                assert_eq!(view, ProtectedView::Dashboard);
            }
        }
    }
}
