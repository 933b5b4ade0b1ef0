//! Session store over the durable session record.
//!
//! # Responsibility
//! - Hold the active session and mirror it into durable storage.
//! - Restore the session at start-up without ever failing hard.
//!
//! # Invariants
//! - Every mutation writes through before the in-memory state changes
//!   (write-then-acknowledge).
//! - A failed durable write leaves in-memory state unchanged and surfaces
//!   one error toast.
//! - Branch and role switches without an active session are no-ops.
//! - Credentials are never checked here; the login provider already did.

use crate::model::session::{Role, Session};
use crate::repo::session_repo::{RepoError, SessionRecordRepository};
use crate::service::toast_queue::ToastQueue;
use log::{error, info, warn};

/// Owner of the active session and its durable mirror.
pub struct SessionStore<R: SessionRecordRepository> {
    repo: R,
    default_branch: String,
    current: Option<Session>,
}

impl<R: SessionRecordRepository> SessionStore<R> {
    /// Creates a logged-out store. Call [`SessionStore::restore`] to rehydrate.
    pub fn new(repo: R, default_branch: impl Into<String>) -> Self {
        Self {
            repo,
            default_branch: default_branch.into(),
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// Reads the durable record into memory.
    ///
    /// Absent, unreadable, unparsable or invariant-violating records all
    /// yield `None`.
    pub fn restore(&mut self) -> Option<Session> {
        self.current = self.read_record();
        self.current.clone()
    }

    /// Normalizes and persists an already authenticated candidate.
    ///
    /// A blank branch is replaced by the configured default. If the durable
    /// write fails, the session is still activated for this run and an error
    /// toast reports that it will not survive a restart.
    pub fn login(&mut self, candidate: Session, toasts: &mut ToastQueue) -> Session {
        let mut session = candidate;
        if session.has_blank_branch() {
            session.branch = self.default_branch.clone();
        }

        if let Err(err) = self.write_record(&session) {
            error!(
                "event=session_login module=session status=error error_code=persist_failed error={err}"
            );
            toasts.error("Signed in, but the session could not be saved on this device");
        } else {
            info!(
                "event=session_login module=session status=ok session_id={} role={}",
                session.id, session.role
            );
        }

        self.current = Some(session.clone());
        session
    }

    /// Clears in-memory and durable session state unconditionally.
    pub fn logout(&mut self, toasts: &mut ToastQueue) {
        let had_session = self.current.take().is_some();
        match self.repo.clear_record() {
            Ok(()) => info!(
                "event=session_logout module=session status=ok had_session={had_session}"
            ),
            Err(err) => {
                error!(
                    "event=session_logout module=session status=error error_code=clear_failed error={err}"
                );
                toasts.error("Signed out, but the saved session could not be removed");
            }
        }
    }

    /// Replaces the session branch and announces the change.
    pub fn switch_branch(&mut self, branch: &str, toasts: &mut ToastQueue) -> Option<Session> {
        let current = self.current.as_ref()?;
        let branch = branch.trim();
        if branch.is_empty() {
            warn!("event=session_switch_branch module=session status=rejected reason=blank_branch");
            toasts.error("Branch name cannot be empty");
            return None;
        }

        let mut next = current.clone();
        next.branch = branch.to_string();
        self.commit(next, "switch_branch", toasts, |session| {
            format!("Switched to {} branch", session.branch)
        })
    }

    /// Replaces the session role and announces the change.
    ///
    /// Switching to `Role::Member` requires the session to carry a member link.
    pub fn switch_role(&mut self, role: Role, toasts: &mut ToastQueue) -> Option<Session> {
        let current = self.current.as_ref()?;
        let mut next = current.clone();
        next.role = role;
        if let Err(err) = next.validate() {
            warn!(
                "event=session_switch_role module=session status=rejected role={role} reason={err}"
            );
            toasts.error(format!("Cannot view as {}: {err}", role.label()));
            return None;
        }

        self.commit(next, "switch_role", toasts, |session| {
            format!("Now viewing as {}", session.role.label())
        })
    }

    fn commit(
        &mut self,
        next: Session,
        operation: &str,
        toasts: &mut ToastQueue,
        describe: impl FnOnce(&Session) -> String,
    ) -> Option<Session> {
        if let Err(err) = self.write_record(&next) {
            error!(
                "event=session_{operation} module=session status=error error_code=persist_failed error={err}"
            );
            toasts.error("Could not save the session change");
            return None;
        }

        info!(
            "event=session_{operation} module=session status=ok session_id={} role={}",
            next.id, next.role
        );
        toasts.info(describe(&next));
        self.current = Some(next.clone());
        Some(next)
    }

    fn read_record(&self) -> Option<Session> {
        let payload = match self.repo.load_record() {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                info!("event=session_restore module=session status=empty");
                return None;
            }
            Err(err) => {
                warn!(
                    "event=session_restore module=session status=degraded error_code=read_failed error={err}"
                );
                return None;
            }
        };

        let session = match serde_json::from_str::<Session>(&payload) {
            Ok(session) => session,
            Err(err) => {
                warn!(
                    "event=session_restore module=session status=degraded error_code=malformed_record error={err}"
                );
                return None;
            }
        };

        if let Err(err) = session.validate() {
            warn!(
                "event=session_restore module=session status=degraded error_code=invalid_record error={err}"
            );
            return None;
        }

        info!(
            "event=session_restore module=session status=ok session_id={} role={}",
            session.id, session.role
        );
        Some(session)
    }

    fn write_record(&self, session: &Session) -> Result<(), SessionPersistError> {
        let payload = serde_json::to_string(session).map_err(SessionPersistError::Encode)?;
        self.repo
            .save_record(&payload)
            .map_err(SessionPersistError::Repo)
    }
}

#[derive(Debug)]
enum SessionPersistError {
    Encode(serde_json::Error),
    Repo(RepoError),
}

impl std::fmt::Display for SessionPersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode session record: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}
