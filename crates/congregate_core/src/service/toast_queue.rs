//! Auto-expiring toast queue.
//!
//! # Responsibility
//! - Hold user-facing notices in insertion order.
//! - Expire each notice independently after the configured delay.
//!
//! # Invariants
//! - Display order is FIFO; no deduplication.
//! - Each toast owns one scheduled expiry; dismissal cancels it.
//! - Expiry and dismissal converge on the same idempotent removal.
//! - `entries` never returns a toast whose deadline has passed.

use crate::model::toast::{Toast, ToastId, ToastKind};
use log::debug;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Default auto-expiry delay measured from push time.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(4000);

/// Time source for toast deadlines.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by `Instant::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic expiry.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone)]
struct ScheduledToast {
    toast: Toast,
    expires_at: Instant,
}

/// FIFO toast queue with per-toast expiry deadlines.
pub struct ToastQueue {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    scheduled: Vec<ScheduledToast>,
}

impl ToastQueue {
    /// Creates a queue on the wall clock with the default delay.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), DEFAULT_TOAST_TTL)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            scheduled: Vec::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Appends a toast and schedules its removal after the queue delay.
    ///
    /// Due expiries are fired first so the queue never outgrows its live set.
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        self.tick();
        let id = ToastId::generate();
        let expires_at = self.clock.now() + self.ttl;
        self.scheduled.push(ScheduledToast {
            toast: Toast {
                id,
                message: message.into(),
                kind,
            },
            expires_at,
        });
        debug!(
            "event=toast_push module=toast status=ok toast_id={} kind={} ttl_ms={}",
            id,
            kind.as_str(),
            self.ttl.as_millis()
        );
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> ToastId {
        self.push(message, ToastKind::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> ToastId {
        self.push(message, ToastKind::Error)
    }

    pub fn info(&mut self, message: impl Into<String>) -> ToastId {
        self.push(message, ToastKind::Info)
    }

    /// Removes one toast immediately; unknown ids are ignored.
    pub fn dismiss(&mut self, id: ToastId) {
        if self.remove(id) {
            debug!("event=toast_dismiss module=toast status=ok toast_id={id}");
        }
    }

    /// Fires every expiry whose deadline has passed.
    ///
    /// Returns ids removed by this tick in display order.
    pub fn tick(&mut self) -> Vec<ToastId> {
        let now = self.clock.now();
        let expired: Vec<ToastId> = self
            .scheduled
            .iter()
            .filter(|entry| entry.expires_at <= now)
            .map(|entry| entry.toast.id)
            .collect();
        for id in &expired {
            if self.remove(*id) {
                debug!("event=toast_expire module=toast status=ok toast_id={id}");
            }
        }
        expired
    }

    /// Returns live toasts in display order.
    pub fn entries(&self) -> Vec<Toast> {
        let now = self.clock.now();
        self.scheduled
            .iter()
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.toast.clone())
            .collect()
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.entries().iter().any(|toast| toast.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&mut self, id: ToastId) -> bool {
        let before = self.scheduled.len();
        self.scheduled.retain(|entry| entry.toast.id != id);
        self.scheduled.len() != before
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}
