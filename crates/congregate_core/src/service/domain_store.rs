//! In-memory congregation collections and their mutation rules.
//!
//! # Responsibility
//! - Own members, transactions, events and notifications.
//! - Announce every successful mutation with exactly one toast.
//!
//! # Invariants
//! - Ids are caller-assigned; duplicates are accepted and reported by
//!   [`DomainStore::duplicate_ids`], never rewritten.
//! - With duplicate ids, lookup, update, delete, roll-call and mark-read all
//!   act on the first match only.
//! - Transactions are prepended so iteration is most-recent-first.
//! - Member deletion never cascades into transactions or attendance sets.
//! - Not-found updates/deletes leave the collection unchanged and push no
//!   toast.
//! - Roll-call replaces an event's attendance set as one operation.

use crate::model::event::ChurchEvent;
use crate::model::member::{Member, MemberId, UNKNOWN_MEMBER_NAME};
use crate::model::notification::Notification;
use crate::model::transaction::Transaction;
use crate::service::toast_queue::ToastQueue;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Collection names used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Members,
    Transactions,
    Events,
    Notifications,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Members => "members",
            Self::Transactions => "transactions",
            Self::Events => "events",
            Self::Notifications => "notifications",
        }
    }
}

/// Domain store error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Update/delete referenced an absent id; nothing changed.
    NotFound { collection: Collection, id: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { collection, id } => {
                write!(f, "{} entry not found: {id}", collection.as_str())
            }
        }
    }
}

impl Error for StoreError {}

/// Initial collection contents supplied by seed data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSeed {
    pub members: Vec<Member>,
    /// Expected newest first.
    pub transactions: Vec<Transaction>,
    pub events: Vec<ChurchEvent>,
    pub notifications: Vec<Notification>,
}

impl StoreSeed {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Roll-call entry with the member name resolved at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    pub member_id: MemberId,
    pub display_name: String,
    /// `false` when the member was deleted after the roll-call.
    pub resolved: bool,
}

/// Owner of the congregation collections.
#[derive(Debug, Clone, Default)]
pub struct DomainStore {
    members: Vec<Member>,
    transactions: Vec<Transaction>,
    events: Vec<ChurchEvent>,
    notifications: Vec<Notification>,
}

impl DomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: StoreSeed) -> Self {
        let store = Self {
            members: seed.members,
            transactions: seed.transactions,
            events: seed.events,
            notifications: seed.notifications,
        };
        info!(
            "event=store_seed module=store status=ok members={} transactions={} events={} notifications={}",
            store.members.len(),
            store.transactions.len(),
            store.events.len(),
            store.notifications.len()
        );
        for (collection, ids) in store.duplicate_ids() {
            warn!(
                "event=store_seed module=store status=degraded reason=duplicate_id collection={} count={}",
                collection.as_str(),
                ids.len()
            );
        }
        store
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn events(&self) -> &[ChurchEvent] {
        &self.events
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|transaction| transaction.id == id)
    }

    pub fn event(&self, id: &str) -> Option<&ChurchEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn notification(&self, id: &str) -> Option<&Notification> {
        self.notifications
            .iter()
            .find(|notification| notification.id == id)
    }

    /// Resolves a weak member reference to a display name.
    pub fn resolve_member_name(&self, id: &str) -> String {
        self.member(id)
            .map_or_else(|| UNKNOWN_MEMBER_NAME.to_string(), Member::full_name)
    }

    /// Transactions recorded against one member id, most recent first.
    pub fn transactions_for_member(&self, member_id: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| transaction.member_id == member_id)
            .collect()
    }

    /// Resolves an event roll-call; `None` when the event is absent.
    pub fn attendance_roster(&self, event_id: &str) -> Option<Vec<Attendee>> {
        let event = self.event(event_id)?;
        Some(
            event
                .attendance
                .iter()
                .map(|member_id| match self.member(member_id) {
                    Some(member) => Attendee {
                        member_id: member_id.clone(),
                        display_name: member.full_name(),
                        resolved: true,
                    },
                    None => Attendee {
                        member_id: member_id.clone(),
                        display_name: UNKNOWN_MEMBER_NAME.to_string(),
                        resolved: false,
                    },
                })
                .collect(),
        )
    }

    pub fn unread_notification_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| !notification.read)
            .count()
    }

    /// Reports ids present more than once, per collection.
    pub fn duplicate_ids(&self) -> BTreeMap<Collection, Vec<String>> {
        let mut report = BTreeMap::new();
        let candidates = [
            (
                Collection::Members,
                repeated(self.members.iter().map(|member| member.id.as_str())),
            ),
            (
                Collection::Transactions,
                repeated(self.transactions.iter().map(|transaction| transaction.id.as_str())),
            ),
            (
                Collection::Events,
                repeated(self.events.iter().map(|event| event.id.as_str())),
            ),
            (
                Collection::Notifications,
                repeated(
                    self.notifications
                        .iter()
                        .map(|notification| notification.id.as_str()),
                ),
            ),
        ];
        for (collection, ids) in candidates {
            if !ids.is_empty() {
                report.insert(collection, ids);
            }
        }
        report
    }

    pub fn add_member(&mut self, member: Member, toasts: &mut ToastQueue) {
        warn_if_duplicate(Collection::Members, self.member(&member.id).is_some(), &member.id);
        info!(
            "event=member_add module=store status=ok member_id={}",
            member.id
        );
        self.members.push(member);
        toasts.success("Member added successfully");
    }

    /// Replaces the member with the same id.
    pub fn update_member(&mut self, member: Member, toasts: &mut ToastQueue) -> StoreResult<()> {
        let Some(slot) = self.members.iter_mut().find(|existing| existing.id == member.id) else {
            return Err(not_found(Collection::Members, &member.id, "member_update"));
        };
        info!(
            "event=member_update module=store status=ok member_id={}",
            member.id
        );
        *slot = member;
        toasts.success("Member updated successfully");
        Ok(())
    }

    /// Removes the member; referencing transactions and roll-calls are kept.
    pub fn delete_member(&mut self, id: &str, toasts: &mut ToastQueue) -> StoreResult<()> {
        let Some(index) = self.members.iter().position(|member| member.id == id) else {
            return Err(not_found(Collection::Members, id, "member_delete"));
        };
        self.members.remove(index);
        info!("event=member_delete module=store status=ok member_id={id}");
        toasts.success("Member removed");
        Ok(())
    }

    /// Prepends a transaction so the newest entry comes first.
    pub fn add_transaction(&mut self, transaction: Transaction, toasts: &mut ToastQueue) {
        warn_if_duplicate(
            Collection::Transactions,
            self.transaction(&transaction.id).is_some(),
            &transaction.id,
        );
        info!(
            "event=transaction_add module=store status=ok transaction_id={} type={:?} method={:?}",
            transaction.id, transaction.kind, transaction.payment_method
        );
        self.transactions.insert(0, transaction);
        toasts.success("Transaction recorded successfully");
    }

    pub fn add_event(&mut self, event: ChurchEvent, toasts: &mut ToastQueue) {
        warn_if_duplicate(Collection::Events, self.event(&event.id).is_some(), &event.id);
        info!("event=event_add module=store status=ok event_id={}", event.id);
        self.events.push(event);
        toasts.success("Event created successfully");
    }

    pub fn delete_event(&mut self, id: &str, toasts: &mut ToastQueue) -> StoreResult<()> {
        let Some(index) = self.events.iter().position(|event| event.id == id) else {
            return Err(not_found(Collection::Events, id, "event_delete"));
        };
        self.events.remove(index);
        info!("event=event_delete module=store status=ok event_id={id}");
        toasts.success("Event deleted");
        Ok(())
    }

    /// Replaces the full attendance set of one event (last write wins).
    pub fn set_attendance<I>(
        &mut self,
        event_id: &str,
        member_ids: I,
        toasts: &mut ToastQueue,
    ) -> StoreResult<()>
    where
        I: IntoIterator<Item = MemberId>,
    {
        let Some(event) = self.events.iter_mut().find(|event| event.id == event_id) else {
            return Err(not_found(Collection::Events, event_id, "event_attendance"));
        };
        event.attendance = member_ids.into_iter().collect::<BTreeSet<_>>();
        info!(
            "event=event_attendance module=store status=ok event_id={event_id} attendees={}",
            event.attendance.len()
        );
        toasts.success(format!("Attendance saved for {}", event.title));
        Ok(())
    }

    pub fn mark_notification_read(
        &mut self,
        id: &str,
        toasts: &mut ToastQueue,
    ) -> StoreResult<()> {
        let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id)
        else {
            return Err(not_found(
                Collection::Notifications,
                id,
                "notification_mark_read",
            ));
        };
        notification.read = true;
        info!("event=notification_mark_read module=store status=ok notification_id={id}");
        toasts.info("Notification marked as read");
        Ok(())
    }

    /// Marks every notification read; returns how many changed.
    pub fn mark_all_notifications_read(&mut self, toasts: &mut ToastQueue) -> usize {
        let mut changed = 0;
        for notification in self.notifications.iter_mut().filter(|entry| !entry.read) {
            notification.read = true;
            changed += 1;
        }
        info!("event=notification_mark_all_read module=store status=ok changed={changed}");
        toasts.info("All notifications marked as read");
        changed
    }

    pub fn delete_notification(
        &mut self,
        id: &str,
        toasts: &mut ToastQueue,
    ) -> StoreResult<()> {
        let Some(index) = self
            .notifications
            .iter()
            .position(|notification| notification.id == id)
        else {
            return Err(not_found(
                Collection::Notifications,
                id,
                "notification_delete",
            ));
        };
        self.notifications.remove(index);
        info!("event=notification_delete module=store status=ok notification_id={id}");
        toasts.success("Notification deleted");
        Ok(())
    }
}

fn warn_if_duplicate(collection: Collection, exists: bool, id: &str) {
    if exists {
        warn!(
            "event=store_add module=store status=degraded reason=duplicate_id collection={} id={id}",
            collection.as_str()
        );
    }
}

fn not_found(collection: Collection, id: &str, event: &str) -> StoreError {
    info!(
        "event={event} module=store status=not_found collection={} id={id}",
        collection.as_str()
    );
    StoreError::NotFound {
        collection,
        id: id.to_string(),
    }
}

fn repeated<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for id in ids {
        *counts.entry(id).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id.to_string())
        .collect()
}
