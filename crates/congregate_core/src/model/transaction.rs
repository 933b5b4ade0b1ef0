//! Financial transaction model.
//!
//! # Invariants
//! - `member_id` is a weak reference and may dangle after member deletion.
//! - `member_name` is a snapshot taken at creation and is never re-synced.

use crate::model::member::MemberId;
use serde::{Deserialize, Serialize};

/// Opaque transaction identifier assigned by the creator.
pub type TransactionId = String;

/// Giving/expense classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Tithe,
    Offering,
    Donation,
    Pledge,
    Expense,
}

/// Channel the money moved through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Mpesa,
    Cash,
    Bank,
    Card,
}

/// Append-only financial record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub member_id: MemberId,
    pub member_name: String,
    /// Whole currency units.
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub payment_method: PaymentMethod,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// External receipt reference, e.g. an M-Pesa confirmation code.
    pub reference: String,
    pub category: String,
}
