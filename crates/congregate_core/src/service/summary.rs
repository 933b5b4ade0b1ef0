//! Read-only aggregates for dashboard and report screens.

use crate::model::member::{Member, MemberStatus};
use crate::model::transaction::{PaymentMethod, Transaction, TransactionType};
use std::collections::BTreeMap;

/// Giving and spending totals over a transaction slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinanceSummary {
    pub count: usize,
    /// Income minus expenses.
    pub net: i64,
    pub income: i64,
    pub expenses: i64,
    pub by_type: BTreeMap<TransactionType, i64>,
    pub by_method: BTreeMap<PaymentMethod, i64>,
}

impl FinanceSummary {
    /// Totals saturate at the `i64` bounds instead of overflowing.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Self::default();
        for transaction in transactions {
            let amount = transaction.amount;
            summary.count += 1;
            if transaction.kind == TransactionType::Expense {
                summary.expenses = summary.expenses.saturating_add(amount);
            } else {
                summary.income = summary.income.saturating_add(amount);
            }
            let by_type = summary.by_type.entry(transaction.kind).or_default();
            *by_type = by_type.saturating_add(amount);
            let by_method = summary
                .by_method
                .entry(transaction.payment_method)
                .or_default();
            *by_method = by_method.saturating_add(amount);
        }
        summary.net = summary.income.saturating_sub(summary.expenses);
        summary
    }
}

/// Headcount breakdown over a member slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub visitors: usize,
    /// Members per group; blank groups are counted as `Unassigned`.
    pub by_group: BTreeMap<String, usize>,
}

impl MembershipSummary {
    pub fn from_members(members: &[Member]) -> Self {
        let mut summary = Self::default();
        for member in members {
            summary.total += 1;
            match member.status {
                MemberStatus::Active => summary.active += 1,
                MemberStatus::Inactive => summary.inactive += 1,
                MemberStatus::Visitor => summary.visitors += 1,
            }
            let group = member.group.trim();
            let group = if group.is_empty() { "Unassigned" } else { group };
            *summary.by_group.entry(group.to_string()).or_default() += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::{FinanceSummary, MembershipSummary};
    use crate::model::member::{Member, MemberStatus};
    use crate::model::transaction::{PaymentMethod, Transaction, TransactionType};

    fn transaction(id: &str, amount: i64, kind: TransactionType) -> Transaction {
        Transaction {
            id: id.to_string(),
            member_id: "1".to_string(),
            member_name: "John Kamau".to_string(),
            amount,
            kind,
            payment_method: PaymentMethod::Mpesa,
            date: "2024-03-10".to_string(),
            reference: format!("REF{id}"),
            category: "General".to_string(),
        }
    }

    #[test]
    fn expenses_are_subtracted_from_net() {
        let summary = FinanceSummary::from_transactions(&[
            transaction("t1", 5_000, TransactionType::Tithe),
            transaction("t2", 1_500, TransactionType::Offering),
            transaction("t3", 2_000, TransactionType::Expense),
        ]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.income, 6_500);
        assert_eq!(summary.expenses, 2_000);
        assert_eq!(summary.net, 4_500);
        assert_eq!(summary.by_type[&TransactionType::Tithe], 5_000);
        assert_eq!(summary.by_method[&PaymentMethod::Mpesa], 8_500);
    }

    #[test]
    fn oversized_amounts_saturate_instead_of_overflowing() {
        let summary = FinanceSummary::from_transactions(&[
            transaction("t1", i64::MAX, TransactionType::Donation),
            transaction("t2", i64::MAX, TransactionType::Donation),
            transaction("t3", i64::MAX, TransactionType::Expense),
            transaction("t4", i64::MAX, TransactionType::Expense),
        ]);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.income, i64::MAX);
        assert_eq!(summary.expenses, i64::MAX);
        assert_eq!(summary.net, 0);
        assert_eq!(summary.by_type[&TransactionType::Donation], i64::MAX);
        assert_eq!(summary.by_method[&PaymentMethod::Mpesa], i64::MAX);
    }

    #[test]
    fn blank_groups_are_unassigned() {
        let mut visitor = Member::new("2", "Mary", "Wanjiku");
        visitor.status = MemberStatus::Visitor;
        let mut choir = Member::new("1", "John", "Kamau");
        choir.group = "Choir".to_string();

        let summary = MembershipSummary::from_members(&[choir, visitor]);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.visitors, 1);
        assert_eq!(summary.by_group["Choir"], 1);
        assert_eq!(summary.by_group["Unassigned"], 1);
    }
}
