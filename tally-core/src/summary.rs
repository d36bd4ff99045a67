//! Read-only views over a loaded ledger: income/spending totals and the
//! descriptions that account for the most spending.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::ledger::Ledger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub transaction_count: usize,
    /// Sum of positive amounts
    pub total_income: Decimal,
    /// Absolute sum of negative amounts
    pub total_spending: Decimal,
}

impl Summary {
    pub fn of(ledger: &Ledger) -> Self {
        let mut total_income = Decimal::ZERO;
        let mut total_spending = Decimal::ZERO;

        for record in ledger {
            if record.is_income() {
                total_income += record.amount;
            } else if record.is_expense() {
                total_spending += record.amount.abs();
            }
        }

        Self {
            transaction_count: ledger.len(),
            total_income,
            total_spending,
        }
    }

    /// Income minus spending
    pub fn net(&self) -> Decimal {
        self.total_income - self.total_spending
    }
}

/// Spending rolled up under one literal description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingGroup {
    pub description: String,
    pub total: Decimal,
    pub transaction_count: usize,
}

/// Group spending rows by description and return the `limit` largest totals.
/// Ties are ordered by description.
pub fn top_spending(ledger: &Ledger, limit: usize) -> Vec<SpendingGroup> {
    let mut groups: HashMap<&str, (Decimal, usize)> = HashMap::new();

    for record in ledger.iter().filter(|r| r.is_expense()) {
        let entry = groups
            .entry(record.description.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += record.amount.abs();
        entry.1 += 1;
    }

    let mut out: Vec<SpendingGroup> = groups
        .into_iter()
        .map(|(description, (total, transaction_count))| SpendingGroup {
            description: description.to_string(),
            total,
            transaction_count,
        })
        .collect();

    out.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.description.cmp(&b.description))
    });
    out.truncate(limit);
    out
}
