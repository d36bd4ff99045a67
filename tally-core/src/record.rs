//! Transaction record type shared by extraction, storage, and reporting

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `source` label carried by every manually entered record
pub const MANUAL_ENTRY_SOURCE: &str = "Manual Entry";

/// One ledger row. Field order is the persisted column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Provenance: issuing bank, or [`MANUAL_ENTRY_SOURCE`]
    pub source: String,
    /// Calendar date, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// Trimmed free text, possibly empty
    pub description: String,
    /// Negative = spending, positive = income
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

impl TransactionRecord {
    pub fn new(
        source: impl Into<String>,
        date: NaiveDate,
        description: impl AsRef<str>,
        mut amount: Decimal,
    ) -> Self {
        // "-0.00" on a statement is stored as "0.00"
        if amount.is_zero() {
            amount.set_sign_positive(true);
        }
        Self {
            source: source.into(),
            date,
            description: description.as_ref().trim().to_string(),
            amount,
        }
    }

    /// A record typed in by the user rather than parsed from a statement
    pub fn manual(date: NaiveDate, description: impl AsRef<str>, amount: Decimal) -> Self {
        Self::new(MANUAL_ENTRY_SOURCE, date, description, amount)
    }

    pub fn is_manual(&self) -> bool {
        self.source == MANUAL_ENTRY_SOURCE
    }

    /// Returns true if this is spending (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }
}
