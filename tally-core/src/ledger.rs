//! The ledger: an insertion-ordered, append-only sequence of records.

use crate::record::TransactionRecord;

/// Ordered rows, oldest append first. Order says nothing about `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<TransactionRecord>,
}

impl Ledger {
    /// An empty ledger (the ABSENT state)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.records
    }

    /// Existing rows followed by `new_records`, in the order given.
    /// No deduplication and no validation.
    pub fn appended<I>(mut self, new_records: I) -> Self
    where
        I: IntoIterator<Item = TransactionRecord>,
    {
        self.records.extend(new_records);
        self
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn record(source: &str, day: u32, cents: i64) -> TransactionRecord {
        TransactionRecord::new(
            source,
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            format!("item {day}"),
            Decimal::new(cents, 2),
        )
    }

    #[test]
    fn test_appended_preserves_order_and_length() {
        let ledger = Ledger::from_records(vec![record("Chase", 20, -100), record("Chase", 2, 500)]);
        let new = vec![record("Wells Fargo", 15, -250), record("Wells Fargo", 1, 0)];

        let merged = ledger.clone().appended(new.clone());

        assert_eq!(merged.len(), ledger.len() + new.len());
        assert_eq!(&merged.records()[..2], ledger.records());
        assert_eq!(&merged.records()[2..], new.as_slice());
        // insertion order, not chronological
        assert_eq!(merged.records()[0].date.format("%d").to_string(), "20");
    }

    #[test]
    fn test_appending_nothing_is_identity() {
        let ledger = Ledger::from_records(vec![record("Chase", 1, -1)]);
        assert_eq!(ledger.clone().appended(Vec::new()), ledger);
        assert!(Ledger::new().appended(Vec::new()).is_empty());
    }
}
