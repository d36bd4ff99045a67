//! Multi-document extraction. Each document gets its own pass and its own
//! `source`; a document that fails to read is reported, not fatal.

use tally_core::TransactionRecord;
use tracing::warn;

use crate::document::PageSource;
use crate::error::DocumentReadError;
use crate::extractor::Extractor;

#[derive(Debug)]
pub struct DocumentFailure {
    pub document: String,
    pub error: DocumentReadError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// At least one record came out of the batch
    Extracted(usize),
    /// Every document was read, none had a matching line
    NothingFound,
    /// No records, and at least one document could not be read
    Failed,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Document order, then line order
    pub records: Vec<TransactionRecord>,
    pub failures: Vec<DocumentFailure>,
    pub documents_read: usize,
}

impl BatchOutcome {
    pub fn status(&self) -> BatchStatus {
        if !self.records.is_empty() {
            BatchStatus::Extracted(self.records.len())
        } else if self.failures.is_empty() {
            BatchStatus::NothingFound
        } else {
            BatchStatus::Failed
        }
    }
}

/// Run one extraction pass per `(document, source)` pair and concatenate
/// the successes in input order.
pub fn extract_batch<'a, D, I>(extractor: &Extractor, items: I) -> BatchOutcome
where
    D: PageSource + ?Sized + 'a,
    I: IntoIterator<Item = (&'a D, &'a str)>,
{
    let mut outcome = BatchOutcome::default();

    for (document, source) in items {
        match extractor.extract(document, source) {
            Ok(records) => {
                outcome.documents_read += 1;
                outcome.records.extend(records);
            }
            Err(error) => {
                warn!(document = %document.name(), %error, "skipping unreadable document");
                outcome.failures.push(DocumentFailure {
                    document: document.name(),
                    error,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;

    #[test]
    fn test_batch_keeps_document_then_line_order() {
        let chase = TextDocument::from_text(
            "chase.pdf",
            "03/14/2024 Coffee Shop -4.50\n03/15/2024 Payroll 2500.00\n",
        );
        let wells = TextDocument::from_text(
            "wells.pdf",
            "Statement period 03/01/2024 - 03/31/2024\n03/02/2024 Grocer -80.25\n",
        );

        let ex = Extractor::new().unwrap();
        let outcome = extract_batch(
            &ex,
            [
                (&chase as &dyn PageSource, "Chase"),
                (&wells as &dyn PageSource, "Wells Fargo"),
            ],
        );

        assert_eq!(outcome.status(), BatchStatus::Extracted(3));
        assert_eq!(outcome.documents_read, 2);
        let got: Vec<_> = outcome
            .records
            .iter()
            .map(|r| (r.source.as_str(), r.description.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Chase", "Coffee Shop"),
                ("Chase", "Payroll"),
                ("Wells Fargo", "Grocer"),
            ]
        );
    }

    #[test]
    fn test_failed_document_does_not_abort_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let missing = TextDocument::file(dir.path().join("gone.txt"));
        let good = TextDocument::from_text("good.txt", "01/05/2024 Bakery -6.00");

        let ex = Extractor::new().unwrap();
        let outcome = extract_batch(
            &ex,
            [
                (&missing as &dyn PageSource, "Chase"),
                (&good as &dyn PageSource, "Chase"),
            ],
        );

        assert_eq!(outcome.status(), BatchStatus::Extracted(1));
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].document.ends_with("gone.txt"));
    }

    #[test]
    fn test_nothing_found_is_distinct_from_failure() {
        let ex = Extractor::new().unwrap();

        let empty = TextDocument::from_text("empty.txt", "no transactions here\n");
        let outcome = extract_batch(&ex, [(&empty as &dyn PageSource, "Chase")]);
        assert_eq!(outcome.status(), BatchStatus::NothingFound);

        let dir = tempfile::tempdir().unwrap();
        let missing = TextDocument::file(dir.path().join("gone.txt"));
        let outcome = extract_batch(&ex, [(&missing as &dyn PageSource, "Chase")]);
        assert_eq!(outcome.status(), BatchStatus::Failed);

        let none: Vec<(&dyn PageSource, &str)> = Vec::new();
        assert_eq!(extract_batch(&ex, none).status(), BatchStatus::NothingFound);
    }
}
