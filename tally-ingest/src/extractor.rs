//! Statement line extractor
//!
//! Expected lines after PDF-to-text:
//!   03/14/2024   Coffee Shop                     -4.50
//!   03/15/2024   PAYROLL ACME INC              2500.00
//!
//! One record per matching line. Anything else on the page (headers,
//! balances, footers) does not match and is skipped.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use tally_core::TransactionRecord;
use tracing::{debug, info};

use crate::document::PageSource;
use crate::error::DocumentReadError;

// [prefix] DATE DESCRIPTION AMOUNT
// The amount must end the line; text before the date is allowed.
const TRANSACTION_PATTERN: &str = concat!(
    r"\b(?P<date>\d{2}/\d{2}/\d{4})\s+",
    r"(?P<desc>.+?)\s+",
    r"(?P<amount>-?\d+\.\d{2})\s*$"
);

/// Stateless apart from its compiled pattern; build once and reuse.
#[derive(Debug, Clone)]
pub struct Extractor {
    pattern: Regex,
}

impl Extractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(TRANSACTION_PATTERN)?,
        })
    }

    /// Parse one line. `None` for lines that do not match, and for lines
    /// whose date is not a real calendar date.
    pub fn parse_line(&self, line: &str, source: &str) -> Option<TransactionRecord> {
        let caps = self.pattern.captures(line)?;

        let date = match NaiveDate::parse_from_str(&caps["date"], "%m/%d/%Y") {
            Ok(d) => d,
            Err(e) => {
                debug!(line, error = %e, "skipping line with invalid date");
                return None;
            }
        };

        let amount = match Decimal::from_str_exact(&caps["amount"]) {
            Ok(a) => a,
            Err(e) => {
                debug!(line, error = %e, "skipping line with unparseable amount");
                return None;
            }
        };

        Some(TransactionRecord::new(source, date, &caps["desc"], amount))
    }

    /// Records from one page of text, in line order
    pub fn extract_text<'a>(
        &'a self,
        text: &'a str,
        source: &'a str,
    ) -> impl Iterator<Item = TransactionRecord> + 'a {
        text.lines()
            .filter_map(move |line| self.parse_line(line, source))
    }

    /// One extraction pass: every page of `document`, every record tagged
    /// with `source`.
    pub fn extract<D: PageSource + ?Sized>(
        &self,
        document: &D,
        source: &str,
    ) -> Result<Vec<TransactionRecord>, DocumentReadError> {
        let pages = document.pages()?;

        let records: Vec<_> = pages
            .iter()
            .flatten()
            .flat_map(|text| self.extract_text(text, source))
            .collect();

        info!(
            document = %document.name(),
            source,
            pages = pages.len(),
            records = records.len(),
            "extracted transactions"
        );

        Ok(records)
    }
}
