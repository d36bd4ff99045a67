//! Plain-text rendering of the ledger for the terminal.

use rust_decimal::Decimal;
use std::fmt::Write;
use tally_core::{Ledger, SpendingGroup, Summary};

/// `$1,234.50`, `-$4.50`
pub fn format_money(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac_part}")
}

pub fn render_table(ledger: &Ledger) -> String {
    let source_w = ledger
        .iter()
        .map(|r| r.source.chars().count())
        .chain(["Source".len()])
        .max()
        .unwrap_or(0);
    let desc_w = ledger
        .iter()
        .map(|r| r.description.chars().count())
        .chain(["Description".len()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<source_w$}  {:<10}  {:<desc_w$}  {:>12}",
        "Source", "Date", "Description", "Amount"
    );
    for r in ledger {
        // newlines inside a description would break the table
        let desc = r.description.replace(['\n', '\r'], " ");
        let _ = writeln!(
            out,
            "{:<source_w$}  {:<10}  {:<desc_w$}  {:>12}",
            r.source,
            r.date.format("%Y-%m-%d").to_string(),
            desc,
            r.amount.to_string()
        );
    }
    out
}

pub fn render_summary(summary: &Summary, top: &[SpendingGroup]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total income:    {}", format_money(summary.total_income));
    let _ = writeln!(out, "Total spending:  {}", format_money(summary.total_spending));
    let _ = writeln!(out, "Net:             {}", format_money(summary.net()));
    let _ = writeln!(out, "Transactions:    {}", summary.transaction_count);

    if !top.is_empty() {
        let _ = writeln!(out, "\nTop spending:");
        let w = top
            .iter()
            .map(|g| g.description.chars().count())
            .max()
            .unwrap_or(0);
        for g in top {
            let _ = writeln!(
                out,
                "  {:<w$}  {:>12}  ({})",
                g.description,
                format_money(g.total),
                g.transaction_count
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::{TransactionRecord, top_spending};

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(d("0.00")), "$0.00");
        assert_eq!(format_money(d("-0.00")), "$0.00");
        assert_eq!(format_money(d("-4.50")), "-$4.50");
        assert_eq!(format_money(d("999.99")), "$999.99");
        assert_eq!(format_money(d("1000")), "$1,000.00");
        assert_eq!(format_money(d("1234567.8")), "$1,234,567.80");
        assert_eq!(format_money(d("-120000.00")), "-$120,000.00");
    }

    #[test]
    fn test_render_table() {
        let ledger = Ledger::from_records(vec![TransactionRecord::new(
            "Chase",
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            "Coffee Shop",
            d("-4.50"),
        )]);
        let table = render_table(&ledger);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Source  Date"));
        assert!(lines[1].starts_with("Chase   2024-03-14  Coffee Shop"));
        assert!(lines[1].ends_with("-4.50"));
    }

    #[test]
    fn test_render_summary() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let ledger = Ledger::from_records(vec![
            TransactionRecord::new("Chase", date, "Payroll", d("2500.00")),
            TransactionRecord::new("Chase", date, "Rent", d("-1200.00")),
        ]);
        let text = render_summary(&Summary::of(&ledger), &top_spending(&ledger, 5));
        assert!(text.contains("Total income:    $2,500.00"));
        assert!(text.contains("Total spending:  $1,200.00"));
        assert!(text.contains("Net:             $1,300.00"));
        assert!(text.contains("Rent"));
        assert!(!text.contains("Payroll"));
    }
}
