//! Ledger CSV format.
//!
//! source,date,description,amount
//! Chase,2024-03-14,Coffee Shop,-4.50
//! Manual Entry,2024-01-01,Rent,-1200.00
//!
//! The header row is always present, even with zero rows. Quoting of
//! commas, quotes, and newlines in descriptions is left to the csv crate.

use std::io::{Read, Write};

use tally_core::{Ledger, TransactionRecord};

use crate::error::PersistenceError;

/// Column order of the stored and exported file
pub const COLUMNS: [&str; 4] = ["source", "date", "description", "amount"];

pub fn write_ledger<W: Write>(ledger: &Ledger, writer: W) -> Result<(), PersistenceError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for record in ledger {
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn read_ledger<R: Read>(reader: R) -> Result<Ledger, PersistenceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    // zero-byte file
    if headers.is_empty() {
        return Ok(Ledger::new());
    }
    if !headers.iter().eq(COLUMNS) {
        return Err(PersistenceError::Format(format!(
            "expected columns {}, found {}",
            COLUMNS.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut records = Vec::new();
    for (i, row) in rdr.deserialize::<TransactionRecord>().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let record = row.map_err(|e| PersistenceError::Format(format!("row {}: {e}", i + 2)))?;
        records.push(record);
    }

    Ok(Ledger::from_records(records))
}
