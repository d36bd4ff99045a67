//! Ledger Store: `load` → `append` → `save` over one CSV file.
//!
//! No locking. Two processes running the cycle against the same file can
//! lose updates; the later save wins.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use tally_core::{Ledger, TransactionRecord};
use tracing::info;

use crate::atomic;
use crate::codec;
use crate::error::PersistenceError;

#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored ledger, or an empty one if nothing has been saved yet
    pub fn load(&self) -> Result<Ledger, PersistenceError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no ledger yet, starting empty");
                return Ok(Ledger::new());
            }
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let ledger = codec::read_ledger(BufReader::new(file))?;
        info!(path = %self.path.display(), rows = ledger.len(), "loaded ledger");
        Ok(ledger)
    }

    /// Overwrite the stored ledger with `ledger`, all or nothing
    pub fn save(&self, ledger: &Ledger) -> Result<(), PersistenceError> {
        export_file(ledger, &self.path)?;
        info!(path = %self.path.display(), rows = ledger.len(), "saved ledger");
        Ok(())
    }

    /// One full cycle: load, append `records`, save. Returns the saved ledger.
    pub fn commit(&self, records: Vec<TransactionRecord>) -> Result<Ledger, PersistenceError> {
        let ledger = append(self.load()?, records);
        self.save(&ledger)?;
        Ok(ledger)
    }
}

/// `ledger`'s rows followed by `new_records`
pub fn append<I>(ledger: Ledger, new_records: I) -> Ledger
where
    I: IntoIterator<Item = TransactionRecord>,
{
    ledger.appended(new_records)
}

/// Same bytes `save` writes
pub fn export<W: Write>(ledger: &Ledger, writer: W) -> Result<(), PersistenceError> {
    codec::write_ledger(ledger, writer)
}

/// Export to a file, replacing it atomically
pub fn export_file(ledger: &Ledger, path: &Path) -> Result<(), PersistenceError> {
    atomic::replace_file(path, |out| codec::write_ledger(ledger, out))
}
