//! tally-ledger: the persisted ledger. CSV on disk, rewritten in full and
//! swapped into place on every save.

pub mod codec;
pub mod error;
pub mod store;

mod atomic;

pub use codec::{COLUMNS, read_ledger, write_ledger};
pub use error::PersistenceError;
pub use store::{LedgerStore, append, export, export_file};
