//! tally-core: transaction records, the append-only ledger, and read-only views over it

pub mod ledger;
pub mod record;
pub mod summary;

pub use ledger::Ledger;
pub use record::{MANUAL_ENTRY_SOURCE, TransactionRecord};
pub use summary::{SpendingGroup, Summary, top_spending};
