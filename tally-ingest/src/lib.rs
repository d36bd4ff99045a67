//! tally-ingest: statement documents (PDF/text pages) and the line extractor
//! that turns their text into transaction records.

pub mod batch;
pub mod document;
pub mod error;
pub mod extractor;

pub use batch::{BatchOutcome, BatchStatus, DocumentFailure, extract_batch};
pub use document::{PageSource, PdfDocument, TextDocument, open_document};
pub use error::DocumentReadError;
pub use extractor::Extractor;
