use std::path::PathBuf;

use thiserror::Error;

/// A document could not be opened or decoded into pages.
/// Scoped to that one document; sibling documents in a batch carry on.
#[derive(Debug, Error)]
pub enum DocumentReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {document}: {message}")]
    Decode { document: String, message: String },

    #[error("{} is not valid UTF-8 text", path.display())]
    Encoding { path: PathBuf },
}
