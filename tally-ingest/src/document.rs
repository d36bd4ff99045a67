//! Page sources: anything that can be split into pages of plain text.
//!
//! A page that has no text layer yields `None`. That is an empty
//! contribution, not an error; only a document that cannot be opened or
//! decoded at all fails.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::error::DocumentReadError;

/// Separator between pages in extracted text
const PAGE_BREAK: char = '\u{000C}';

pub trait PageSource {
    /// Human-readable name used in logs and failure reports
    fn name(&self) -> String;

    /// Every page in document order; `None` for a page without text
    fn pages(&self) -> Result<Vec<Option<String>>, DocumentReadError>;
}

fn split_pages(text: &str) -> Vec<Option<String>> {
    text.split(PAGE_BREAK)
        .map(|page| {
            if page.trim().is_empty() {
                None
            } else {
                Some(page.to_string())
            }
        })
        .collect()
}

/// Text already in memory, or a UTF-8 text file (pages separated by form feed)
#[derive(Debug, Clone)]
pub enum TextDocument {
    Pages {
        name: String,
        pages: Vec<Option<String>>,
    },
    File(PathBuf),
}

impl TextDocument {
    pub fn from_pages(name: impl Into<String>, pages: Vec<Option<String>>) -> Self {
        Self::Pages {
            name: name.into(),
            pages,
        }
    }

    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::from_pages(name, split_pages(text))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }
}

impl PageSource for TextDocument {
    fn name(&self) -> String {
        match self {
            Self::Pages { name, .. } => name.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }

    fn pages(&self) -> Result<Vec<Option<String>>, DocumentReadError> {
        match self {
            Self::Pages { pages, .. } => Ok(pages.clone()),
            Self::File(path) => {
                let bytes = fs::read(path).map_err(|source| DocumentReadError::Io {
                    path: path.clone(),
                    source,
                })?;
                let text = String::from_utf8(bytes)
                    .map_err(|_| DocumentReadError::Encoding { path: path.clone() })?;
                Ok(split_pages(&text))
            }
        }
    }
}

/// A PDF statement on disk
#[derive(Debug, Clone)]
pub struct PdfDocument {
    path: PathBuf,
}

impl PdfDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for PdfDocument {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn pages(&self) -> Result<Vec<Option<String>>, DocumentReadError> {
        // The file handle is closed once the bytes are in memory.
        let bytes = fs::read(&self.path).map_err(|source| DocumentReadError::Io {
            path: self.path.clone(),
            source,
        })?;

        // pdf-extract panics on some malformed inputs
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&bytes)
        }))
        .map_err(|_| DocumentReadError::Decode {
            document: self.name(),
            message: "PDF decoder panicked".to_string(),
        })?;

        let text = extracted.map_err(|e| DocumentReadError::Decode {
            document: self.name(),
            message: e.to_string(),
        })?;

        Ok(split_pages(&text))
    }
}

/// Pick a page source by file extension: `.pdf` is decoded as PDF,
/// anything else is read as plain text.
pub fn open_document(path: impl AsRef<Path>) -> Box<dyn PageSource> {
    let path = path.as_ref();
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Box::new(PdfDocument::new(path))
    } else {
        Box::new(TextDocument::file(path))
    }
}
