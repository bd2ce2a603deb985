//! Document synthesis
//!
//! Turns plain textual content into PDF, DOCX or XLSX bytes. Each encoder
//! is a pure transform: nothing here touches the file system.

mod docx;
mod layout;
mod metrics;
mod pdf;
mod rows;
mod xlsx;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

pub use layout::{PageLayout, TextLayout};
pub use rows::split_rows;

/// Output format of a generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Xlsx,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] = [Self::Pdf, Self::Docx, Self::Xlsx];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Produce document bytes for `format` from raw `content`.
///
/// Encoder failures surface as [`Error::Generation`] carrying the
/// encoder's own message.
pub fn synthesize(format: DocumentFormat, content: &str) -> Result<Vec<u8>> {
    match format {
        DocumentFormat::Pdf => pdf::render(content),
        DocumentFormat::Docx => docx::render(content),
        DocumentFormat::Xlsx => xlsx::render(content),
    }
}
