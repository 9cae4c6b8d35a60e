//! Error types for the conversion pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// One variant per pipeline step; each maps to its own exit status.
#[derive(Error, Debug)]
pub enum Error {
    /// The markdown file does not exist.
    #[error("File does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to read markdown file {}: {source}", path.display())]
    ReadMarkdown {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create temporary HTML file: {0}")]
    CreateTemp(#[source] io::Error),

    /// Browser launch, navigation or printing failed.
    #[error("Failed to generate PDF: {0}")]
    Print(String),

    #[error("Failed to write to temporary HTML file: {0}")]
    WriteTemp(#[source] io::Error),

    #[error("Failed to resolve {} to a file URL", .0.display())]
    ResolvePath(PathBuf),

    #[error("Failed to write PDF file {}: {source}", path.display())]
    WritePdf {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to delete temporary HTML file: {0}")]
    DeleteTemp(#[source] io::Error),
}

impl Error {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::InputNotFound(_) => 1,
            Error::ReadMarkdown { .. } => 2,
            Error::CreateTemp(_) => 3,
            Error::Print(_) => 4,
            Error::WriteTemp(_) => 5,
            Error::ResolvePath(_) => 6,
            Error::WritePdf { .. } => 7,
            Error::DeleteTemp(_) => 8,
        }
    }
}
