use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing the flattened canvas to disk
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format for {0}: only .png is written")]
    UnsupportedFormat(PathBuf),

    #[error("Canvas buffer does not match its {width}x{height} dimensions")]
    Buffer { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
