//! Station catalog error types.

/// Errors that can occur while loading the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The price file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The price file is not valid CSV (bad header, unreadable record).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The JSON snapshot could not be written.
    #[error("snapshot error: {message}")]
    Snapshot { message: String },
}
