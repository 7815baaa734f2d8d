use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading or querying the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// IO error while reading a catalog file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalog file is not a valid JSON record array
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// CSV catalog file has no readable header row
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Loaded menu set is empty
    #[error("Catalog contains no menu items")]
    EmptyCatalog,
}
