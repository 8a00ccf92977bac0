//! Error types for the squeegee library.
//!
//! Classification itself never fails: every input email maps to exactly one
//! terminal status. The fallible surface is small: ingestion (column
//! detection) and mutation application, both represented by the
//! [`SqueegeeError`] enum.
//!
//! # Examples
//!
//! ```
//! use squeegee::error::{Result, SqueegeeError};
//!
//! fn detect(columns: &[String]) -> Result<()> {
//!     if columns.len() < 2 {
//!         return Err(SqueegeeError::MissingNameOrEmailColumn);
//!     }
//!     Ok(())
//! }
//!
//! assert!(detect(&[]).is_err());
//! ```

use thiserror::Error;

/// The main error type for squeegee operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqueegeeError {
    /// The ingested table cannot yield a usable name/email column pair.
    #[error("table must supply at least two columns to detect name and email")]
    MissingNameOrEmailColumn,

    /// A mutation was attempted while rows were still awaiting validation.
    #[error("validation has not completed for this dataset")]
    ValidationIncomplete,

    /// A mutation referenced a row id that does not exist in the dataset.
    #[error("row {0} not found")]
    RowNotFound(u64),
}

/// A specialized Result type for squeegee operations.
pub type Result<T> = std::result::Result<T, SqueegeeError>;
