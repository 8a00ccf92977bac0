//! # Squeegee
//!
//! A bulk email-list hygiene and correction engine for Rust.
//!
//! ## Features
//!
//! - Ordered, first-match-wins defect pipeline over (name, email) tables
//! - Static domain and TLD typo dictionaries with mechanical corrections
//! - Levenshtein similarity fallback against popular mail providers
//! - Chunked batch validation with progress reporting
//! - Operator mutations (edit, accept, accept all, reset) with consistent
//!   aggregate statistics
//! - Column-preserving export projection

pub mod classify;
pub mod dataset;
pub mod error;
pub mod mutate;
pub mod record;
pub mod stats;
pub mod validate;

pub use classify::{Classification, EmailClassifier, EmailStatus, ErrorKind};
pub use dataset::{Dataset, Row, RowStatus};
pub use error::{Result, SqueegeeError};
pub use mutate::{Mutation, MutationOutcome};
pub use record::Record;
pub use stats::Stats;
pub use validate::{CHUNK_SIZE, Progress, ValidationRun};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
