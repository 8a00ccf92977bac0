//! Email classification: the ordered defect pipeline and its typo tables.
//!
//! This module provides the classification half of the engine: detecting
//! defects in email addresses, proposing mechanical corrections, and the
//! static dictionaries and edit-distance machinery that back both.

pub mod classifier;
pub mod domains;
pub mod levenshtein;

// Re-export commonly used types
pub use classifier::*;
pub use domains::*;
pub use levenshtein::*;
