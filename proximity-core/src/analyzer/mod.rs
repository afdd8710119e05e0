//! Key analysis.
//!
//! - **Folding**: Case-insensitive keys for cities, countries and, optionally, names

pub mod folding;

pub use folding::CaseFolder;
