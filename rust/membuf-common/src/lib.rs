//! Error definitions and argument validation shared by all membuf-* crates.

pub mod error;
pub mod result;

pub use result::Result;
