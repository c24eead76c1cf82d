// Public modules
pub mod config;
pub mod error;
pub mod output;
pub mod pass;
pub mod substitution;
pub mod walk;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{BatchResult, BatchResultItem};
