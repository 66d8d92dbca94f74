pub mod auth;
pub mod config;
pub mod error;
pub mod inquiry;
pub mod parent_dna;
pub mod store;

// Re-export common error type
pub use error::{PdnaError, Result};
