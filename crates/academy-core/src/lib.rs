pub mod analytics;
pub mod auth;
pub mod config;
pub mod delivery;
pub mod error;
pub mod format;
pub mod ordering;
pub mod quiz;
pub mod session;
pub mod track;
pub mod video;

// Re-export common error type
pub use error::{AcademyError, Result};
