//! Common Test Utilities
//!
//! Shared fixtures used across test modules:
//! - Campaign and note records (`fixtures`)
//! - Mock notes service builders and pre-started controllers


pub use fixtures::*;
