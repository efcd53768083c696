//! Crate-level test suite
//!
//! - `common`: campaign/note fixtures and mock service builders
//! - `unit`: controller flows driven against a mocked notes service
//! - `property`: proptest invariants for search and formatting

mod common;
mod property;
mod unit;
