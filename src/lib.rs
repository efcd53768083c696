//! TTRPG Notes - terminal client for a campaign session-notes service.
//!
//! Core library providing the notes API client, the screen controller and
//! its state, client-side search, and the ratatui front end.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
