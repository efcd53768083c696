//! Client core: API access, state, controller and view projection.
//!
//! Nothing in here touches the terminal; the `tui` module renders what
//! [`view::project`] produces and feeds key presses back as controller calls.

pub mod api;
pub mod controller;
pub mod editor;
pub mod format;
pub mod logging;
pub mod models;
pub mod search;
pub mod state;
pub mod view;
