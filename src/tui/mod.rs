//! Terminal front end: event loop, layout, and the renderers for each screen.

pub mod app;
pub mod events;
pub mod layout;
pub mod services;
pub mod sidebar;
pub mod theme;
pub mod views;
