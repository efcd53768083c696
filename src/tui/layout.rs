//! Root layout: header, campaign sidebar, main content, status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Header rows: title/connection line plus the bordered search box.
pub const HEADER_HEIGHT: u16 = 4;
/// Width of the campaign sidebar.
pub const SIDEBAR_WIDTH: u16 = 30;
/// Hide the sidebar below this terminal width.
pub const HIDE_SIDEBAR_THRESHOLD: u16 = 60;

/// Computed layout regions for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Title line with the connection badge.
    pub title: Rect,
    /// Search input box.
    pub search: Rect,
    /// Campaign list (None if the terminal is too narrow).
    pub sidebar: Option<Rect>,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(1),                 // Title
            Constraint::Length(HEADER_HEIGHT - 1), // Search box
            Constraint::Min(1),                    // Content
            Constraint::Length(1),                 // Status bar
        ])
        .split(area);

        let (sidebar, main) = if area.width < HIDE_SIDEBAR_THRESHOLD {
            (None, rows[2])
        } else {
            let cols = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                .split(rows[2]);
            (Some(cols[0]), cols[1])
        };

        AppLayout {
            title: rows[0],
            search: rows[1],
            sidebar,
            main,
            status: rows[3],
        }
    }
}

/// Calculate a centered rect using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
