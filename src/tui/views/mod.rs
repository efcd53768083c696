//! Screen renderers. Each view turns a piece of the
//! [`ViewModel`](crate::core::view::ViewModel) into lines and draws them.

pub mod campaign;
pub mod forms;
pub mod search;
pub mod welcome;

use ratatui::text::{Line, Span};

use crate::core::view::ListView;

use super::theme;

/// Selection within a list whose length changes under it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    pub selected: usize,
}

impl ListCursor {
    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the cursor inside a list of `len` items.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

/// Lines for a pane that has no items to show, or `None` when it does.
pub fn placeholder<T>(list: &ListView<T>) -> Option<Vec<Line<'static>>> {
    let (message, style) = match list {
        ListView::Items(_) => return None,
        ListView::Loading(m) => (m, theme::muted()),
        ListView::Empty(m) => (m, theme::dim()),
        ListView::Failed(m) => (m, ratatui::style::Style::default().fg(theme::ERROR)),
    };
    Some(vec![
        Line::raw(""),
        Line::from(vec![Span::raw("  "), Span::styled(message.clone(), style)]),
    ])
}

/// Scroll offset that keeps `line` visible in a window of `height` rows.
pub fn scroll_to(line: usize, current: usize, height: usize) -> usize {
    if height == 0 {
        current
    } else if line >= current + height {
        line + 1 - height
    } else if line < current {
        line
    } else {
        current
    }
}
