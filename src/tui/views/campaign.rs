//! Campaign detail: header, note counter and the note cards, newest first.
//!
//! A note opened from search is drawn highlighted and scrolled into view.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::view::{CampaignDetailView, ListView, NewNoteAffordance, NoteCard};
use crate::tui::theme;

use super::{placeholder, scroll_to, ListCursor};

/// Scroll state for the note list.
#[derive(Debug, Default)]
pub struct CampaignViewState {
    pub cursor: ListCursor,
    scroll: usize,
    /// Highlighted note already scrolled to, so the cursor is free to move.
    followed: Option<i64>,
}

impl CampaignViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget cursor and scroll, e.g. after switching campaigns.
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.scroll = 0;
        self.followed = None;
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        detail: &CampaignDetailView,
        new_note: &NewNoteAffordance,
        focused: bool,
    ) {
        let block = theme::block(&detail.name, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(inner);
        frame.render_widget(
            Paragraph::new(header_lines(detail, new_note)).wrap(Wrap { trim: true }),
            rows[0],
        );

        if let Some(lines) = placeholder(&detail.notes) {
            frame.render_widget(Paragraph::new(lines), rows[1]);
            return;
        }

        // Jump to a freshly highlighted note once
        if let Some(index) = detail.focused_note {
            if let Some(card) = detail.notes.items().get(index) {
                if self.followed != Some(card.id) {
                    self.cursor.selected = index;
                    self.followed = Some(card.id);
                }
            }
        }
        self.cursor.clamp(detail.notes.len());

        let (lines, starts) = build_cards(&detail.notes, self.cursor.selected, focused);
        let height = rows[1].height as usize;
        let start = starts.get(self.cursor.selected).copied().unwrap_or(0);
        let end = starts
            .get(self.cursor.selected + 1)
            .copied()
            .unwrap_or(lines.len())
            .saturating_sub(1);
        self.scroll = scroll_to(end, self.scroll, height);
        self.scroll = scroll_to(start, self.scroll, height);

        frame.render_widget(
            Paragraph::new(lines).scroll((self.scroll as u16, 0)),
            rows[1],
        );
    }
}

fn header_lines(detail: &CampaignDetailView, new_note: &NewNoteAffordance) -> Vec<Line<'static>> {
    let counter = match detail.note_count {
        1 => "1 note".to_string(),
        n => format!("{n} notes"),
    };
    let new_note_style = if new_note.enabled {
        theme::key_hint()
    } else {
        theme::dim()
    };

    vec![
        Line::from(Span::styled(detail.description.clone(), theme::muted())),
        Line::from(vec![
            Span::styled(counter, theme::heading()),
            Span::raw("  "),
            Span::styled("Ctrl+N", new_note_style),
            Span::styled(format!(" {}", new_note.hint), theme::dim()),
        ]),
        Line::from(Span::styled("─".repeat(60), theme::dim())),
    ]
}

/// Card lines plus the index of each card's first line.
fn build_cards(
    notes: &ListView<NoteCard>,
    selected: usize,
    focused: bool,
) -> (Vec<Line<'static>>, Vec<usize>) {
    let mut lines = Vec::new();
    let mut starts = Vec::with_capacity(notes.len());

    for (i, card) in notes.items().iter().enumerate() {
        starts.push(lines.len());

        let is_selected = focused && i == selected;
        let marker = if is_selected { "▸ " } else { "  " };
        let title_style = if card.highlighted {
            theme::highlight()
        } else if is_selected {
            theme::selected()
        } else {
            theme::title()
        };
        let bar_style = if card.highlighted {
            Style::default().fg(theme::ACCENT)
        } else {
            theme::dim()
        };

        lines.push(Line::from(vec![
            Span::styled(marker, theme::key_hint()),
            Span::styled(card.title.clone(), title_style),
        ]));
        lines.push(Line::from(vec![
            Span::styled("│ ", bar_style),
            Span::styled(card.created.clone(), theme::muted()),
            Span::styled(" • ", theme::dim()),
            Span::styled(card.campaign.clone(), theme::muted()),
        ]));
        for body_line in &card.body {
            lines.push(Line::from(vec![
                Span::styled("│ ", bar_style),
                Span::styled(body_line.clone(), theme::text()),
            ]));
        }
        lines.push(Line::raw(""));
    }

    (lines, starts)
}
