//! Search results: campaign matches and note matches side by side.
//!
//! Each pane fills in on its own; Tab moves between them.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::models::{CampaignId, NoteId};
use crate::core::view::{ListView, SearchCampaignItem, SearchNoteItem, SearchView};
use crate::tui::theme;

use super::{placeholder, scroll_to, ListCursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPane {
    #[default]
    Campaigns,
    Notes,
}

impl SearchPane {
    pub fn toggle(self) -> Self {
        match self {
            SearchPane::Campaigns => SearchPane::Notes,
            SearchPane::Notes => SearchPane::Campaigns,
        }
    }
}

/// What Enter on the current result should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchSelection {
    Campaign(CampaignId),
    Note {
        id: NoteId,
        campaign_name: Option<String>,
    },
}

#[derive(Debug, Default)]
pub struct SearchViewState {
    pub pane: SearchPane,
    campaigns: ListCursor,
    notes: ListCursor,
    campaigns_scroll: usize,
    notes_scroll: usize,
}

impl SearchViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh results: back to the top of the campaign pane.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn select_next(&mut self, view: &SearchView) {
        match self.pane {
            SearchPane::Campaigns => self.campaigns.select_next(view.campaigns.len()),
            SearchPane::Notes => self.notes.select_next(view.notes.len()),
        }
    }

    pub fn select_prev(&mut self) {
        match self.pane {
            SearchPane::Campaigns => self.campaigns.select_prev(),
            SearchPane::Notes => self.notes.select_prev(),
        }
    }

    pub fn selection(&self, view: &SearchView) -> Option<SearchSelection> {
        match self.pane {
            SearchPane::Campaigns => view
                .campaigns
                .items()
                .get(self.campaigns.selected)
                .map(|c| SearchSelection::Campaign(c.id)),
            SearchPane::Notes => view.notes.items().get(self.notes.selected).map(|n| {
                SearchSelection::Note {
                    id: n.id,
                    campaign_name: n.campaign_name.clone(),
                }
            }),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, view: &SearchView, focused: bool) {
        let cols =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area);

        self.campaigns.clamp(view.campaigns.len());
        self.notes.clamp(view.notes.len());

        let campaigns_focused = focused && self.pane == SearchPane::Campaigns;
        let block = theme::block("Campaigns", campaigns_focused);
        let inner = block.inner(cols[0]);
        frame.render_widget(block, cols[0]);
        let lines = campaign_lines(&view.campaigns, self.campaigns.selected, campaigns_focused);
        self.campaigns_scroll = scroll_to(
            self.campaigns.selected * 4 + 2,
            self.campaigns_scroll,
            inner.height as usize,
        );
        frame.render_widget(
            Paragraph::new(lines).scroll((self.campaigns_scroll as u16, 0)),
            inner,
        );

        let notes_focused = focused && self.pane == SearchPane::Notes;
        let title = format!("Notes matching \"{}\"", view.term);
        let block = theme::block(&title, notes_focused);
        let inner = block.inner(cols[1]);
        frame.render_widget(block, cols[1]);
        let lines = note_lines(&view.notes, self.notes.selected, notes_focused);
        self.notes_scroll = scroll_to(
            self.notes.selected * 4 + 3,
            self.notes_scroll,
            inner.height as usize,
        );
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .scroll((self.notes_scroll as u16, 0)),
            inner,
        );
    }
}

fn marker(selected: bool) -> Span<'static> {
    Span::styled(if selected { "▸ " } else { "  " }, theme::key_hint())
}

fn campaign_lines(
    campaigns: &ListView<SearchCampaignItem>,
    selected: usize,
    focused: bool,
) -> Vec<Line<'static>> {
    if let Some(lines) = placeholder(campaigns) {
        return lines;
    }

    let mut lines = Vec::with_capacity(campaigns.len() * 4);
    for (i, c) in campaigns.items().iter().enumerate() {
        let is_selected = focused && i == selected;
        let name_style = if is_selected { theme::selected() } else { theme::title() };
        lines.push(Line::from(vec![
            marker(is_selected),
            Span::styled(c.name.clone(), name_style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(c.description.clone(), theme::text()),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(c.meta.clone(), theme::dim()),
        ]));
        lines.push(Line::raw(""));
    }
    lines
}

fn note_lines(
    notes: &ListView<SearchNoteItem>,
    selected: usize,
    focused: bool,
) -> Vec<Line<'static>> {
    if let Some(lines) = placeholder(notes) {
        return lines;
    }

    let mut lines = Vec::with_capacity(notes.len() * 4);
    for (i, n) in notes.items().iter().enumerate() {
        let is_selected = focused && i == selected;
        let title_style = if is_selected { theme::selected() } else { theme::title() };
        lines.push(Line::from(vec![
            marker(is_selected),
            Span::styled(n.title.clone(), title_style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(n.campaign.clone(), theme::muted()),
            Span::styled(" • ", theme::dim()),
            Span::styled(n.created.clone(), theme::muted()),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(n.preview.clone(), theme::text()),
        ]));
        lines.push(Line::raw(""));
    }
    lines
}
