//! Left sidebar listing the cached campaigns.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::view::{CampaignItem, ListView};

use super::theme;
use super::views::{placeholder, scroll_to, ListCursor};

/// Sidebar navigation state.
#[derive(Debug, Default)]
pub struct SidebarState {
    pub cursor: ListCursor,
    scroll: usize,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        campaigns: &ListView<CampaignItem>,
        focused: bool,
    ) {
        let title = format!("Campaigns ({})", campaigns.len());
        let block = theme::block(&title, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.cursor.clamp(campaigns.len());
        let lines = build_lines(campaigns, self.cursor.selected, focused);

        // Two lines per campaign
        let height = inner.height as usize;
        let selected_bottom = self.cursor.selected * 2 + 1;
        self.scroll = scroll_to(selected_bottom, self.scroll, height);
        if selected_bottom < height {
            self.scroll = 0;
        }

        frame.render_widget(Paragraph::new(lines).scroll((self.scroll as u16, 0)), inner);
    }
}

fn build_lines(
    campaigns: &ListView<CampaignItem>,
    selected: usize,
    focused: bool,
) -> Vec<Line<'static>> {
    if let Some(lines) = placeholder(campaigns) {
        return lines;
    }

    let mut lines = Vec::with_capacity(campaigns.len() * 2);
    for (i, campaign) in campaigns.items().iter().enumerate() {
        let is_selected = focused && i == selected;
        let marker = if campaign.active { "● " } else { "  " };

        let name_style = if is_selected {
            theme::selected()
        } else if campaign.active {
            theme::title()
        } else {
            theme::text()
        };

        lines.push(Line::from(vec![
            Span::styled(marker, theme::highlight()),
            Span::styled(campaign.name.clone(), name_style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(campaign.description.clone(), theme::dim()),
        ]));
    }
    lines
}
