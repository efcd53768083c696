//! Welcome screen shown when no campaign is selected.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::view::ViewModel;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, vm: &ViewModel, focused: bool) {
    let block = theme::block("Welcome", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(build_lines(vm)).alignment(Alignment::Center),
        inner,
    );
}

fn build_lines(vm: &ViewModel) -> Vec<Line<'static>> {
    let hint = |key: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(key, theme::key_hint()),
            Span::styled(format!("  {text}"), theme::muted()),
        ])
    };

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled("TTRPG Session Notes", theme::title())),
        Line::raw(""),
        Line::from(Span::styled(
            "Keep a log of every session, campaign by campaign.",
            theme::text(),
        )),
        Line::raw(""),
    ];

    if vm.campaigns.is_empty() {
        lines.push(Line::from(Span::styled(
            "Start by creating a campaign.",
            theme::heading(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Pick a campaign from the list to see its notes.",
            theme::heading(),
        )));
    }
    lines.push(Line::raw(""));

    lines.push(hint("j/k Enter", "choose a campaign"));
    lines.push(hint("c", "new campaign"));
    lines.push(hint("Ctrl+N", "new note"));
    lines.push(hint("/", "search campaigns and notes"));
    lines.push(hint("?", "all keys"));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(vm.new_note.hint.clone(), theme::dim())));

    lines
}
