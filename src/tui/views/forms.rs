//! Modal forms: new campaign and new note.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use ratatui_textarea::TextArea;

use crate::core::view::{CampaignFormView, NoteFormView};
use crate::tui::events::InputFocus;
use crate::tui::layout::centered_rect;
use crate::tui::theme;

/// Column of a byte cursor within `text`, counted in chars.
fn column(text: &str, cursor: usize) -> u16 {
    text.get(..cursor).unwrap_or(text).chars().count() as u16
}

fn submit_line(label: &'static str, submitting: bool, keys: &'static str) -> Line<'static> {
    let style = if submitting {
        theme::dim()
    } else {
        theme::brand_badge()
    };
    Line::from(vec![
        Span::styled(format!(" {label} "), style),
        Span::raw("  "),
        Span::styled(keys, theme::key_hint()),
        Span::styled(" submit  ", theme::dim()),
        Span::styled("Esc", theme::key_hint()),
        Span::styled(" cancel  ", theme::dim()),
        Span::styled("Tab", theme::key_hint()),
        Span::styled(" next field", theme::dim()),
    ])
}

fn single_line_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    text: &str,
    cursor: usize,
    focused: bool,
) {
    let block = theme::block(label, focused);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(text.to_string()).block(block), area);
    if focused {
        let col = column(text, cursor).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + col, inner.y));
    }
}

/// Copy of `textarea` dressed for drawing; the cursor only shows while focused.
fn styled_text_area(
    label: &'static str,
    textarea: &TextArea<'static>,
    focused: bool,
) -> TextArea<'static> {
    let mut area = textarea.clone();
    area.set_block(theme::block(label, focused));
    area.set_style(theme::text());
    area.set_cursor_line_style(Style::default());
    if !focused {
        area.set_cursor_style(Style::default());
    }
    area
}

pub fn render_campaign_form(
    frame: &mut Frame,
    area: Rect,
    form: &CampaignFormView,
    description: &TextArea<'static>,
    focus: InputFocus,
) {
    let modal = centered_rect(60, 50, area);
    frame.render_widget(Clear, modal);

    let block = theme::block_focused("New Campaign");
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(inner);

    single_line_field(
        frame,
        rows[0],
        "Name",
        &form.name,
        form.name_cursor,
        focus == InputFocus::CampaignName,
    );
    let description = styled_text_area(
        "Description",
        description,
        focus == InputFocus::CampaignDescription,
    );
    frame.render_widget(&description, rows[1]);
    frame.render_widget(
        Paragraph::new(submit_line(form.submit_label, form.submitting, "Enter")),
        rows[2],
    );
}

pub fn render_note_form(
    frame: &mut Frame,
    area: Rect,
    form: &NoteFormView,
    body: &TextArea<'static>,
    focus: InputFocus,
) {
    let modal = centered_rect(80, 80, area);
    frame.render_widget(Clear, modal);

    let block = theme::block_focused("New Note");
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(inner);

    let picker_focused = focus == InputFocus::NoteCampaign;
    frame.render_widget(
        Paragraph::new(campaign_picker_line(form.campaign.as_deref(), picker_focused))
            .block(theme::block("Campaign", picker_focused)),
        rows[0],
    );

    single_line_field(
        frame,
        rows[1],
        "Title",
        &form.title,
        form.title_cursor,
        focus == InputFocus::NoteTitle,
    );

    let body = styled_text_area("Content", body, focus == InputFocus::NoteBody);
    frame.render_widget(&body, rows[2]);

    frame.render_widget(
        Paragraph::new(submit_line(form.submit_label, form.submitting, "Ctrl+S")),
        rows[3],
    );
}

fn campaign_picker_line(campaign: Option<&str>, focused: bool) -> Line<'static> {
    let (name, style) = match campaign {
        Some(name) => (name.to_string(), theme::title()),
        None => ("Select a campaign".to_string(), theme::dim()),
    };
    let arrows = if focused { theme::key_hint() } else { theme::dim() };
    Line::from(vec![
        Span::styled("◂ ", arrows),
        Span::styled(name, style),
        Span::styled(" ▸", arrows),
    ])
    .alignment(Alignment::Left)
}
