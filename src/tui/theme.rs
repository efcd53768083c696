//! Colors and styles for the notes TUI.
//!
//! All colors are RGB truecolor. Views import from here instead of using
//! inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::state::NoticeLevel;

// ── Palette ─────────────────────────────────────────────────────────────────

/// Parchment gold: titles, active items.
pub const PRIMARY: Color = Color::Rgb(0xD4, 0xA0, 0x17);
/// Pale gold: key hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0xE8, 0xC5, 0x6B);
/// Dragon red: calls to action, highlighted notes.
pub const ACCENT: Color = Color::Rgb(0xC0, 0x39, 0x2B);

/// Base background.
pub const BG_BASE: Color = Color::Rgb(0x1B, 0x14, 0x10);
/// Elevated panels: selected rows, highlighted cards.
pub const BG_SURFACE: Color = Color::Rgb(0x2E, 0x23, 0x1C);

pub const TEXT: Color = Color::Rgb(0xEA, 0xE0, 0xD0);
pub const TEXT_MUTED: Color = Color::Rgb(0x9A, 0x8C, 0x7A);
pub const TEXT_DIM: Color = Color::Rgb(0x5E, 0x54, 0x48);

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);

// ── Style helpers ───────────────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn heading() -> Style {
    Style::default().fg(PRIMARY_LIGHT).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Row under the cursor.
pub fn selected() -> Style {
    Style::default()
        .fg(TEXT)
        .bg(BG_SURFACE)
        .add_modifier(Modifier::BOLD)
}

/// Note card just opened from search.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn key_hint() -> Style {
    Style::default().fg(PRIMARY_LIGHT)
}

pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn connection_badge(connected: bool) -> Style {
    let bg = if connected { SUCCESS } else { ERROR };
    Style::default()
        .fg(BG_BASE)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

/// Icon and color for a notice level.
pub fn notice(level: NoticeLevel) -> (&'static str, Color) {
    match level {
        NoticeLevel::Success => ("✓", SUCCESS),
        NoticeLevel::Warning => ("⚠", WARNING),
        NoticeLevel::Error => ("✗", ERROR),
    }
}

// ── Block builders ──────────────────────────────────────────────────────────

pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}

/// Focused or default block, by flag.
pub fn block(title: &str, focused: bool) -> Block<'_> {
    if focused {
        block_focused(title)
    } else {
        block_default(title)
    }
}
