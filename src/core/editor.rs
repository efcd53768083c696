//! Text input for form fields and the note editor.
//!
//! [`InputBuffer`] is a single string with a byte cursor kept on char
//! boundaries. [`TextEditor`] wraps a multi-line [`TextArea`] and serializes
//! its lines to the paragraph markup the notes service stores.

use ratatui_textarea::{Input, TextArea};

use super::format::{escape_html, EMPTY_PARAGRAPH};

/// A text input buffer with cursor positioning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            content: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.content.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.content[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Whitespace-only content counts as empty.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn trimmed(&self) -> String {
        self.content.trim().to_string()
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }
}

/// Multi-line editor for the note body and the campaign description.
///
/// Each line becomes a `<p>`; blank lines become `<p><br></p>`, so an
/// untouched editor serializes to [`EMPTY_PARAGRAPH`].
#[derive(Debug, Clone, Default)]
pub struct TextEditor {
    area: TextArea<'static>,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.area
    }

    /// Feed a key event to the text area. Returns whether the text changed.
    pub fn input(&mut self, input: impl Into<Input>) -> bool {
        self.area.input(input)
    }

    /// Insert `text` at the cursor, breaking lines on `\n`.
    pub fn insert_text(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.area.insert_newline();
            }
            self.area.insert_str(line);
        }
    }

    pub fn clear(&mut self) {
        self.area = TextArea::default();
    }

    pub fn lines(&self) -> &[String] {
        self.area.lines()
    }

    /// Cursor as `(row, column)`.
    pub fn cursor(&self) -> (usize, usize) {
        self.area.cursor()
    }

    pub fn text(&self) -> String {
        self.area.lines().join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.area.lines().iter().all(|line| line.trim().is_empty())
    }

    /// The document as paragraph markup.
    pub fn html(&self) -> String {
        if self.is_blank() {
            return EMPTY_PARAGRAPH.to_string();
        }

        self.area
            .lines()
            .iter()
            .map(|line| {
                if line.trim().is_empty() {
                    EMPTY_PARAGRAPH.to_string()
                } else {
                    format!("<p>{}</p>", escape_html(line))
                }
            })
            .collect()
    }
}
