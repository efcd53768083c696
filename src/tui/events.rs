//! Events, actions and key mapping for the event loop.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::controller::Outcome;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for notice and highlight expiry.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// A backend command finished.
    Outcome(Outcome),
}

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFocus {
    /// Navigation keys; no text field focused.
    Browse,
    Search,
    CampaignName,
    CampaignDescription,
    NoteCampaign,
    NoteTitle,
    NoteBody,
}

impl InputFocus {
    pub const CAMPAIGN_FORM: [InputFocus; 2] =
        [InputFocus::CampaignName, InputFocus::CampaignDescription];

    pub const NOTE_FORM: [InputFocus; 3] = [
        InputFocus::NoteCampaign,
        InputFocus::NoteTitle,
        InputFocus::NoteBody,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InputFocus::Browse => "BROWSE",
            InputFocus::Search => "SEARCH",
            InputFocus::CampaignName | InputFocus::CampaignDescription => "CAMPAIGN",
            InputFocus::NoteCampaign | InputFocus::NoteTitle | InputFocus::NoteBody => "NOTE",
        }
    }

    /// Multi-line areas that take raw key events.
    pub fn is_text_area(self) -> bool {
        matches!(self, InputFocus::CampaignDescription | InputFocus::NoteBody)
    }

    pub fn in_campaign_form(self) -> bool {
        Self::CAMPAIGN_FORM.contains(&self)
    }

    pub fn in_note_form(self) -> bool {
        Self::NOTE_FORM.contains(&self)
    }

    /// Next field within the same form, wrapping.
    pub fn next_field(self) -> Self {
        Self::step(self, 1)
    }

    pub fn prev_field(self) -> Self {
        Self::step(self, -1)
    }

    fn step(self, delta: isize) -> Self {
        let fields: &[InputFocus] = if self.in_campaign_form() {
            &Self::CAMPAIGN_FORM
        } else if self.in_note_form() {
            &Self::NOTE_FORM
        } else {
            return self;
        };
        let len = fields.len() as isize;
        let idx = fields.iter().position(|f| *f == self).unwrap_or(0) as isize;
        fields[((idx + delta).rem_euclid(len)) as usize]
    }
}

/// Which side of the screen navigation keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Sidebar,
    Main,
}

/// Single-line editing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Application
    Quit,
    ShowHelp,
    CloseHelp,

    // Navigation
    Escape,
    FocusSidebar,
    FocusMain,
    SelectNext,
    SelectPrev,
    Activate,
    NextField,
    PrevField,
    Refresh,

    // Search
    FocusSearch,
    SubmitSearch,

    // Forms
    OpenCampaignForm,
    SubmitCampaignForm,
    OpenNoteForm,
    SaveNote,
    CycleNoteCampaign { forward: bool },
    Edit(EditOp),
    /// Key handed to the focused text area as-is.
    TextInput(KeyEvent),
}

/// Map a key press to an action for the given focus.
pub fn map_key(focus: InputFocus, key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Bindings that work everywhere
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Some(Action::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('s'))
        | (KeyModifiers::CONTROL, KeyCode::Enter) => return Some(Action::SaveNote),
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => return Some(Action::OpenNoteForm),
        (_, KeyCode::Esc) => return Some(Action::Escape),
        (_, KeyCode::Tab) => return Some(Action::NextField),
        (_, KeyCode::BackTab) => return Some(Action::PrevField),
        _ => {}
    }

    match focus {
        InputFocus::Browse => map_browse_key(key),
        InputFocus::NoteCampaign => match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('h') => {
                Some(Action::CycleNoteCampaign { forward: false })
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('l') => {
                Some(Action::CycleNoteCampaign { forward: true })
            }
            KeyCode::Enter => Some(Action::NextField),
            _ => None,
        },
        area if area.is_text_area() => Some(Action::TextInput(*key)),
        text => map_text_key(text, key),
    }
}

fn map_browse_key(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::ShowHelp),
            KeyCode::Char('/') => Some(Action::FocusSearch),
            KeyCode::Char('c') => Some(Action::OpenCampaignForm),
            KeyCode::Char('n') => Some(Action::OpenNoteForm),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::FocusSidebar),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::FocusMain),
            KeyCode::Enter => Some(Action::Activate),
            _ => None,
        },
        _ => None,
    }
}

fn map_text_key(focus: InputFocus, key: &KeyEvent) -> Option<Action> {
    let edit = |op| Some(Action::Edit(op));
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => match focus {
            InputFocus::Search => Some(Action::SubmitSearch),
            InputFocus::CampaignName => Some(Action::SubmitCampaignForm),
            _ => Some(Action::NextField),
        },
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => edit(EditOp::Insert(c)),
        (_, KeyCode::Backspace) => edit(EditOp::Backspace),
        (_, KeyCode::Delete) => edit(EditOp::Delete),
        (_, KeyCode::Left) => edit(EditOp::Left),
        (_, KeyCode::Right) => edit(EditOp::Right),
        (_, KeyCode::Home) => edit(EditOp::Home),
        (_, KeyCode::End) => edit(EditOp::End),
        _ => None,
    }
}
