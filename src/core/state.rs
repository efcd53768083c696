//! Application state container.
//!
//! Owned by [`Controller`](super::controller::Controller); everything
//! outside `core` reads it through accessors and changes it through
//! controller methods.

use std::time::Instant;

use super::editor::{InputBuffer, TextEditor};
use super::models::{Campaign, CampaignId, Note, NoteId};

// ============================================================================
// Screens
// ============================================================================

/// The three mutually exclusive screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    CampaignDetail(CampaignId),
    SearchResults(String),
}

/// Progress of a collection fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Never requested.
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// A result pane that fills in independently of its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pane<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Pane<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Pane::Loading)
    }
}

/// Both result panes of one search submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub term: String,
    pub campaigns: Pane<Vec<Campaign>>,
    pub notes: Pane<Vec<Note>>,
}

// ============================================================================
// Notices & highlight
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Transient message. A new notice replaces the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub expires_at: Instant,
}

/// A note drawn with emphasis until `expires_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub note_id: NoteId,
    pub expires_at: Instant,
}

/// Note to highlight once the given campaign's notes arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingFocus {
    pub campaign_id: CampaignId,
    pub note_id: NoteId,
}

// ============================================================================
// Forms
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct CampaignForm {
    pub name: InputBuffer,
    pub description: TextEditor,
    pub submitting: bool,
}

impl CampaignForm {
    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Creating..."
        } else {
            "Create"
        }
    }
}

/// New-note form. The body lives in [`AppState::editor`], which outlives
/// the form the way the embedded editor widget does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub campaign_id: Option<CampaignId>,
    pub title: InputBuffer,
    pub submitting: bool,
}

impl NoteForm {
    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Saving..."
        } else {
            "Save"
        }
    }
}

// ============================================================================
// Request sequencing
// ============================================================================

/// Logical request slots. Only the newest request per slot may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Campaigns,
    Notes,
    SearchNotes,
}

impl Slot {
    fn index(self) -> usize {
        match self {
            Slot::Campaigns => 0,
            Slot::Notes => 1,
            Slot::SearchNotes => 2,
        }
    }
}

/// Hands out increasing sequence numbers and remembers the newest per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    next: u64,
    latest: [u64; 3],
}

impl RequestTracker {
    pub fn issue(&mut self, slot: Slot) -> u64 {
        self.next += 1;
        self.latest[slot.index()] = self.next;
        self.next
    }

    pub fn is_current(&self, slot: Slot, seq: u64) -> bool {
        self.latest[slot.index()] == seq
    }
}

// ============================================================================
// AppState
// ============================================================================

/// Everything the screens are drawn from.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) screen: Screen,
    pub(crate) current_campaign_id: Option<CampaignId>,
    pub(crate) campaigns: Vec<Campaign>,
    pub(crate) campaigns_status: LoadStatus,
    pub(crate) notes: Vec<Note>,
    pub(crate) notes_status: LoadStatus,
    /// Campaign the note collection was fetched for.
    pub(crate) notes_campaign_id: Option<CampaignId>,
    pub(crate) connected: bool,
    pub(crate) search_input: InputBuffer,
    pub(crate) search: Option<SearchState>,
    pub(crate) campaign_form: Option<CampaignForm>,
    pub(crate) note_form: Option<NoteForm>,
    pub(crate) editor: TextEditor,
    pub(crate) notice: Option<Notice>,
    pub(crate) highlight: Option<Highlight>,
    pub(crate) pending_focus: Option<PendingFocus>,
    pub(crate) requests: RequestTracker,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Welcome,
            current_campaign_id: None,
            campaigns: Vec::new(),
            campaigns_status: LoadStatus::Idle,
            notes: Vec::new(),
            notes_status: LoadStatus::Idle,
            notes_campaign_id: None,
            connected: false,
            search_input: InputBuffer::new(),
            search: None,
            campaign_form: None,
            note_form: None,
            editor: TextEditor::new(),
            notice: None,
            highlight: None,
            pending_focus: None,
            requests: RequestTracker::default(),
        }
    }
}

impl AppState {
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn current_campaign_id(&self) -> Option<CampaignId> {
        self.current_campaign_id
    }

    pub fn current_campaign(&self) -> Option<&Campaign> {
        self.current_campaign_id.and_then(|id| self.campaign(id))
    }

    pub fn campaign(&self, id: CampaignId) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn campaign_by_name(&self, name: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.name == name)
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn campaigns_status(&self) -> &LoadStatus {
        &self.campaigns_status
    }

    /// Notes of the selected campaign. Empty until the fetch for the current
    /// selection has landed.
    pub fn notes(&self) -> &[Note] {
        if self.notes_campaign_id.is_some() && self.notes_campaign_id == self.current_campaign_id {
            &self.notes
        } else {
            &[]
        }
    }

    pub fn notes_status(&self) -> &LoadStatus {
        &self.notes_status
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn search_input(&self) -> &InputBuffer {
        &self.search_input
    }

    pub fn search(&self) -> Option<&SearchState> {
        self.search.as_ref()
    }

    pub fn campaign_form(&self) -> Option<&CampaignForm> {
        self.campaign_form.as_ref()
    }

    pub fn note_form(&self) -> Option<&NoteForm> {
        self.note_form.as_ref()
    }

    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// The new-note affordance is live only for a selection that still
    /// exists in the campaign list.
    pub fn can_create_note(&self) -> bool {
        self.current_campaign().is_some()
    }
}
