//! Render-ready projection of [`AppState`].
//!
//! [`project`] is pure: given the state and a clock it returns plain data the
//! terminal renderer draws without consulting state again.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};

use super::format::{format_timestamp_at, html_to_lines, preview, DEFAULT_PREVIEW_CHARS};
use super::models::{CampaignId, NoteId};
use super::state::{AppState, LoadStatus, NoticeLevel, Pane, Screen, SearchState};

const NO_DESCRIPTION: &str = "No description";
const NO_CAMPAIGNS: &str = "No campaigns yet. Create your first campaign!";
const NO_NOTES: &str = "No notes yet. Press Ctrl+N to start!";
const LOADING_CAMPAIGNS: &str = "Loading campaigns...";
const LOADING_NOTES: &str = "Loading notes...";
const SEARCHING: &str = "Searching...";

#[derive(Debug, Clone, Copy)]
pub struct ViewOptions<Tz = Local> {
    pub now: DateTime<Utc>,
    /// Zone for clock times, and for backend timestamps without an offset.
    pub tz: Tz,
    pub preview_chars: usize,
}

impl<Tz: TimeZone> ViewOptions<Tz> {
    pub fn in_zone(now: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            now,
            tz,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::in_zone(Utc::now(), Local)
    }
}

/// A list pane: one of the three placeholder states, or its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<T> {
    Loading(String),
    Failed(String),
    Empty(String),
    Items(Vec<T>),
}

impl<T> ListView<T> {
    fn from_items(items: Vec<T>, empty: impl Into<String>) -> Self {
        if items.is_empty() {
            ListView::Empty(empty.into())
        } else {
            ListView::Items(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListView::Items(items) => items,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignItem {
    pub id: CampaignId,
    pub name: String,
    pub description: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub id: NoteId,
    pub title: String,
    pub created: String,
    pub campaign: String,
    /// Content as text lines, one per paragraph.
    pub body: Vec<String>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCampaignItem {
    pub id: CampaignId,
    pub name: String,
    pub description: String,
    pub meta: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNoteItem {
    pub id: NoteId,
    pub title: String,
    pub campaign_name: Option<String>,
    pub campaign: String,
    pub created: String,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDetailView {
    pub id: CampaignId,
    pub name: String,
    pub description: String,
    pub notes: ListView<NoteCard>,
    pub note_count: usize,
    /// Index of the highlighted note, for scrolling it into view.
    pub focused_note: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub term: String,
    pub campaigns: ListView<SearchCampaignItem>,
    pub notes: ListView<SearchNoteItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainView {
    Welcome,
    Campaign(CampaignDetailView),
    Search(SearchView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNoteAffordance {
    pub enabled: bool,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignFormView {
    pub name: String,
    pub name_cursor: usize,
    pub submit_label: &'static str,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFormView {
    pub campaign: Option<String>,
    pub title: String,
    pub title_cursor: usize,
    pub submit_label: &'static str,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub message: String,
    pub level: NoticeLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub connected: bool,
    pub connection_label: &'static str,
    pub search_input: String,
    pub search_cursor: usize,
    pub campaigns: ListView<CampaignItem>,
    pub main: MainView,
    pub new_note: NewNoteAffordance,
    pub campaign_form: Option<CampaignFormView>,
    pub note_form: Option<NoteFormView>,
    pub notice: Option<NoticeView>,
}

pub fn project<Tz>(state: &AppState, options: &ViewOptions<Tz>) -> ViewModel
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let connected = state.is_connected();
    ViewModel {
        connected,
        connection_label: if connected { "Connected" } else { "Disconnected" },
        search_input: state.search_input().text().to_string(),
        search_cursor: state.search_input().cursor_position(),
        campaigns: campaign_list(state),
        main: main_view(state, options),
        new_note: new_note_affordance(state),
        campaign_form: state.campaign_form().map(|form| CampaignFormView {
            name: form.name.text().to_string(),
            name_cursor: form.name.cursor_position(),
            submit_label: form.submit_label(),
            submitting: form.submitting,
        }),
        note_form: state.note_form().map(|form| NoteFormView {
            campaign: form
                .campaign_id
                .and_then(|id| state.campaign(id))
                .map(|c| c.name.clone()),
            title: form.title.text().to_string(),
            title_cursor: form.title.cursor_position(),
            submit_label: form.submit_label(),
            submitting: form.submitting,
        }),
        notice: state.notice().map(|n| NoticeView {
            message: n.message.clone(),
            level: n.level,
        }),
    }
}

fn campaign_list(state: &AppState) -> ListView<CampaignItem> {
    if let LoadStatus::Failed(message) = state.campaigns_status() {
        return ListView::Failed(message.clone());
    }
    if state.campaigns().is_empty() && matches!(state.campaigns_status(), LoadStatus::Loading) {
        return ListView::Loading(LOADING_CAMPAIGNS.to_string());
    }

    let current = state.current_campaign_id();
    let items = state
        .campaigns()
        .iter()
        .map(|c| CampaignItem {
            id: c.id,
            name: c.name.clone(),
            description: c.description_text().unwrap_or(NO_DESCRIPTION).to_string(),
            active: current == Some(c.id),
        })
        .collect();
    ListView::from_items(items, NO_CAMPAIGNS)
}

fn main_view<Tz>(state: &AppState, options: &ViewOptions<Tz>) -> MainView
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match state.screen() {
        Screen::Welcome => MainView::Welcome,
        Screen::CampaignDetail(id) => match state.campaign(*id) {
            Some(_) => MainView::Campaign(campaign_detail(state, *id, options)),
            None => MainView::Welcome,
        },
        Screen::SearchResults(_) => match state.search() {
            Some(search) => MainView::Search(search_view(search, options)),
            None => MainView::Welcome,
        },
    }
}

fn campaign_detail<Tz>(
    state: &AppState,
    id: CampaignId,
    options: &ViewOptions<Tz>,
) -> CampaignDetailView
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let (name, description) = state
        .campaign(id)
        .map(|c| {
            (
                c.name.clone(),
                c.description_text().unwrap_or(NO_DESCRIPTION).to_string(),
            )
        })
        .unwrap_or_default();

    let notes = state.notes();
    let total = notes.len();
    let highlighted = state.highlight().map(|h| h.note_id);

    let cards: Vec<NoteCard> = notes
        .iter()
        .enumerate()
        .map(|(index, note)| NoteCard {
            id: note.id,
            title: note
                .title_text()
                .map(String::from)
                .unwrap_or_else(|| format!("Session {}", total - index)),
            created: format_timestamp_at(note.created_at.as_deref(), options.now, &options.tz),
            campaign: format!("Campaign: {}", note.campaign_name.as_deref().unwrap_or("N/A")),
            body: html_to_lines(&note.content),
            highlighted: highlighted == Some(note.id),
        })
        .collect();
    let focused_note = cards.iter().position(|c| c.highlighted);

    let notes = match state.notes_status() {
        LoadStatus::Loading => ListView::Loading(LOADING_NOTES.to_string()),
        LoadStatus::Failed(message) => ListView::Failed(message.clone()),
        _ => ListView::from_items(cards, NO_NOTES),
    };

    CampaignDetailView {
        id,
        name,
        description,
        note_count: total,
        notes,
        focused_note,
    }
}

fn search_view<Tz>(search: &SearchState, options: &ViewOptions<Tz>) -> SearchView
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let term = search.term.clone();

    let campaigns = match &search.campaigns {
        Pane::Loading => ListView::Loading(SEARCHING.to_string()),
        Pane::Failed(message) => ListView::Failed(message.clone()),
        Pane::Ready(found) => ListView::from_items(
            found
                .iter()
                .map(|c| SearchCampaignItem {
                    id: c.id,
                    name: c.name.clone(),
                    description: c.description_text().unwrap_or(NO_DESCRIPTION).to_string(),
                    meta: format!(
                        "ID: {} • Created {}",
                        c.id,
                        format_timestamp_at(c.created_at.as_deref(), options.now, &options.tz)
                    ),
                })
                .collect(),
            format!("No campaigns found for \"{term}\""),
        ),
    };

    let notes = match &search.notes {
        Pane::Loading => ListView::Loading(SEARCHING.to_string()),
        Pane::Failed(message) => ListView::Failed(message.clone()),
        Pane::Ready(found) => ListView::from_items(
            found
                .iter()
                .map(|n| SearchNoteItem {
                    id: n.id,
                    title: n.title_text().unwrap_or("Untitled").to_string(),
                    campaign_name: n.campaign_name.clone(),
                    campaign: format!("Campaign: {}", n.campaign_name.as_deref().unwrap_or("N/A")),
                    created: format_timestamp_at(n.created_at.as_deref(), options.now, &options.tz),
                    preview: preview(&n.content, options.preview_chars),
                })
                .collect(),
            format!("No notes found for \"{term}\""),
        ),
    };

    SearchView {
        term,
        campaigns,
        notes,
    }
}

fn new_note_affordance(state: &AppState) -> NewNoteAffordance {
    match (state.current_campaign_id(), state.current_campaign()) {
        (_, Some(campaign)) => NewNoteAffordance {
            enabled: true,
            hint: format!("Create a new note for {}", campaign.name),
        },
        (Some(_), None) => NewNoteAffordance {
            enabled: false,
            hint: "Select a valid campaign first".to_string(),
        },
        (None, None) => NewNoteAffordance {
            enabled: false,
            hint: "Select a campaign first".to_string(),
        },
    }
}
