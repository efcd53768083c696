//! Screen controller.
//!
//! Owns [`AppState`] and is the only thing that changes it. Intents
//! (navigation, form submission, search) validate input, update state
//! synchronously and return the [`Command`]s to run; outcomes of those
//! commands come back through [`Controller::apply`].

pub mod commands;
pub mod validation;

use std::time::{Duration, Instant};

use futures::future::join_all;

use crate::config::UiConfig;

use super::api::{ApiError, NotesApi};
use super::editor::{InputBuffer, TextEditor};
use super::models::{sort_newest_first, Campaign, CampaignId, Note, NoteId, NotesPage};
use super::search::{search_campaigns, search_notes, SearchTerm};
use super::state::{
    AppState, CampaignForm, Highlight, LoadStatus, Notice, NoticeLevel, NoteForm, Pane,
    PendingFocus, Screen, SearchState, Slot,
};

pub use commands::{execute, Command, Outcome};
pub use validation::ValidationError;

const NO_CONNECTION: &str = "No connection to the API";
const CONNECTION_LOST: &str = "Could not connect to the server";
const CAMPAIGN_NOT_FOUND: &str = "Campaign not found";
const LOAD_CAMPAIGNS_FAILED: &str = "Failed to load campaigns";
const LOAD_NOTES_FAILED: &str = "Failed to load notes";
const SEARCH_CAMPAIGNS_FAILED: &str = "Failed to search campaigns";
const SEARCH_NOTES_FAILED: &str = "Failed to search notes";
const CREATE_CAMPAIGN_FAILED: &str = "Failed to create campaign";
const CREATE_NOTE_FAILED: &str = "Failed to save note";

/// Timings for transient UI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub notice_ttl: Duration,
    pub highlight_ttl: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            notice_ttl: Duration::from_secs(4),
            highlight_ttl: Duration::from_millis(2000),
        }
    }
}

impl From<&UiConfig> for ControllerSettings {
    fn from(ui: &UiConfig) -> Self {
        Self {
            notice_ttl: Duration::from_secs(ui.notice_secs),
            highlight_ttl: Duration::from_millis(ui.highlight_ms),
        }
    }
}

/// Single-line text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Search,
    CampaignName,
    NoteTitle,
}

/// Multi-line text areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    CampaignDescription,
    NoteBody,
}

pub struct Controller {
    state: AppState,
    settings: ControllerSettings,
}

impl Controller {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            state: AppState::default(),
            settings,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    // ── Notices ─────────────────────────────────────────────────────────

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Error => log::warn!("Notice: {message}"),
            _ => log::info!("Notice: {message}"),
        }
        self.state.notice = Some(Notice {
            message,
            level,
            expires_at: Instant::now() + self.settings.notice_ttl,
        });
    }

    /// Drop the notice and the note highlight once they have expired.
    pub fn tick(&mut self, now: Instant) {
        if self.state.notice.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.state.notice = None;
        }
        if self.state.highlight.as_ref().is_some_and(|h| now >= h.expires_at) {
            self.state.highlight = None;
        }
    }

    // ── Loading ─────────────────────────────────────────────────────────

    /// Startup: check the connection; the campaign list follows on success.
    pub fn start(&mut self) -> Vec<Command> {
        log::info!("Starting session");
        vec![Command::CheckConnection]
    }

    /// Periodic connectivity check.
    pub fn check_connection(&mut self) -> Vec<Command> {
        vec![Command::CheckConnection]
    }

    pub fn refresh_campaigns(&mut self) -> Vec<Command> {
        vec![self.load_campaigns()]
    }

    pub fn refresh_notes(&mut self) -> Vec<Command> {
        self.state
            .current_campaign_id
            .and_then(|id| self.load_notes(id))
            .into_iter()
            .collect()
    }

    fn load_campaigns(&mut self) -> Command {
        self.state.campaigns_status = LoadStatus::Loading;
        let seq = self.state.requests.issue(Slot::Campaigns);
        Command::LoadCampaigns { seq }
    }

    /// Start a fresh note fetch for `campaign_id`. The previous collection
    /// is dropped so nothing stale is shown while the request is out.
    fn load_notes(&mut self, campaign_id: CampaignId) -> Option<Command> {
        let campaign_name = self.state.campaign(campaign_id)?.name.clone();

        self.state.notes.clear();
        self.state.notes_campaign_id = None;
        self.state.notes_status = LoadStatus::Loading;
        let seq = self.state.requests.issue(Slot::Notes);

        Some(Command::LoadNotes {
            seq,
            campaign_id,
            campaign_name,
        })
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Welcome/SearchResults → CampaignDetail.
    pub fn select_campaign(&mut self, campaign_id: CampaignId) -> Vec<Command> {
        if self.state.campaign(campaign_id).is_none() {
            self.notify(NoticeLevel::Error, CAMPAIGN_NOT_FOUND);
            return Vec::new();
        }

        log::info!("Selecting campaign {campaign_id}");
        self.state.current_campaign_id = Some(campaign_id);
        self.state.screen = Screen::CampaignDetail(campaign_id);
        self.state.search = None;
        self.state.highlight = None;
        self.state.pending_focus = None;

        self.load_notes(campaign_id).into_iter().collect()
    }

    /// CampaignDetail → Welcome. Clears the selection.
    pub fn show_welcome(&mut self) {
        self.state.screen = Screen::Welcome;
        self.state.current_campaign_id = None;
        self.state.search = None;
        self.state.highlight = None;
        self.state.pending_focus = None;
    }

    /// any → SearchResults. Both panes are requested independently.
    pub fn submit_search(&mut self) -> Vec<Command> {
        let Some(term) = SearchTerm::parse(self.state.search_input.text()) else {
            self.notify(NoticeLevel::Warning, ValidationError::EmptySearchTerm.to_string());
            return Vec::new();
        };

        log::info!("Searching for '{}'", term.as_str());
        let mut commands = Vec::with_capacity(2);

        let campaigns = if self.state.campaigns.is_empty() {
            commands.push(self.load_campaigns());
            Pane::Loading
        } else {
            Pane::Ready(search_campaigns(&self.state.campaigns, &term))
        };

        let seq = self.state.requests.issue(Slot::SearchNotes);
        commands.push(Command::SearchNotes {
            seq,
            term: term.as_str().to_string(),
        });

        self.state.screen = Screen::SearchResults(term.as_str().to_string());
        self.state.search = Some(SearchState {
            term: term.as_str().to_string(),
            campaigns,
            notes: Pane::Loading,
        });

        commands
    }

    /// SearchResults → Welcome. Clears the search input.
    pub fn dismiss_search(&mut self) {
        self.state.search = None;
        self.state.search_input.clear();
        if matches!(self.state.screen, Screen::SearchResults(_)) {
            self.state.screen = Screen::Welcome;
        }
    }

    pub fn select_campaign_from_search(&mut self, campaign_id: CampaignId) -> Vec<Command> {
        self.dismiss_search();
        self.select_campaign(campaign_id)
    }

    /// Open the campaign a note belongs to and highlight the note once the
    /// campaign's notes have loaded.
    pub fn view_note_from_search(
        &mut self,
        note_id: NoteId,
        campaign_name: Option<&str>,
    ) -> Vec<Command> {
        self.dismiss_search();

        let found = campaign_name
            .and_then(|name| self.state.campaign_by_name(name))
            .map(|c| c.id);
        let Some(campaign_id) = found else {
            let name = campaign_name.unwrap_or("N/A");
            self.notify(NoticeLevel::Error, format!("Campaign \"{name}\" not found"));
            return Vec::new();
        };

        let commands = self.select_campaign(campaign_id);
        self.state.pending_focus = Some(PendingFocus {
            campaign_id,
            note_id,
        });
        commands
    }

    // ── Campaign form ───────────────────────────────────────────────────

    pub fn open_campaign_form(&mut self) {
        if self.state.campaign_form.is_none() {
            self.state.campaign_form = Some(CampaignForm::default());
        }
    }

    pub fn cancel_campaign_form(&mut self) {
        self.state.campaign_form = None;
    }

    pub fn submit_campaign_form(&mut self) -> Vec<Command> {
        let Some(form) = self.state.campaign_form.as_ref() else {
            return Vec::new();
        };
        if form.submitting {
            return Vec::new();
        }

        let campaign = match validation::validate_campaign(form) {
            Ok(campaign) => campaign,
            Err(e) => {
                self.notify(NoticeLevel::Error, e.to_string());
                return Vec::new();
            }
        };

        if !self.state.connected {
            self.notify(NoticeLevel::Error, NO_CONNECTION);
            return Vec::new();
        }

        if let Some(form) = self.state.campaign_form.as_mut() {
            form.submitting = true;
        }
        vec![Command::CreateCampaign(campaign)]
    }

    // ── Note form ───────────────────────────────────────────────────────

    /// Open the new-note form, preselecting the current campaign.
    /// Refused while no campaigns are loaded.
    pub fn open_note_form(&mut self) -> bool {
        if self.state.campaigns.is_empty() {
            self.notify(NoticeLevel::Error, ValidationError::NoCampaigns.to_string());
            return false;
        }

        log::debug!("Opening note form");
        self.state.note_form = Some(NoteForm {
            campaign_id: self.state.current_campaign().map(|c| c.id),
            ..Default::default()
        });
        self.state.editor.clear();
        true
    }

    pub fn cancel_note_form(&mut self) {
        self.state.note_form = None;
        self.state.editor.clear();
    }

    /// Step the note form's campaign picker through "none" and every
    /// loaded campaign.
    pub fn cycle_note_campaign(&mut self, forward: bool) {
        let options: Vec<Option<CampaignId>> = std::iter::once(None)
            .chain(self.state.campaigns.iter().map(|c| Some(c.id)))
            .collect();
        let Some(form) = self.state.note_form.as_mut() else {
            return;
        };

        let current = options
            .iter()
            .position(|o| *o == form.campaign_id)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        form.campaign_id = options[next];
    }

    pub fn submit_note_form(&mut self) -> Vec<Command> {
        let Some(form) = self.state.note_form.as_ref() else {
            return Vec::new();
        };
        if form.submitting {
            return Vec::new();
        }

        let (campaign_id, note) =
            match validation::validate_note(form, &self.state.editor, &self.state.campaigns) {
                Ok(valid) => valid,
                Err(e @ ValidationError::CampaignNotFound) => {
                    self.notify(NoticeLevel::Error, e.to_string());
                    return vec![self.load_campaigns()];
                }
                Err(e) => {
                    self.notify(NoticeLevel::Error, e.to_string());
                    return Vec::new();
                }
            };

        if !self.state.connected {
            self.notify(NoticeLevel::Error, NO_CONNECTION);
            return Vec::new();
        }

        if let Some(form) = self.state.note_form.as_mut() {
            form.submitting = true;
        }
        vec![Command::CreateNote { campaign_id, note }]
    }

    /// Escape: close the note form if open, else the campaign form.
    /// Returns whether a form was closed.
    pub fn dismiss_form(&mut self) -> bool {
        if self.state.note_form.is_some() {
            self.cancel_note_form();
            true
        } else if self.state.campaign_form.is_some() {
            self.cancel_campaign_form();
            true
        } else {
            false
        }
    }

    // ── Text input ──────────────────────────────────────────────────────

    /// Buffer behind a text field, if that field is currently shown.
    pub fn input_mut(&mut self, field: Field) -> Option<&mut InputBuffer> {
        match field {
            Field::Search => Some(&mut self.state.search_input),
            Field::CampaignName => self.state.campaign_form.as_mut().map(|f| &mut f.name),
            Field::NoteTitle => self.state.note_form.as_mut().map(|f| &mut f.title),
        }
    }

    /// Editor behind a text area, if its form is open.
    pub fn editor_mut(&mut self, field: TextField) -> Option<&mut TextEditor> {
        match field {
            TextField::CampaignDescription => {
                self.state.campaign_form.as_mut().map(|f| &mut f.description)
            }
            TextField::NoteBody if self.state.note_form.is_some() => Some(&mut self.state.editor),
            TextField::NoteBody => None,
        }
    }

    // ── Outcomes ────────────────────────────────────────────────────────

    /// Fold a command result into state. Returns follow-up commands.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Command> {
        match outcome {
            Outcome::Connection(result) => self.on_connection(result.is_ok()),
            Outcome::Campaigns { seq, result } => {
                if !self.state.requests.is_current(Slot::Campaigns, seq) {
                    log::debug!("Discarding stale campaign list #{seq}");
                    return Vec::new();
                }
                self.on_campaigns(result);
                Vec::new()
            }
            Outcome::Notes {
                seq,
                campaign_id,
                result,
            } => {
                if !self.state.requests.is_current(Slot::Notes, seq)
                    || self.state.current_campaign_id != Some(campaign_id)
                {
                    log::debug!("Discarding stale notes #{seq} for campaign {campaign_id}");
                    return Vec::new();
                }
                self.on_notes(campaign_id, result);
                Vec::new()
            }
            Outcome::CampaignCreated(result) => self.on_campaign_created(result),
            Outcome::NoteCreated {
                campaign_id,
                campaign_name,
                result,
            } => self.on_note_created(campaign_id, &campaign_name, result),
            Outcome::SearchNotes { seq, term, result } => {
                let same_search = self.state.search.as_ref().is_some_and(|s| s.term == term);
                if !self.state.requests.is_current(Slot::SearchNotes, seq) || !same_search {
                    log::debug!("Discarding stale note search #{seq} for '{term}'");
                    return Vec::new();
                }
                self.on_search_notes(&term, result);
                Vec::new()
            }
        }
    }

    fn on_connection(&mut self, ok: bool) -> Vec<Command> {
        let was_connected = self.state.connected;
        self.state.connected = ok;

        if !ok {
            self.notify(NoticeLevel::Error, CONNECTION_LOST);
            return Vec::new();
        }

        if !was_connected {
            log::info!("Connected to notes service");
        }
        match self.state.campaigns_status {
            LoadStatus::Idle | LoadStatus::Failed(_) => vec![self.load_campaigns()],
            _ => Vec::new(),
        }
    }

    fn on_campaigns(&mut self, result: Result<Vec<Campaign>, ApiError>) {
        let ok = match result {
            Ok(campaigns) => {
                log::info!("Loaded {} campaigns", campaigns.len());
                self.state.campaigns = campaigns;
                self.state.campaigns_status = LoadStatus::Ready;
                true
            }
            Err(e) => {
                log::error!("Failed to load campaigns: {e}");
                self.state.campaigns_status = LoadStatus::Failed(LOAD_CAMPAIGNS_FAILED.to_string());
                false
            }
        };

        if let Some(search) = self.state.search.as_mut() {
            if search.campaigns.is_loading() {
                search.campaigns = match SearchTerm::parse(&search.term) {
                    Some(term) if ok => Pane::Ready(search_campaigns(&self.state.campaigns, &term)),
                    _ => Pane::Failed(SEARCH_CAMPAIGNS_FAILED.to_string()),
                };
            }
        }
    }

    fn on_notes(
        &mut self,
        campaign_id: CampaignId,
        result: Result<NotesPage, ApiError>,
    ) {
        match result {
            Ok(page) => {
                let mut notes = page.notes;
                sort_newest_first(&mut notes);
                log::info!("Loaded {} notes for campaign {campaign_id}", notes.len());
                self.state.notes = notes;
                self.state.notes_campaign_id = Some(campaign_id);
                self.state.notes_status = LoadStatus::Ready;
                self.resolve_pending_focus(campaign_id);
            }
            Err(e) => {
                log::error!("Failed to load notes for campaign {campaign_id}: {e}");
                self.state.notes.clear();
                self.state.notes_campaign_id = Some(campaign_id);
                self.state.notes_status = LoadStatus::Failed(LOAD_NOTES_FAILED.to_string());
                self.state.pending_focus = None;
            }
        }
    }

    fn resolve_pending_focus(&mut self, campaign_id: CampaignId) {
        let Some(pending) = self.state.pending_focus.take() else {
            return;
        };
        if pending.campaign_id != campaign_id {
            return;
        }

        if self.state.notes.iter().any(|n| n.id == pending.note_id) {
            self.state.highlight = Some(Highlight {
                note_id: pending.note_id,
                expires_at: Instant::now() + self.settings.highlight_ttl,
            });
        } else {
            log::debug!("Note {} not in campaign {campaign_id}", pending.note_id);
        }
    }

    fn on_campaign_created(&mut self, result: Result<(), ApiError>) -> Vec<Command> {
        if let Some(form) = self.state.campaign_form.as_mut() {
            form.submitting = false;
        }

        match result {
            Ok(()) => {
                self.notify(NoticeLevel::Success, "Campaign created!");
                self.cancel_campaign_form();
                vec![self.load_campaigns()]
            }
            Err(e) => {
                log::error!("Failed to create campaign: {e}");
                self.notify(NoticeLevel::Error, e.write_message(CREATE_CAMPAIGN_FAILED));
                Vec::new()
            }
        }
    }

    fn on_note_created(
        &mut self,
        campaign_id: CampaignId,
        campaign_name: &str,
        result: Result<(), ApiError>,
    ) -> Vec<Command> {
        if let Some(form) = self.state.note_form.as_mut() {
            form.submitting = false;
        }

        match result {
            Ok(()) => {
                self.notify(
                    NoticeLevel::Success,
                    format!("Note created for campaign \"{campaign_name}\"!"),
                );
                self.cancel_note_form();
                if self.state.current_campaign_id == Some(campaign_id) {
                    self.load_notes(campaign_id).into_iter().collect()
                } else {
                    Vec::new()
                }
            }
            Err(e) => {
                log::error!("Failed to save note: {e}");
                self.notify(NoticeLevel::Error, e.write_message(CREATE_NOTE_FAILED));
                Vec::new()
            }
        }
    }

    fn on_search_notes(&mut self, term: &str, result: Result<Vec<Note>, ApiError>) {
        let pane = match (result, SearchTerm::parse(term)) {
            (Ok(all), Some(term)) => Pane::Ready(search_notes(&all, &term)),
            (Ok(_), None) => Pane::Ready(Vec::new()),
            (Err(e), _) => {
                log::error!("Note search failed: {e}");
                Pane::Failed(SEARCH_NOTES_FAILED.to_string())
            }
        };
        if let Some(search) = self.state.search.as_mut() {
            search.notes = pane;
        }
    }

    // ── Headless driving ────────────────────────────────────────────────

    /// Run `commands` and every follow-up to completion. Commands issued
    /// together run concurrently; their outcomes are applied in issue order.
    pub async fn drive(&mut self, api: &dyn NotesApi, commands: Vec<Command>) {
        let mut pending = commands;
        while !pending.is_empty() {
            let batch = std::mem::take(&mut pending);
            let outcomes = join_all(batch.into_iter().map(|c| execute(api, c))).await;
            for outcome in outcomes {
                pending.extend(self.apply(outcome));
            }
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControllerSettings::default())
    }
}
