use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::controller::{Command, Controller, ControllerSettings, Field, TextField};
use crate::core::state::Screen;
use crate::core::view::{project, MainView, ViewModel, ViewOptions};

use super::events::{map_key, Action, AppEvent, Area, EditOp, InputFocus};
use super::layout::{centered_rect, AppLayout};
use super::services::Services;
use super::sidebar::SidebarState;
use super::theme;
use super::views::campaign::CampaignViewState;
use super::views::search::{SearchSelection, SearchViewState};
use super::views::{forms, welcome};

/// Terminal front end (Elm architecture): owns the controller and the
/// per-view cursor state, renders the projected view model.
pub struct App {
    /// Whether the app is still running.
    pub running: bool,
    controller: Controller,
    focus: InputFocus,
    area: Area,
    show_help: bool,
    sidebar: SidebarState,
    campaign_view: CampaignViewState,
    search_view: SearchViewState,
    preview_chars: usize,
    connectivity_interval: Duration,
    /// Receiver for backend outcomes.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    services: Services,
}

impl App {
    pub fn new(
        config: &AppConfig,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
    ) -> Self {
        Self {
            running: true,
            controller: Controller::new(ControllerSettings::from(&config.ui)),
            focus: InputFocus::Browse,
            area: Area::Sidebar,
            show_help: false,
            sidebar: SidebarState::new(),
            campaign_view: CampaignViewState::new(),
            search_view: SearchViewState::new(),
            preview_chars: config.ui.preview_chars,
            connectivity_interval: config.api.connectivity_interval(),
            event_rx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut connectivity = tokio::time::interval_at(
            tokio::time::Instant::now() + self.connectivity_interval,
            self.connectivity_interval,
        );
        let mut event_stream = EventStream::new();

        let startup = self.controller.start();
        self.dispatch(startup);

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.handle_event(AppEvent::Tick);
                }
                _ = connectivity.tick() => {
                    let commands = self.controller.check_connection();
                    self.dispatch(commands);
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        log::info!("Event loop finished");
        Ok(())
    }

    fn dispatch(&self, commands: Vec<Command>) {
        if !commands.is_empty() {
            self.services.dispatch(commands);
        }
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.controller.tick(Instant::now()),
            AppEvent::Outcome(outcome) => {
                let commands = self.controller.apply(outcome);
                self.dispatch(commands);
                self.sync_focus();
            }
            AppEvent::Input(Event::Key(key)) => self.handle_key(key),
            AppEvent::Input(_) => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q'))
            {
                self.handle_action(Action::CloseHelp);
            }
            return;
        }

        if let Some(action) = map_key(self.focus, &key) {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::Escape => self.escape(),
            Action::FocusSidebar => self.area = Area::Sidebar,
            Action::FocusMain => self.area = Area::Main,
            Action::SelectNext => self.select_next(),
            Action::SelectPrev => self.select_prev(),
            Action::Activate => self.activate(),
            Action::NextField => self.next_field(true),
            Action::PrevField => self.next_field(false),
            Action::Refresh => {
                let mut commands = self.controller.refresh_campaigns();
                commands.extend(self.controller.refresh_notes());
                self.dispatch(commands);
            }
            Action::FocusSearch => self.focus = InputFocus::Search,
            Action::SubmitSearch => {
                let commands = self.controller.submit_search();
                if !commands.is_empty() {
                    self.search_view.reset();
                    self.focus = InputFocus::Browse;
                    self.area = Area::Main;
                }
                self.dispatch(commands);
            }
            Action::OpenCampaignForm => {
                self.controller.open_campaign_form();
                self.focus = InputFocus::CampaignName;
            }
            Action::SubmitCampaignForm => {
                let commands = self.controller.submit_campaign_form();
                self.dispatch(commands);
            }
            Action::OpenNoteForm => {
                if self.controller.state().can_create_note() && self.controller.open_note_form() {
                    self.focus = InputFocus::NoteTitle;
                }
            }
            Action::SaveNote => {
                if self.controller.state().note_form().is_some() {
                    let commands = self.controller.submit_note_form();
                    self.dispatch(commands);
                }
            }
            Action::CycleNoteCampaign { forward } => self.controller.cycle_note_campaign(forward),
            Action::Edit(op) => self.edit(op),
            Action::TextInput(key) => self.text_input(key),
        }
        self.sync_focus();
    }

    /// Esc: leave the search box, close a form, or step back a screen.
    fn escape(&mut self) {
        if self.focus == InputFocus::Search {
            self.focus = InputFocus::Browse;
            return;
        }
        if self.controller.dismiss_form() {
            self.focus = InputFocus::Browse;
            return;
        }
        match self.controller.state().screen() {
            Screen::SearchResults(_) => self.controller.dismiss_search(),
            Screen::CampaignDetail(_) => {
                self.controller.show_welcome();
                self.area = Area::Sidebar;
            }
            Screen::Welcome => {}
        }
    }

    /// Forms can close under us (success, cancel); never leave focus on a
    /// field that is no longer shown.
    fn sync_focus(&mut self) {
        let state = self.controller.state();
        let stale = (self.focus.in_campaign_form() && state.campaign_form().is_none())
            || (self.focus.in_note_form() && state.note_form().is_none());
        if stale {
            self.focus = InputFocus::Browse;
        }
    }

    fn next_field(&mut self, forward: bool) {
        if self.focus.in_campaign_form() || self.focus.in_note_form() {
            self.focus = if forward {
                self.focus.next_field()
            } else {
                self.focus.prev_field()
            };
            return;
        }

        match (self.area, self.controller.state().screen()) {
            (Area::Main, Screen::SearchResults(_)) => {
                self.search_view.pane = self.search_view.pane.toggle();
            }
            (Area::Sidebar, _) => self.area = Area::Main,
            (Area::Main, _) => self.area = Area::Sidebar,
        }
    }

    fn view_model(&self) -> ViewModel {
        let options = ViewOptions {
            preview_chars: self.preview_chars,
            ..ViewOptions::default()
        };
        project(self.controller.state(), &options)
    }

    fn select_next(&mut self) {
        match self.area {
            Area::Sidebar => {
                let len = self.controller.state().campaigns().len();
                self.sidebar.cursor.select_next(len);
            }
            Area::Main => match self.view_model().main {
                MainView::Campaign(detail) => self.campaign_view.cursor.select_next(detail.notes.len()),
                MainView::Search(search) => self.search_view.select_next(&search),
                MainView::Welcome => {}
            },
        }
    }

    fn select_prev(&mut self) {
        match self.area {
            Area::Sidebar => self.sidebar.cursor.select_prev(),
            Area::Main => match self.controller.state().screen() {
                Screen::CampaignDetail(_) => self.campaign_view.cursor.select_prev(),
                Screen::SearchResults(_) => self.search_view.select_prev(),
                Screen::Welcome => {}
            },
        }
    }

    fn activate(&mut self) {
        let commands = match self.area {
            Area::Sidebar => {
                let id = self
                    .controller
                    .state()
                    .campaigns()
                    .get(self.sidebar.cursor.selected)
                    .map(|c| c.id);
                match id {
                    Some(id) => {
                        self.campaign_view.reset();
                        self.area = Area::Main;
                        self.controller.select_campaign(id)
                    }
                    None => Vec::new(),
                }
            }
            Area::Main => {
                let MainView::Search(search) = self.view_model().main else {
                    return;
                };
                self.campaign_view.reset();
                match self.search_view.selection(&search) {
                    Some(SearchSelection::Campaign(id)) => {
                        self.controller.select_campaign_from_search(id)
                    }
                    Some(SearchSelection::Note { id, campaign_name }) => self
                        .controller
                        .view_note_from_search(id, campaign_name.as_deref()),
                    None => Vec::new(),
                }
            }
        };
        self.dispatch(commands);
    }

    fn edit(&mut self, op: EditOp) {
        let field = match self.focus {
            InputFocus::Search => Field::Search,
            InputFocus::CampaignName => Field::CampaignName,
            InputFocus::NoteTitle => Field::NoteTitle,
            _ => return,
        };
        if let Some(buffer) = self.controller.input_mut(field) {
            apply_edit(buffer, op);
        }
    }

    fn text_input(&mut self, key: KeyEvent) {
        let field = match self.focus {
            InputFocus::CampaignDescription => TextField::CampaignDescription,
            InputFocus::NoteBody => TextField::NoteBody,
            _ => return,
        };
        if let Some(editor) = self.controller.editor_mut(field) {
            editor.input(Event::Key(key));
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let vm = self.view_model();
        let layout = AppLayout::compute(area);

        self.render_title(frame, layout.title, &vm);
        self.render_search_box(frame, layout.search, &vm);

        if let Some(sidebar_area) = layout.sidebar {
            let focused = self.area == Area::Sidebar && self.focus == InputFocus::Browse;
            self.sidebar.render(frame, sidebar_area, &vm.campaigns, focused);
        }

        let main_focused = self.area == Area::Main && self.focus == InputFocus::Browse;
        match &vm.main {
            MainView::Welcome => welcome::render(frame, layout.main, &vm, main_focused),
            MainView::Campaign(detail) => {
                self.campaign_view
                    .render(frame, layout.main, detail, &vm.new_note, main_focused)
            }
            MainView::Search(search) => {
                self.search_view.render(frame, layout.main, search, main_focused)
            }
        }

        self.render_status_bar(frame, layout.status, &vm);

        // Overlays
        let state = self.controller.state();
        if let (Some(form), Some(open)) = (&vm.campaign_form, state.campaign_form()) {
            let description = open.description.textarea();
            forms::render_campaign_form(frame, area, form, description, self.focus);
        }
        if let Some(form) = &vm.note_form {
            forms::render_note_form(frame, area, form, state.editor().textarea(), self.focus);
        }
        self.render_notice(frame, area, &vm);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect, vm: &ViewModel) {
        let badge = format!(" {} ", vm.connection_label);
        let title = Line::from(vec![
            Span::styled(" TTRPG Notes ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled("Campaign session log", theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(title), area);
        frame.render_widget(
            Paragraph::new(Span::styled(badge, theme::connection_badge(vm.connected)))
                .alignment(Alignment::Right),
            area,
        );
    }

    fn render_search_box(&self, frame: &mut Frame, area: Rect, vm: &ViewModel) {
        let focused = self.focus == InputFocus::Search;
        let block = theme::block("Search  /", focused);
        let inner = block.inner(area);
        let content = if vm.search_input.is_empty() && !focused {
            Span::styled("Search campaigns and notes", theme::dim())
        } else {
            Span::styled(vm.search_input.clone(), theme::text())
        };
        frame.render_widget(Paragraph::new(content).block(block), area);

        if focused {
            let col = vm
                .search_input
                .get(..vm.search_cursor)
                .unwrap_or(&vm.search_input)
                .chars()
                .count() as u16;
            frame.set_cursor_position((inner.x + col.min(inner.width.saturating_sub(1)), inner.y));
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, vm: &ViewModel) {
        let mode = Span::styled(format!(" {} ", self.focus.label()), theme::brand_badge());
        let screen = match &vm.main {
            MainView::Welcome => "Welcome".to_string(),
            MainView::Campaign(detail) => detail.name.clone(),
            MainView::Search(search) => format!("Search: {}", search.term),
        };

        let status = Line::from(vec![
            mode,
            Span::raw(" "),
            Span::styled(screen, Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD)),
            Span::raw(" │ "),
            Span::styled("/", theme::key_hint()),
            Span::raw(":search "),
            Span::styled("c", theme::key_hint()),
            Span::raw(":campaign "),
            Span::styled("Ctrl+N", if vm.new_note.enabled { theme::key_hint() } else { theme::dim() }),
            Span::raw(":note "),
            Span::styled("r", theme::key_hint()),
            Span::raw(":refresh "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notice(&self, frame: &mut Frame, area: Rect, vm: &ViewModel) {
        let Some(notice) = &vm.notice else {
            return;
        };

        let (icon, color) = theme::notice(notice.level);
        let width = (notice.message.chars().count() as u16 + 6).min(area.width.saturating_sub(2));
        let notice_area = Rect::new(area.width.saturating_sub(width + 1), 1, width, 1);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(color).bold()),
            Span::raw(notice.message.clone()),
        ]);
        frame.render_widget(Clear, notice_area);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(theme::BG_SURFACE)),
            notice_area,
        );
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("q / Ctrl+C", "Quit"),
            ("?", "Toggle this help"),
            ("/", "Focus search"),
            ("c", "New campaign"),
            ("Ctrl+N", "New note for the selected campaign"),
            ("r", "Reload campaigns and notes"),
            ("Esc", "Close form / leave screen"),
            ("", ""),
            ("Lists:", ""),
            ("j/k", "Move selection"),
            ("h/l", "Campaign list / main pane"),
            ("Tab", "Switch pane"),
            ("Enter", "Open campaign or note"),
            ("", ""),
            ("Forms:", ""),
            ("Tab / Shift+Tab", "Next / previous field"),
            ("Enter", "Submit campaign / next field"),
            ("Arrows / PgUp / PgDn", "Move in note or description"),
            ("Ctrl+S / Ctrl+Enter", "Save note"),
            ("◂ ▸", "Pick campaign"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::title())),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::heading())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{:<22}", key), theme::key_hint().bold()),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", theme::key_hint().bold()),
            Span::raw(" or "),
            Span::styled("Esc", theme::key_hint().bold()),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme::border_focused());

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

fn apply_edit(buffer: &mut crate::core::editor::InputBuffer, op: EditOp) {
    match op {
        EditOp::Insert(c) => buffer.insert_char(c),
        EditOp::Backspace => buffer.backspace(),
        EditOp::Delete => buffer.delete(),
        EditOp::Left => buffer.move_left(),
        EditOp::Right => buffer.move_right(),
        EditOp::Home => buffer.move_home(),
        EditOp::End => buffer.move_end(),
    }
}
