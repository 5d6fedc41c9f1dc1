pub mod form;
pub mod model;
pub mod notebook;
pub mod sidebar;
pub mod ui;
pub mod views;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pnotes_core::help_popup::HelpEntry;
use pnotes_core::keybinds::{process_normal_key, Action, InputMode, KeyState};
use pnotes_core::text_input::{InputOutcome, TextInput};
use pnotes_core::theme::Palette;
use pnotes_core::tool::Tool;
use pnotes_core::ui::{render_confirm_popup, render_message_popup};
use ratatui::{layout::Rect, Frame};
use tracing::debug;

use form::{EditForm, FormField};
use model::NoteId;
use notebook::Notebook;
use sidebar::SidebarState;
use ui::NotesView;

/// Rows moved by `Ctrl-d` / `Ctrl-u`.
const HALF_PAGE: usize = 10;

/// The three panes of the notes view, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    Sidebar,
    #[default]
    List,
    Detail,
}

impl Pane {
    fn left(self) -> Self {
        match self {
            Pane::Sidebar | Pane::List => Pane::Sidebar,
            Pane::Detail => Pane::List,
        }
    }

    fn right(self) -> Self {
        match self {
            Pane::Sidebar => Pane::List,
            Pane::List | Pane::Detail => Pane::Detail,
        }
    }

    fn next(self) -> Self {
        match self {
            Pane::Sidebar => Pane::List,
            Pane::List => Pane::Detail,
            Pane::Detail => Pane::Sidebar,
        }
    }

    fn prev(self) -> Self {
        match self {
            Pane::Sidebar => Pane::Detail,
            Pane::List => Pane::Sidebar,
            Pane::Detail => Pane::List,
        }
    }
}

/// The `/` prompt. `previous` is restored when the prompt is cancelled.
struct SearchPrompt {
    input: TextInput,
    previous: String,
}

pub struct NotesTool {
    notebook: Notebook,
    focus: Pane,
    sidebar: SidebarState,
    form: Option<EditForm>,
    search_prompt: Option<SearchPrompt>,
    /// Note awaiting a y/n delete confirmation.
    confirm_delete: Option<NoteId>,
    /// Blocking message (validation errors). Any key dismisses it.
    notice: Option<String>,
    key_state: KeyState,
    detail_scroll: u16,
}

impl NotesTool {
    pub fn new(default_folder: impl Into<String>) -> Self {
        Self {
            notebook: Notebook::new(default_folder),
            focus: Pane::default(),
            sidebar: SidebarState::new(),
            form: None,
            search_prompt: None,
            confirm_delete: None,
            notice: None,
            key_state: KeyState::default(),
            detail_scroll: 0,
        }
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn notebook_mut(&mut self) -> &mut Notebook {
        &mut self.notebook
    }

    pub fn focus(&self) -> Pane {
        self.focus
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirm_delete.is_some()
    }

    // ── Note operations ──────────────────────────────────────────────

    /// Create an empty note and open it in the edit form.
    fn create_note(&mut self) {
        self.notebook.create(Utc::now());
        self.open_form();
    }

    /// Open the selected note for editing.
    fn edit_selected(&mut self) {
        if self.notebook.edit() {
            self.open_form();
        }
    }

    fn open_form(&mut self) {
        self.form = self.notebook.draft().map(EditForm::from_draft);
        self.focus = Pane::Detail;
        self.detail_scroll = 0;
    }

    fn save_form(&mut self) {
        match self.notebook.save(Utc::now()) {
            Ok(_) => self.form = None,
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    fn cancel_form(&mut self) {
        self.notebook.cancel();
        self.form = None;
    }

    /// Push the form buffers into the notebook's draft.
    fn sync_draft(&mut self) {
        if let Some(form) = &self.form {
            self.notebook.update_draft(|draft| form.apply_to(draft));
        }
    }

    fn select(&mut self, id: Option<NoteId>) {
        if id != self.notebook.selected() {
            self.detail_scroll = 0;
        }
        self.notebook.select(id);
    }

    /// Move the list selection by `delta` rows, clamped to the visible list.
    fn move_selection(&mut self, delta: isize) {
        let ids = self.notebook.visible_ids();
        if ids.is_empty() {
            return;
        }
        let target = match self
            .notebook
            .selected()
            .and_then(|id| ids.iter().position(|v| *v == id))
        {
            Some(pos) => pos.saturating_add_signed(delta).min(ids.len() - 1),
            None => 0,
        };
        self.select(Some(ids[target]));
    }

    fn select_edge(&mut self, last: bool) {
        let ids = self.notebook.visible_ids();
        let id = if last { ids.last() } else { ids.first() };
        self.select(id.copied());
    }

    fn close_overlays(&mut self) {
        self.notice = None;
        self.confirm_delete = None;
        if let Some(prompt) = self.search_prompt.take() {
            self.notebook.set_search(prompt.input.value());
        }
        if self.form.is_some() {
            self.cancel_form();
        }
    }

    // ── Key handling ─────────────────────────────────────────────────

    fn handle_confirm_delete_key(&mut self, key: KeyEvent) -> Action {
        if let Some(id) = self.confirm_delete.take() {
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                self.notebook.delete(id);
                self.form = None;
                self.detail_scroll = 0;
            } else {
                debug!(note_id = %id, "Delete declined");
            }
        }
        Action::None
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Action {
        let Some(prompt) = self.search_prompt.as_mut() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Enter => {
                self.search_prompt = None;
            }
            KeyCode::Esc => {
                let previous = std::mem::take(&mut prompt.previous);
                self.search_prompt = None;
                self.notebook.set_search(previous);
            }
            _ => {
                if prompt.input.handle_key(&key) == InputOutcome::Changed {
                    let text = prompt.input.value().to_string();
                    self.notebook.set_search(text);
                }
            }
        }
        Action::None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        let Some(form) = self.form.as_mut() else {
            return Action::None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('s') = key.code {
                self.save_form();
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Esc => self.cancel_form(),
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_prev(),
            KeyCode::Enter if form.focus != FormField::Content => self.save_form(),
            // `:` in an empty single-line field opens the command line
            KeyCode::Char(':')
                if form.focus != FormField::Content && form.input(form.focus).value().is_empty() =>
            {
                return Action::SetMode(InputMode::Command);
            }
            _ => match form.handle_key(&key) {
                InputOutcome::Changed => self.sync_draft(),
                InputOutcome::Consumed => {}
                InputOutcome::Ignored => match key.code {
                    KeyCode::Up => form.focus_prev(),
                    KeyCode::Down => form.focus_next(),
                    _ => {}
                },
            },
        }
        Action::None
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Action {
        let action = process_normal_key(key, &mut self.key_state);
        match action {
            Action::MoveDown(n) => self.move_in_pane(n as isize),
            Action::MoveUp(n) => self.move_in_pane(-(n as isize)),
            Action::HalfPageDown => self.move_in_pane(HALF_PAGE as isize),
            Action::HalfPageUp => self.move_in_pane(-(HALF_PAGE as isize)),
            Action::GotoTop => match self.focus {
                Pane::Sidebar => self.sidebar.goto_top(),
                Pane::List => self.select_edge(false),
                Pane::Detail => self.detail_scroll = 0,
            },
            Action::GotoBottom => match self.focus {
                Pane::Sidebar => self.sidebar.goto_bottom(sidebar::entries(&self.notebook).len()),
                Pane::List => self.select_edge(true),
                Pane::Detail => {}
            },
            Action::FocusLeft => self.focus = self.focus.left(),
            Action::FocusRight => self.focus = self.focus.right(),
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::Confirm => match self.focus {
                Pane::Sidebar => {
                    self.sidebar.clamp(sidebar::entries(&self.notebook).len());
                    self.sidebar.activate(&mut self.notebook);
                }
                Pane::List => {
                    if self.notebook.selected().is_some() {
                        self.focus = Pane::Detail;
                    }
                }
                Pane::Detail => self.edit_selected(),
            },
            Action::Add => self.create_note(),
            Action::Edit => self.edit_selected(),
            Action::Delete => self.confirm_delete = self.notebook.selected(),
            Action::Search => {
                let current = self.notebook.search().to_string();
                self.search_prompt = Some(SearchPrompt {
                    input: TextInput::with_value(current.as_str()),
                    previous: current,
                });
                self.focus = Pane::List;
            }
            Action::ToggleSidebarView => {
                self.notebook.toggle_sidebar_view();
                self.sidebar.sync_to_active(&self.notebook);
            }
            Action::Quit | Action::Help | Action::ToggleTheme | Action::SetMode(_) => {
                return action;
            }
            Action::None => {}
        }
        Action::None
    }

    fn move_in_pane(&mut self, delta: isize) {
        match self.focus {
            Pane::Sidebar => {
                if delta >= 0 {
                    let len = sidebar::entries(&self.notebook).len();
                    self.sidebar.move_down(delta as usize, len);
                } else {
                    self.sidebar.move_up(delta.unsigned_abs());
                }
            }
            Pane::List => self.move_selection(delta),
            Pane::Detail => {
                let delta = delta.clamp(i16::MIN as isize, i16::MAX as isize) as i16;
                self.detail_scroll = self.detail_scroll.saturating_add_signed(delta);
            }
        }
    }
}

impl Tool for NotesTool {
    fn name(&self) -> &str {
        "Notes"
    }

    fn description(&self) -> &str {
        "Organize notes by folder and tag"
    }

    fn mode(&self) -> InputMode {
        if self.form.is_some() || self.search_prompt.is_some() {
            InputMode::Insert
        } else {
            InputMode::Normal
        }
    }

    fn help_entries(&self) -> Vec<HelpEntry> {
        vec![
            // List
            HelpEntry::with_section("List", "a / o", "New note"),
            HelpEntry::with_section("List", "j / k", "Select next / previous note"),
            HelpEntry::with_section("List", "gg / G", "First / last note"),
            HelpEntry::with_section("List", "Ctrl-d / Ctrl-u", "Half page down / up"),
            HelpEntry::with_section("List", "Enter", "Focus the note"),
            HelpEntry::with_section("List", "e", "Edit selected note"),
            HelpEntry::with_section("List", "dd", "Delete selected note"),
            HelpEntry::with_section("List", "/", "Search (Enter keeps, Esc reverts)"),
            HelpEntry::with_section("List", "h / l", "Move focus left / right"),
            HelpEntry::with_section("List", "Tab / Shift-Tab", "Cycle focus"),
            // Sidebar
            HelpEntry::with_section("Sidebar", "j / k", "Navigate up / down"),
            HelpEntry::with_section("Sidebar", "Enter", "Filter by folder / tag"),
            HelpEntry::with_section("Sidebar", "s", "Switch folders / tags"),
            // Editor
            HelpEntry::with_section("Editor", "Tab / Shift-Tab", "Next / previous field"),
            HelpEntry::with_section("Editor", "Enter", "Save (newline in Content)"),
            HelpEntry::with_section("Editor", "Ctrl-s", "Save note"),
            HelpEntry::with_section("Editor", "Esc", "Cancel editing"),
            HelpEntry::with_section("Editor", ":", "Command line (from an empty field)"),
        ]
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.notice.take().is_some() {
            return Action::None;
        }
        if self.confirm_delete.is_some() {
            return self.handle_confirm_delete_key(key);
        }
        if self.search_prompt.is_some() {
            return self.handle_search_key(key);
        }
        if self.form.is_some() {
            return self.handle_form_key(key);
        }
        self.handle_normal_key(key)
    }

    fn handle_shortcut(&mut self, action: &Action) -> bool {
        match action {
            Action::Add => {
                self.key_state.reset();
                self.close_overlays();
                self.create_note();
                true
            }
            _ => false,
        }
    }

    fn handle_paste(&mut self, text: &str) -> Action {
        if let Some(prompt) = self.search_prompt.as_mut() {
            if prompt.input.insert_str(text) {
                let value = prompt.input.value().to_string();
                self.notebook.set_search(value);
            }
        } else if let Some(form) = self.form.as_mut() {
            if form.paste(text) {
                self.sync_draft();
            }
        }
        Action::None
    }

    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd.trim() {
            "w" | "write" => {
                if self.form.is_some() {
                    self.save_form();
                }
                true
            }
            _ => false,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let view = NotesView {
            notebook: &self.notebook,
            focus: self.focus,
            sidebar: &self.sidebar,
            form: self.form.as_ref(),
            search_prompt: self.search_prompt.as_ref().map(|p| &p.input),
            detail_scroll: self.detail_scroll,
        };
        ui::render_notes_tool(frame, area, &view, palette);

        if self.confirm_delete.is_some() {
            render_confirm_popup(frame, area, "Delete this note? (y/n)", palette);
        }
        if let Some(notice) = &self.notice {
            render_message_popup(frame, area, "Cannot save", notice, palette);
        }
    }

    fn reset_key_state(&mut self) {
        self.key_state.reset();
    }
}
