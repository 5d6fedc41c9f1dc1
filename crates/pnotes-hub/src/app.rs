use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use tracing::{info, warn};

use pnotes_core::{
    help_popup::{self, HelpPopup},
    keybinds::{self, Action, InputMode},
    text_input::TextInput,
    theme::Theme,
    tool::Tool,
    ui,
};

const APP_TITLE: &str = "Personal Notes Organizer";

/// The main application state.
pub struct App {
    /// The hosted tool.
    tool: Box<dyn Tool>,
    /// Session theme. Starts from config, never written back.
    theme: Theme,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Hub input mode (only `Command` is tracked here; tools report their own).
    mode: InputMode,
    /// Help popup state.
    help_popup: HelpPopup,
    /// Command-line input buffer.
    command_input: TextInput,
    /// Feedback from the last command, shown in the status bar.
    status_message: Option<String>,
}

impl App {
    pub fn new(tool: Box<dyn Tool>, theme: Theme) -> Self {
        Self {
            tool,
            theme,
            should_quit: false,
            mode: InputMode::Normal,
            help_popup: HelpPopup::new(),
            command_input: TextInput::new(),
            status_message: None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Paste(text) => self.handle_paste(&text),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl-c always quits
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        // The new-note accelerator wins over every overlay and mode
        if keybinds::is_new_note_shortcut(&key) {
            self.new_note();
            return;
        }

        self.status_message = None;

        if self.help_popup.visible {
            self.handle_help_key(key);
            return;
        }

        if self.mode == InputMode::Command {
            self.handle_command_key(key);
            return;
        }

        let action = self.tool.handle_key(key);
        self.process_action(action);
    }

    fn handle_paste(&mut self, text: &str) {
        if self.help_popup.visible {
            return;
        }
        if self.mode == InputMode::Command {
            self.command_input.insert_str(text);
            return;
        }
        let action = self.tool.handle_paste(text);
        self.process_action(action);
    }

    fn new_note(&mut self) {
        self.help_popup.hide();
        self.mode = InputMode::Normal;
        self.command_input.clear();
        self.tool.handle_shortcut(&Action::Add);
    }

    /// Process an action returned by the tool.
    fn process_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::SetMode(mode) => {
                self.mode = mode;
                if mode == InputMode::Command {
                    self.command_input.clear();
                }
            }
            Action::ToggleTheme => self.set_theme(self.theme.toggled()),
            Action::Help => {
                self.show_help();
            }
            _ => {}
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        info!(theme = %theme, "Theme changed");
    }

    /// Handle command-mode key events.
    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                self.command_input.clear();
            }
            KeyCode::Enter => {
                let cmd = self.command_input.value().trim().to_string();
                self.mode = InputMode::Normal;
                self.command_input.clear();
                self.execute_command(&cmd);
            }
            KeyCode::Backspace if self.command_input.value().is_empty() => {
                self.mode = InputMode::Normal;
            }
            _ => {
                self.command_input.handle_key(&key);
            }
        }
    }

    /// Execute a command-mode command.
    fn execute_command(&mut self, cmd: &str) {
        let mut parts = cmd.split_whitespace();
        let Some(name) = parts.next() else {
            return;
        };
        match (name, parts.next()) {
            ("q" | "quit" | "qa" | "qa!", None) => {
                self.should_quit = true;
            }
            ("new", None) => self.new_note(),
            ("theme", None) => self.set_theme(self.theme.toggled()),
            ("theme", Some(arg)) => match arg.parse::<Theme>() {
                Ok(theme) => self.set_theme(theme),
                Err(err) => self.status_message = Some(err.to_string()),
            },
            _ => {
                if !self.tool.handle_command(cmd) {
                    warn!(command = cmd, "Unknown command");
                    self.status_message = Some(format!("Not an editor command: {cmd}"));
                }
            }
        }
    }

    /// Show the help popup with tool-specific + global keybinds.
    fn show_help(&mut self) {
        self.tool.reset_key_state();
        let mut entries = self.tool.help_entries();
        entries.extend(help_popup::global_help_entries());
        let title = format!("{} Help: {}", self.tool.name(), self.tool.description());
        self.help_popup.show(title, entries);
    }

    /// Handle key events while the help popup is visible.
    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.help_popup.hide();
                self.tool.reset_key_state();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.help_popup.scroll_down(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.help_popup.scroll_up(1);
            }
            KeyCode::Char('d') if key.modifiers == KeyModifiers::CONTROL => {
                self.help_popup.scroll_down(10);
            }
            KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => {
                self.help_popup.scroll_up(10);
            }
            _ => {}
        }
    }

    /// Render the entire application.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let palette = self.theme.palette();
        frame.render_widget(ratatui::widgets::Block::default().style(palette.base()), area);

        let (header_area, content_area, status_area) = ui::standard_layout(area);
        ui::render_header(frame, header_area, APP_TITLE, self.theme, &palette);

        self.tool.render(frame, content_area, &palette);

        // Status bar or command line
        if self.mode == InputMode::Command {
            let (_, col) = self.command_input.cursor_position();
            ui::render_command_line(frame, status_area, self.command_input.value(), col, &palette);
        } else {
            ui::render_status_bar(
                frame,
                status_area,
                self.tool.mode(),
                self.tool.name(),
                "Ctrl-N: new note  ?:help  :q quit",
                self.status_message.as_deref(),
                &palette,
            );
        }

        // Overlays (rendered last, on top)
        self.help_popup.render(frame, area, &palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnotes_notes::NotesTool;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn setup_app() -> App {
        App::new(Box::new(NotesTool::new("Personal")), Theme::Light)
    }

    fn run_command(app: &mut App, cmd: &str) {
        app.handle_event(key(KeyCode::Char(':')));
        for c in cmd.chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
        app.handle_event(key(KeyCode::Enter));
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = setup_app();
        app.handle_event(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_commands() {
        for cmd in ["q", "quit", "qa", "qa!"] {
            let mut app = setup_app();
            run_command(&mut app, cmd);
            assert!(app.should_quit, "{cmd} should quit");
        }
    }

    #[test]
    fn test_theme_toggle_and_command() {
        let mut app = setup_app();
        app.handle_event(key(KeyCode::Char('T')));
        assert_eq!(app.theme(), Theme::Dark);

        run_command(&mut app, "theme light");
        assert_eq!(app.theme(), Theme::Light);

        run_command(&mut app, "theme");
        assert_eq!(app.theme(), Theme::Dark);

        run_command(&mut app, "theme blue");
        assert_eq!(app.theme(), Theme::Dark);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_unknown_command_reports() {
        let mut app = setup_app();
        run_command(&mut app, "frobnicate");
        assert!(!app.should_quit);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Not an editor command: frobnicate")
        );
        assert_eq!(app.mode, InputMode::Normal);
    }

    #[test]
    fn test_new_note_shortcut_over_help_and_command() {
        let mut app = setup_app();
        app.handle_event(key(KeyCode::Char('?')));
        assert!(app.help_popup.visible);

        app.handle_event(ctrl('n'));
        assert!(!app.help_popup.visible);
        assert_eq!(app.tool.mode(), InputMode::Insert);

        // In command mode too
        let mut app = setup_app();
        app.handle_event(key(KeyCode::Char(':')));
        app.handle_event(ctrl('n'));
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.tool.mode(), InputMode::Insert);
    }

    #[test]
    fn test_write_command_from_edit_form() {
        use chrono::Utc;
        use pnotes_notes::model::NewNote;

        let mut notes = NotesTool::new("Personal");
        let nb = notes.notebook_mut();
        let id = nb.insert(
            NewNote {
                title: "Plan".into(),
                folder: "Work".into(),
                ..Default::default()
            },
            Utc::now(),
        );
        nb.select(Some(id));
        let mut app = App::new(Box::new(notes), Theme::Light);

        app.handle_event(key(KeyCode::Char('e')));
        app.handle_event(key(KeyCode::Char('!')));
        // Tags is the field before Title, and it is empty
        app.handle_event(key(KeyCode::BackTab));
        app.handle_event(key(KeyCode::Char(':')));
        assert_eq!(app.mode, InputMode::Command);

        app.handle_event(key(KeyCode::Char('w')));
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.tool.mode(), InputMode::Normal);
        assert!(app.status_message.is_none());

        let text = screen(&app);
        assert!(text.contains("Plan!"));
        assert!(!text.contains(":w"));
    }

    #[test]
    fn test_render_header_and_status() {
        let mut app = setup_app();
        let text = screen(&app);
        assert!(text.contains(APP_TITLE));
        assert!(text.contains("Dark"));
        assert!(text.contains("Ctrl-N: new note"));

        app.handle_event(key(KeyCode::Char('T')));
        assert!(screen(&app).contains("Light"));
    }

    #[test]
    fn test_help_popup_lists_sections() {
        let mut app = setup_app();
        app.handle_event(key(KeyCode::Char('?')));
        let text = screen(&app);
        assert!(text.contains("Notes Help: Organize notes by folder and tag"));
        app.handle_event(key(KeyCode::Esc));
        assert!(!app.help_popup.visible);
    }
}
