use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input modes, modeled after vim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default mode. Navigation and actions via keybinds.
    #[default]
    Normal,
    /// Text input mode (edit form, search prompt). Exited with `Esc`.
    Insert,
    /// Command-line mode. Entered with `:`. Supports `:q`, `:w`, etc.
    Command,
}

impl InputMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Command => "COMMAND",
        }
    }
}

/// Actions that can result from processing a key event.
/// Tools and the hub return these to signal what should happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No-op: the key was consumed but nothing happens.
    None,
    /// Quit the application.
    Quit,
    /// Switch to a specific input mode.
    SetMode(InputMode),
    /// Move selection down by N items.
    MoveDown(usize),
    /// Move selection up by N items.
    MoveUp(usize),
    /// Jump to top of list.
    GotoTop,
    /// Jump to bottom of list.
    GotoBottom,
    /// Half-page down.
    HalfPageDown,
    /// Half-page up.
    HalfPageUp,
    /// Move focus to the pane on the left.
    FocusLeft,
    /// Move focus to the pane on the right.
    FocusRight,
    /// Cycle focus forward.
    FocusNext,
    /// Cycle focus backward.
    FocusPrev,
    /// Confirm/select the current item.
    Confirm,
    /// Delete the current item.
    Delete,
    /// Create a new item. Also produced by the global new-note shortcut.
    Add,
    /// Begin editing the current item.
    Edit,
    /// Enter search/filter mode.
    Search,
    /// Switch the sidebar between its views.
    ToggleSidebarView,
    /// Flip between the light and dark theme.
    ToggleTheme,
    /// Show help.
    Help,
}

/// Pending key state for multi-key sequences like `gg` and `dd`.
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    /// Pending first key of a two-key sequence ('g' for gg, 'd' for dd).
    pub pending_key: Option<char>,
}

impl KeyState {
    pub fn reset(&mut self) {
        self.pending_key = None;
    }
}

/// Whether `key` is the global new-note accelerator (Ctrl-N, or Super-N on
/// terminals that report the super modifier).
pub fn is_new_note_shortcut(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('n') | KeyCode::Char('N'))
        && (key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::SUPER))
}

/// Process a key event in Normal mode, accounting for multi-key sequences.
pub fn process_normal_key(key: KeyEvent, state: &mut KeyState) -> Action {
    // If there's a pending key, handle two-key sequences
    if let Some(pending) = state.pending_key.take() {
        return match (pending, key.code) {
            ('g', KeyCode::Char('g')) => Action::GotoTop,
            ('d', KeyCode::Char('d')) => Action::Delete,
            _ => Action::None, // Invalid sequence, ignore
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('d') => Action::HalfPageDown,
            KeyCode::Char('u') => Action::HalfPageUp,
            KeyCode::Char('h') => Action::FocusLeft,
            KeyCode::Char('l') => Action::FocusRight,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown(1),
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp(1),
        KeyCode::Char('h') | KeyCode::Left => Action::FocusLeft,
        KeyCode::Char('l') | KeyCode::Right => Action::FocusRight,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Char('G') => Action::GotoBottom,
        KeyCode::Char('g') => {
            state.pending_key = Some('g');
            Action::None
        }
        KeyCode::Char('d') => {
            state.pending_key = Some('d');
            Action::None
        }
        KeyCode::Enter => Action::Confirm,
        KeyCode::Char('/') => Action::Search,
        KeyCode::Char('a') | KeyCode::Char('o') => Action::Add,
        KeyCode::Char('e') => Action::Edit,
        KeyCode::Char('s') => Action::ToggleSidebarView,
        KeyCode::Char('T') => Action::ToggleTheme,
        KeyCode::Char(':') => Action::SetMode(InputMode::Command),
        KeyCode::Char('?') => Action::Help,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}
