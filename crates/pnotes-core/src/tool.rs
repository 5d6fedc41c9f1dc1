use crate::help_popup::HelpEntry;
use crate::keybinds::{Action, InputMode};
use crate::theme::Palette;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// The trait a pnotes tool implements to be hosted by the hub.
/// The hub owns the terminal, the header, the status bar and the global
/// overlays; the tool owns everything inside the content area.
pub trait Tool {
    /// The display name of the tool (e.g., "Notes").
    fn name(&self) -> &str;

    /// Short description, appended to the help popup title.
    fn description(&self) -> &str;

    /// The tool's current input mode (for status bar display).
    fn mode(&self) -> InputMode;

    /// Help entries specific to this tool (shown alongside global keybinds).
    fn help_entries(&self) -> Vec<HelpEntry> {
        Vec::new()
    }

    /// Handle a key event. Returns an Action for the hub to act on.
    fn handle_key(&mut self, key: KeyEvent) -> Action;

    /// Handle an action the hub raised on its own, such as the global
    /// new-note shortcut. Returns false if the tool ignores it.
    fn handle_shortcut(&mut self, _action: &Action) -> bool {
        false
    }

    /// Handle pasted text (bracketed paste).
    fn handle_paste(&mut self, _text: &str) -> Action {
        Action::None
    }

    /// Handle a `:` command the hub did not recognize. Returns true if handled.
    fn handle_command(&mut self, _cmd: &str) -> bool {
        false
    }

    /// Render the tool's UI into the given area.
    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette);

    /// Reset any pending key state (multi-key sequences).
    /// Called by the hub when it takes over input (overlays open/close).
    fn reset_key_state(&mut self) {}
}
