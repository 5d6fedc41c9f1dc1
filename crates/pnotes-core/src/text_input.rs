use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// What a key did to a [`TextInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The text changed.
    Changed,
    /// Only the cursor moved (or the key was swallowed at a limit).
    Consumed,
    /// The key is not an editing key; the caller should handle it.
    Ignored,
}

/// An editable text buffer with a byte-offset cursor.
///
/// Single-line by default. In multiline mode `Enter` inserts a newline and
/// `Up`/`Down` move between lines; otherwise those keys are left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
    max_chars: Option<usize>,
    multiline: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `value`, cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            cursor: value.len(),
            value,
            ..Self::default()
        }
    }

    pub fn max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn has_room(&self) -> bool {
        match self.max_chars {
            Some(max) => self.value.chars().count() < max,
            None => true,
        }
    }

    /// Insert a character at the cursor. Returns false at the length limit.
    pub fn insert_char(&mut self, c: char) -> bool {
        if c == '\n' && !self.multiline {
            return false;
        }
        if !self.has_room() {
            return false;
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Insert pasted text, dropping line breaks in single-line inputs and
    /// stopping at the length limit. Returns true if anything was inserted.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars() {
            if c == '\r' || (c == '\n' && !self.multiline) {
                continue;
            }
            if !self.insert_char(c) {
                break;
            }
            changed = true;
        }
        changed
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        let next = self.next_boundary();
        self.value.drain(self.cursor..next);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    /// Move to the start of the current line.
    pub fn home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    /// Move to the end of the current line.
    pub fn end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    /// Move to the previous line, keeping the column where possible.
    /// Returns false on the first line.
    pub fn move_up(&mut self) -> bool {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return false;
        }
        let col = self.value[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, col);
        true
    }

    /// Move to the next line, keeping the column where possible.
    /// Returns false on the last line.
    pub fn move_down(&mut self) -> bool {
        let end = self.line_end(self.cursor);
        if end >= self.value.len() {
            return false;
        }
        let col = self.value[self.line_start(self.cursor)..self.cursor]
            .chars()
            .count();
        self.cursor = self.offset_in_line(end + 1, col);
        true
    }

    /// Cursor position as (line, display column).
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.value[..self.cursor];
        let line = before.matches('\n').count();
        let line_start = self.line_start(self.cursor);
        (line, self.value[line_start..self.cursor].width())
    }

    /// Apply an editing key. Keys that are not editing keys are `Ignored`.
    pub fn handle_key(&mut self, key: &KeyEvent) -> InputOutcome {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return InputOutcome::Ignored;
        }
        let changed = match key.code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Enter if self.multiline => self.insert_char('\n'),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.home();
                false
            }
            KeyCode::End => {
                self.end();
                false
            }
            KeyCode::Up if self.multiline => {
                if !self.move_up() {
                    return InputOutcome::Ignored;
                }
                false
            }
            KeyCode::Down if self.multiline => {
                if !self.move_down() {
                    return InputOutcome::Ignored;
                }
                false
            }
            _ => return InputOutcome::Ignored,
        };
        if changed {
            InputOutcome::Changed
        } else {
            InputOutcome::Consumed
        }
    }

    // ── Offsets ──────────────────────────────────────────────────────

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.value.len())
    }

    fn line_start(&self, at: usize) -> usize {
        self.value[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, at: usize) -> usize {
        self.value[at..]
            .find('\n')
            .map(|i| at + i)
            .unwrap_or(self.value.len())
    }

    fn offset_in_line(&self, line_start: usize, col: usize) -> usize {
        let line_end = self.line_end(line_start);
        self.value[line_start..line_end]
            .char_indices()
            .nth(col)
            .map(|(i, _)| line_start + i)
            .unwrap_or(line_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut TextInput, code: KeyCode) -> InputOutcome {
        input.handle_key(&KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_insert_and_backspace_utf8() {
        let mut input = TextInput::new();
        for c in "héllo".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value(), "héllo");
        input.move_left();
        input.move_left();
        input.move_left();
        assert!(input.backspace());
        assert_eq!(input.value(), "hllo");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn test_max_chars() {
        let mut input = TextInput::with_value("abc").max_chars(4);
        assert!(input.insert_char('d'));
        assert!(!input.insert_char('e'));
        assert_eq!(input.value(), "abcd");
        assert_eq!(press(&mut input, KeyCode::Char('x')), InputOutcome::Consumed);
    }

    #[test]
    fn test_single_line_ignores_enter_and_newlines() {
        let mut input = TextInput::new();
        assert_eq!(press(&mut input, KeyCode::Enter), InputOutcome::Ignored);
        assert!(input.insert_str("a\nb\r\nc"));
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_multiline_navigation() {
        let mut input = TextInput::with_value("first line\nab\nthird").multiline();
        // Cursor starts at the end of "third"
        assert_eq!(input.cursor_position(), (2, 5));
        assert!(input.move_up());
        // Column clamps to the short line
        assert_eq!(input.cursor_position(), (1, 2));
        assert!(input.move_up());
        assert_eq!(input.cursor_position(), (0, 2));
        assert!(!input.move_up());
        assert!(input.move_down());
        assert!(input.move_down());
        assert!(!input.move_down());
        assert_eq!(press(&mut input, KeyCode::Down), InputOutcome::Ignored);
    }

    #[test]
    fn test_multiline_enter_inserts_newline() {
        let mut input = TextInput::with_value("ab").multiline();
        input.move_left();
        assert_eq!(press(&mut input, KeyCode::Enter), InputOutcome::Changed);
        assert_eq!(input.value(), "a\nb");
        assert_eq!(input.cursor_position(), (1, 0));
    }

    #[test]
    fn test_home_end_delete() {
        let mut input = TextInput::with_value("one\ntwo").multiline();
        input.home();
        assert_eq!(input.cursor_position(), (1, 0));
        assert!(input.delete());
        assert_eq!(input.value(), "one\nwo");
        input.end();
        assert!(!input.delete());
    }

    #[test]
    fn test_control_keys_are_ignored() {
        let mut input = TextInput::new();
        let outcome = input.handle_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(outcome, InputOutcome::Ignored);
        assert_eq!(input.value(), "");
    }
}
