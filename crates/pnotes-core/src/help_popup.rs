use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Palette;
use crate::ui::centered_rect;

/// A single entry in the help popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    /// The key or key combination (e.g., "j/k", "Ctrl-N", "dd").
    pub key: String,
    /// Human-readable description (e.g., "Move down/up").
    pub description: String,
    /// Optional section header this entry belongs to.
    pub section: Option<String>,
}

impl HelpEntry {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            section: None,
        }
    }

    pub fn with_section(
        section: impl Into<String>,
        key: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            section: Some(section.into()),
        }
    }
}

/// The help popup state.
#[derive(Debug, Default)]
pub struct HelpPopup {
    pub visible: bool,
    title: String,
    entries: Vec<HelpEntry>,
    /// Scroll offset for long help content.
    scroll: u16,
}

impl HelpPopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, title: impl Into<String>, entries: Vec<HelpEntry>) {
        self.visible = true;
        self.title = title.into();
        self.entries = entries;
        self.scroll = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.entries.clear();
        self.title.clear();
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_add(n);
    }

    pub fn scroll_up(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if !self.visible || self.entries.is_empty() {
            return;
        }

        let lines = self.build_lines(palette);

        let popup_width = (area.width.saturating_sub(8)).min(64);
        let popup_height = (area.height.saturating_sub(4)).min(lines.len() as u16 + 2);
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(palette.border(true))
            .style(palette.base());

        // Clamp scroll
        let max_scroll = (lines.len() as u16).saturating_sub(popup_height.saturating_sub(2));
        let scroll = self.scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
        frame.render_widget(paragraph, popup_area);
    }

    /// Build display lines from entries, inserting section headers.
    fn build_lines(&self, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut current_section: Option<&str> = None;

        for entry in &self.entries {
            if let Some(ref section) = entry.section {
                if current_section != Some(section.as_str()) {
                    if !lines.is_empty() {
                        lines.push(Line::from(""));
                    }
                    lines.push(Line::from(Span::styled(
                        format!(" {}", section),
                        Style::default()
                            .fg(palette.primary)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    )));
                    current_section = Some(section.as_str());
                }
            }

            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:>14} ", entry.key),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::raw(entry.description.clone()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Esc/q/?  close    j/k  scroll",
            palette.dim(),
        )));

        lines
    }
}

/// Keybinds handled by the hub itself.
pub fn global_help_entries() -> Vec<HelpEntry> {
    vec![
        HelpEntry::with_section("General", "Ctrl-N", "New note (works everywhere)"),
        HelpEntry::with_section("General", "T", "Toggle light / dark theme"),
        HelpEntry::with_section("General", "?", "This help"),
        HelpEntry::with_section("General", "Ctrl-c", "Force quit"),
        HelpEntry::with_section("Commands", ":q / :qa", "Quit"),
        HelpEntry::with_section("Commands", ":w", "Save the note being edited"),
        HelpEntry::with_section("Commands", ":new", "New note"),
        HelpEntry::with_section("Commands", ":theme [light|dark]", "Switch theme"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_headers_inserted_once() {
        let mut popup = HelpPopup::new();
        popup.show(
            "Help",
            vec![
                HelpEntry::with_section("A", "x", "first"),
                HelpEntry::with_section("A", "y", "second"),
                HelpEntry::with_section("B", "z", "third"),
            ],
        );
        let lines = popup.build_lines(&Palette::light());
        let headers = lines
            .iter()
            .filter(|l| l.spans.len() == 1 && l.spans[0].content.starts_with(' '))
            .filter(|l| {
                let text = l.spans[0].content.trim();
                text == "A" || text == "B"
            })
            .count();
        assert_eq!(headers, 2);
    }

    #[test]
    fn test_hide_resets_state() {
        let mut popup = HelpPopup::new();
        popup.show("Help", global_help_entries());
        popup.scroll_down(3);
        popup.hide();
        assert!(!popup.visible);
        assert_eq!(popup.scroll, 0);
        assert!(popup.entries.is_empty());
    }
}
