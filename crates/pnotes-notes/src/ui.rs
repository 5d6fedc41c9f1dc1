use chrono::{DateTime, Local, Utc};
use pnotes_core::text_input::TextInput;
use pnotes_core::theme::Palette;
use pnotes_core::ui::pane_block;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::form::{EditForm, FormField};
use crate::model::Note;
use crate::notebook::{Notebook, SidebarView};
use crate::sidebar::{self, SidebarEntry, SidebarState};
use crate::Pane;

/// Fixed sidebar width in characters.
pub const SIDEBAR_WIDTH: u16 = 24;

/// Share of the remaining width given to the note list.
const LIST_PERCENT: u16 = 40;

/// Tags shown per list item before the rest are elided.
const LIST_TAG_LIMIT: usize = 3;

pub const UNTITLED: &str = "(Untitled)";

/// Everything the notes view reads while drawing one frame.
pub struct NotesView<'a> {
    pub notebook: &'a Notebook,
    pub focus: Pane,
    pub sidebar: &'a SidebarState,
    pub form: Option<&'a EditForm>,
    pub search_prompt: Option<&'a TextInput>,
    pub detail_scroll: u16,
}

// ── Main entry point ─────────────────────────────────────────────────

/// Render the three panes: sidebar, note list, detail/edit.
pub fn render_notes_tool(frame: &mut Frame, area: Rect, view: &NotesView, palette: &Palette) {
    let sidebar_width = SIDEBAR_WIDTH.min(area.width.saturating_sub(20));
    let [sidebar_area, rest] =
        Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(1)]).areas(area);
    let [list_area, detail_area] = Layout::horizontal([
        Constraint::Percentage(LIST_PERCENT),
        Constraint::Percentage(100 - LIST_PERCENT),
    ])
    .areas(rest);

    render_sidebar(frame, sidebar_area, view, palette);
    render_note_list(frame, list_area, view, palette);
    match view.form {
        Some(form) => render_edit_form(frame, detail_area, form, palette),
        None => render_detail(frame, detail_area, view, palette),
    }
}

// ── Sidebar ──────────────────────────────────────────────────────────

fn render_sidebar(frame: &mut Frame, area: Rect, view: &NotesView, palette: &Palette) {
    let focused = view.focus == Pane::Sidebar;
    let block = pane_block("Browse", focused, palette).style(Style::default().bg(palette.sidebar_bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, list_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);

    let current = view.notebook.sidebar_view();
    let tab = |label: &'static str, which: SidebarView| {
        if which == current {
            Span::styled(
                label,
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
        } else {
            Span::styled(label, palette.dim())
        }
    };
    let tabs = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        tab("Folders", SidebarView::Folders),
        Span::styled(" | ", palette.dim()),
        tab("Tags", SidebarView::Tags),
    ]));
    frame.render_widget(tabs, tabs_area);

    let entries = sidebar::entries(view.notebook);
    let width = list_area.width.saturating_sub(2) as usize;

    if entries.is_empty() {
        let empty = Paragraph::new(Span::styled(" (No tags)", palette.dim()));
        frame.render_widget(empty, list_area);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| match entry {
            SidebarEntry::Folder {
                name,
                count,
                active,
            } => {
                let marker = if *active { "\u{25B8} " } else { "  " };
                let suffix = count.map(|c| format!(" {c}")).unwrap_or_default();
                let name_width = width.saturating_sub(marker.width() + suffix.width());
                let style = if *active {
                    Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.fg)
                };
                let name = truncate(name, name_width);
                let pad = name_width.saturating_sub(name.width());
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(name, style),
                    Span::raw(" ".repeat(pad)),
                    Span::styled(suffix, palette.dim()),
                ]))
            }
            SidebarEntry::Tag(tag) => ListItem::new(Line::from(vec![
                Span::styled("  #", Style::default().fg(palette.accent)),
                Span::styled(truncate(tag, width.saturating_sub(3)), Style::default().fg(palette.fg)),
            ])),
        })
        .collect();

    let mut state = ListState::default();
    if focused {
        state.select(Some(view.sidebar.cursor.min(entries.len() - 1)));
    }
    let list = List::new(items).highlight_style(palette.highlight());
    frame.render_stateful_widget(list, list_area, &mut state);
}

// ── Note list ────────────────────────────────────────────────────────

fn render_note_list(frame: &mut Frame, area: Rect, view: &NotesView, palette: &Palette) {
    let focused = view.focus == Pane::List;
    let visible = view.notebook.visible_notes();
    let title = format!("Notes ({})", visible.len());
    let block = pane_block(&title, focused, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [search_area, list_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);
    render_search_line(frame, search_area, view, palette);

    if visible.is_empty() {
        let empty = Paragraph::new(Span::styled("No notes found", palette.dim()))
            .alignment(Alignment::Center);
        frame.render_widget(empty, list_area);
        return;
    }

    let width = list_area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = visible
        .iter()
        .map(|note| note_list_item(note, width, palette))
        .collect();

    let mut state = ListState::default();
    state.select(
        view.notebook
            .selected()
            .and_then(|id| visible.iter().position(|n| n.id == id)),
    );

    let list = List::new(items)
        .highlight_style(palette.highlight())
        .highlight_symbol("\u{258C}");
    frame.render_stateful_widget(list, list_area, &mut state);
}

fn render_search_line(frame: &mut Frame, area: Rect, view: &NotesView, palette: &Palette) {
    let line = match view.search_prompt {
        Some(input) => {
            let (_, col) = input.cursor_position();
            let col = col.min(area.width.saturating_sub(3) as usize) as u16;
            frame.set_cursor_position((area.x.saturating_add(2).saturating_add(col), area.y));
            Line::from(vec![
                Span::styled("/ ", Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
                Span::raw(input.value().to_string()),
            ])
        }
        None if !view.notebook.search().is_empty() => Line::from(vec![
            Span::styled("/ ", Style::default().fg(palette.accent)),
            Span::raw(view.notebook.search().to_string()),
        ]),
        None => Line::from(Span::styled("/ Search notes...", palette.dim())),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn note_list_item<'a>(note: &Note, width: usize, palette: &Palette) -> ListItem<'a> {
    let title = if note.title.is_empty() {
        Span::styled(UNTITLED, palette.dim().add_modifier(Modifier::ITALIC))
    } else {
        Span::styled(
            truncate(&note.title, width),
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        )
    };

    let mut tag_spans = Vec::new();
    for tag in note.tags.iter().take(LIST_TAG_LIMIT) {
        tag_spans.push(Span::styled(
            format!("#{tag} "),
            Style::default().fg(palette.accent),
        ));
    }
    if note.tags.len() > LIST_TAG_LIMIT {
        tag_spans.push(Span::styled(
            format!("+{}", note.tags.len() - LIST_TAG_LIMIT),
            palette.dim(),
        ));
    }

    let meta = Line::from(vec![
        Span::styled(truncate(&note.folder, width / 2), Style::default().fg(palette.secondary)),
        Span::styled(format!("  {}", format_date(note.updated)), palette.dim()),
    ]);

    ListItem::new(vec![Line::from(title), Line::from(tag_spans), meta])
}

// ── Detail (view mode) ───────────────────────────────────────────────

fn render_detail(frame: &mut Frame, area: Rect, view: &NotesView, palette: &Palette) {
    let focused = view.focus == Pane::Detail;
    let block = pane_block("Note", focused, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(note) = view.notebook.selected_note() else {
        render_placeholder(frame, inner, palette);
        return;
    };

    let label = |text: &'static str| Span::styled(text, palette.dim());
    let title = if note.title.is_empty() {
        Span::styled(UNTITLED, palette.dim().add_modifier(Modifier::ITALIC))
    } else {
        Span::styled(
            note.title.clone(),
            Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
        )
    };
    let folder = if note.folder.is_empty() {
        "-".to_string()
    } else {
        note.folder.clone()
    };
    let tags = if note.tags.is_empty() {
        "-".to_string()
    } else {
        note.tags.iter().map(|t| format!("#{t}")).collect::<Vec<_>>().join(" ")
    };

    let mut lines = vec![
        Line::from(title),
        Line::from(vec![label("Folder:  "), Span::styled(folder, Style::default().fg(palette.secondary))]),
        Line::from(vec![label("Tags:    "), Span::styled(tags, Style::default().fg(palette.accent))]),
        Line::from(vec![label("Updated: "), Span::raw(format_timestamp(note.updated))]),
        Line::from(Span::styled("─".repeat(inner.width as usize), palette.dim())),
    ];
    lines.extend(note.content.lines().map(|l| Line::from(l.to_string())));

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(palette.fg))
        .wrap(Wrap { trim: false })
        .scroll((view.detail_scroll, 0));
    frame.render_widget(paragraph, inner);
}

fn render_placeholder(frame: &mut Frame, area: Rect, palette: &Palette) {
    if area.height == 0 {
        return;
    }
    let text = Paragraph::new(Span::styled("Select a note to view or edit.", palette.dim()))
        .alignment(Alignment::Center);
    let centered = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    frame.render_widget(text, centered);
}

// ── Edit form ────────────────────────────────────────────────────────

fn render_edit_form(frame: &mut Frame, area: Rect, form: &EditForm, palette: &Palette) {
    let block = pane_block("Edit Note", true, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [title_area, content_area, folder_area, tags_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    let fields = [
        (FormField::Title, title_area),
        (FormField::Content, content_area),
        (FormField::Folder, folder_area),
        (FormField::Tags, tags_area),
    ];
    for (field, field_area) in fields {
        render_field(frame, field_area, form, field, palette);
    }

    let hints = Paragraph::new(Line::from(vec![
        Span::styled(" Ctrl-S", Style::default().fg(palette.secondary).add_modifier(Modifier::BOLD)),
        Span::styled(" save  ", palette.dim()),
        Span::styled("Esc", Style::default().fg(palette.error).add_modifier(Modifier::BOLD)),
        Span::styled(" cancel  ", palette.dim()),
        Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" next field", palette.dim()),
    ]));
    frame.render_widget(hints, hint_area);
}

fn render_field(frame: &mut Frame, area: Rect, form: &EditForm, field: FormField, palette: &Palette) {
    let focused = form.focus == field;
    let input = form.input(field);
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", field.label()),
            if focused {
                Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
            } else {
                palette.dim()
            },
        ))
        .borders(Borders::ALL)
        .border_style(palette.border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if input.value().is_empty() {
        let placeholder = Paragraph::new(Span::styled(field.placeholder(), palette.dim()));
        frame.render_widget(placeholder, inner);
        if focused {
            frame.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let (line, col) = input.cursor_position();
    let scroll_y = scroll_offset(line, inner.height as usize);
    let scroll_x = scroll_offset(col, inner.width as usize);

    let paragraph = Paragraph::new(input.value().to_string())
        .style(Style::default().fg(palette.fg))
        .scroll((scroll_y as u16, scroll_x as u16));
    frame.render_widget(paragraph, inner);

    if focused && inner.width > 0 && inner.height > 0 {
        frame.set_cursor_position((
            inner.x + (col - scroll_x) as u16,
            inner.y + (line - scroll_y) as u16,
        ));
    }
}

/// First row/column to draw so that `pos` stays within a window of `size`.
fn scroll_offset(pos: usize, size: usize) -> usize {
    if size == 0 {
        pos
    } else {
        pos.saturating_sub(size - 1)
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Cut `s` to at most `max` display columns, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('\u{2026}');
    out
}

fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%b %-d, %Y").to_string()
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewNote;
    use chrono::TimeZone;
    use pnotes_core::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn draw(view: &NotesView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let palette = Theme::Dark.palette();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_notes_tool(frame, area, view, &palette);
            })
            .unwrap();
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

    fn view<'a>(nb: &'a Notebook, sidebar: &'a SidebarState) -> NotesView<'a> {
        NotesView {
            notebook: nb,
            focus: Pane::List,
            sidebar,
            form: None,
            search_prompt: None,
            detail_scroll: 0,
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd\u{2026}");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(7, 5), 3);
    }

    #[test]
    fn test_render_empty_notebook() {
        let nb = Notebook::new("Personal");
        let sidebar = SidebarState::new();
        let screen = draw(&view(&nb, &sidebar));
        assert!(screen.contains("No notes found"));
        assert!(screen.contains("Select a note to view or edit."));
        assert!(screen.contains("All Notes"));
    }

    #[test]
    fn test_render_selected_note() {
        let mut nb = Notebook::new("Personal");
        let id = nb.insert(
            NewNote {
                title: "Groceries".into(),
                content: "milk and eggs".into(),
                tags: vec!["home".into()],
                folder: "Errands".into(),
            },
            at(1_700_000_000_000),
        );
        nb.select(Some(id));
        let sidebar = SidebarState::new();
        let screen = draw(&view(&nb, &sidebar));
        assert!(screen.contains("Groceries"));
        assert!(screen.contains("milk and eggs"));
        assert!(screen.contains("#home"));
        assert!(screen.contains("Errands"));
    }

    #[test]
    fn test_render_untitled_and_edit_form() {
        let mut nb = Notebook::new("Personal");
        nb.create(at(1_000));
        let form = EditForm::from_draft(nb.draft().unwrap());
        let sidebar = SidebarState::new();
        let mut v = view(&nb, &sidebar);
        v.focus = Pane::Detail;
        v.form = Some(&form);
        let screen = draw(&v);
        assert!(screen.contains(UNTITLED));
        assert!(screen.contains("Edit Note"));
        assert!(screen.contains("Tags (comma-separated)"));
        assert!(screen.contains("Note title"));
    }

    #[test]
    fn test_render_very_long_search_prompt() {
        let nb = Notebook::new("Personal");
        let sidebar = SidebarState::new();
        let prompt = TextInput::with_value("x".repeat(70_000));
        let mut v = view(&nb, &sidebar);
        v.search_prompt = Some(&prompt);
        let screen = draw(&v);
        assert!(screen.contains("/ xxxx"));
    }

    #[test]
    fn test_render_tags_view_without_tags() {
        let mut nb = Notebook::new("Personal");
        nb.toggle_sidebar_view();
        let sidebar = SidebarState::new();
        let screen = draw(&view(&nb, &sidebar));
        assert!(screen.contains("(No tags)"));
    }
}
