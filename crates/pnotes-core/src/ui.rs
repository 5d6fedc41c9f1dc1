use crate::keybinds::InputMode;
use crate::theme::{Palette, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Standard layout: header (1 line) + main content + status bar (1 line).
/// Returns (header_area, content_area, status_area).
pub fn standard_layout(area: Rect) -> (Rect, Rect, Rect) {
    let [header_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    (header_area, content_area, status_area)
}

/// Render the header: application title on the left, theme toggle on the right.
pub fn render_header(frame: &mut Frame, area: Rect, title: &str, theme: Theme, palette: &Palette) {
    let style = Style::default().fg(palette.header_fg).bg(palette.header_bg);
    frame.render_widget(Paragraph::new("").style(style), area);

    let [title_area, toggle_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(12)]).areas(area);

    let title = Paragraph::new(Line::from(vec![
        Span::raw(" \u{1F4DD} "),
        Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .style(style);
    frame.render_widget(title, title_area);

    let toggle = Paragraph::new(format!("[{}] ", theme.toggle_label()))
        .alignment(Alignment::Right)
        .style(style);
    frame.render_widget(toggle, toggle_area);
}

/// Render the bottom status bar showing the current mode and optional info.
/// `message` (if any) replaces the info text, e.g. for command feedback.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    tool_name: &str,
    info: &str,
    message: Option<&str>,
    palette: &Palette,
) {
    let mode_style = Style::default()
        .fg(palette.bg)
        .bg(match mode {
            InputMode::Normal => palette.primary,
            InputMode::Insert => palette.secondary,
            InputMode::Command => palette.accent,
        })
        .add_modifier(Modifier::BOLD);

    let tail = match message {
        Some(msg) => Span::styled(msg.to_string(), Style::default().fg(palette.accent)),
        None => Span::styled(info.to_string(), palette.dim()),
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", mode.label()), mode_style),
        Span::raw(" "),
        Span::styled(tool_name.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        tail,
    ]);

    let bar = Paragraph::new(line).style(Style::default().fg(palette.fg).bg(palette.sidebar_bg));
    frame.render_widget(bar, area);
}

/// Render the command-line input at the bottom of the screen.
pub fn render_command_line(
    frame: &mut Frame,
    area: Rect,
    input: &str,
    cursor_col: usize,
    palette: &Palette,
) {
    let line = Line::from(vec![
        Span::styled(":", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(input.to_string()),
    ]);

    frame.render_widget(Paragraph::new(line).style(palette.base()), area);
    let col = cursor_col.min(area.width.saturating_sub(2) as usize) as u16;
    frame.set_cursor_position((area.x.saturating_add(1).saturating_add(col), area.y));
}

/// A bordered pane block whose border follows focus.
pub fn pane_block<'a>(title: &'a str, focused: bool, palette: &Palette) -> Block<'a> {
    let title_style = if focused {
        Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };
    Block::default()
        .title(Span::styled(format!(" {} ", title), title_style))
        .borders(Borders::ALL)
        .border_style(palette.border(focused))
}

/// Render a small y/n confirmation dialog.
pub fn render_confirm_popup(frame: &mut Frame, area: Rect, question: &str, palette: &Palette) {
    let width = (question.chars().count() as u16 + 6)
        .max(30)
        .min(area.width.saturating_sub(2));
    let popup = centered_rect(width, 5, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Confirm ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.error))
        .style(palette.base());

    let text = vec![
        Line::from(Span::styled(
            question.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("y: yes    any other key: no", palette.dim())),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, popup);
}

/// Render a blocking message (validation errors). Dismissed by any key.
pub fn render_message_popup(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    palette: &Palette,
) {
    let width = (message.chars().count() as u16 + 6)
        .max(30)
        .min(area.width.saturating_sub(2));
    let popup = centered_rect(width, 5, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.error))
        .style(palette.base());

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("press any key", palette.dim())),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, popup);
}

/// Helper to create a centered rect within a given area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
