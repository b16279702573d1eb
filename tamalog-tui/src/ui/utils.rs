use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Bordered "Controls" bar from `(key, description)` pairs.
pub fn controls_bar<'a>(bindings: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let mut spans = Vec::with_capacity(bindings.len() * 2);
    for (i, (key, desc)) in bindings.iter().enumerate() {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        let sep = if i + 1 == bindings.len() { "" } else { "  " };
        spans.push(Span::raw(format!(": {}{}", desc, sep)));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        )
}

/// Text with a block cursor drawn between `before` and `after`.
pub fn with_cursor(before: &str, after: &str, style: Style) -> Vec<Span<'static>> {
    let mut rest = after.chars();
    let under = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
    vec![
        Span::styled(before.to_string(), style),
        Span::styled(under, style.bg(Color::Yellow).fg(Color::Black)),
        Span::styled(rest.collect::<String>(), style),
    ]
}
