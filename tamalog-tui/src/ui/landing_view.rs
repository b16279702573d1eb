use super::*;

const BANNER: [&str; 5] = [
    r"   ,_,   ",
    r"  (o>o)  ",
    r"  /)_)   ",
    r"   ",
    r"けんこうCheers!",
];

pub fn render_landing_view(frame: &mut Frame, app: &App, body: Rect) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(body);

    let button_style = if app.is_ready {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines: Vec<Line> = BANNER
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::Yellow))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "からだの記録で、まいにちをもっと元気に。",
        Style::default().fg(Color::White),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[L] ろぐいん", button_style),
        Span::raw("    "),
        Span::styled("[T] おためし", button_style),
    ]));

    let card = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .padding(Padding::vertical(1)),
    );
    let height = (BANNER.len() as u16 + 8).min(outer[0].height);
    frame.render_widget(card, utils::centered_rect(48, height, outer[0]));

    frame.render_widget(
        utils::controls_bar(&[("L / Enter", "Log in"), ("T", "Try the demo"), ("Q", "Quit")]),
        outer[1],
    );
}
