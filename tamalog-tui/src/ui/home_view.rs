use super::*;
use crate::app::HomeLayout;
use crate::metrics::{format_kg, Targets};

pub fn render_home_view(frame: &mut Frame, app: &App, body: Rect) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(body);

    match app.home_layout {
        HomeLayout::Compact => {
            let paragraph = Paragraph::new(summary_lines(app))
                .alignment(Alignment::Center)
                .block(summary_block(" ホーム "));
            frame.render_widget(paragraph, outer[0]);
        }
        HomeLayout::Wide => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(outer[0]);

            let art: Vec<Line> = app
                .tier()
                .art()
                .iter()
                .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::Yellow))))
                .collect();
            frame.render_widget(
                Paragraph::new(art)
                    .alignment(Alignment::Center)
                    .block(summary_block(" Piyo ").padding(Padding::vertical(1))),
                cols[0],
            );
            frame.render_widget(
                Paragraph::new(summary_lines(app)).block(summary_block(" ホーム ")),
                cols[1],
            );
        }
    }

    frame.render_widget(
        utils::controls_bar(&[("P / Enter", "Profile"), ("O", "Sign out"), ("Q", "Quit")]),
        outer[1],
    );
}

fn summary_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(title, Style::default().fg(Color::White)))
        .padding(Padding::horizontal(1))
}

fn summary_lines(app: &App) -> Vec<Line<'static>> {
    let name = app
        .profile
        .as_ref()
        .map(|p| p.nickname.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "ゲスト".to_string());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("こんにちは、{}さん", name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Entries: {}  (rank {} / 6)",
            app.entry_count,
            app.tier().rank()
        )),
    ];

    // Show the standard weight straight from the profile when it can be computed
    let standard = app
        .profile
        .as_ref()
        .and_then(|p| Targets::calculate(&p.height, p.sex?).ok());
    if let Some(targets) = standard {
        lines.push(Line::from(format!(
            "Standard weight: {}",
            format_kg(targets.standard_weight)
        )));
    }
    lines
}
