use super::*;
use crate::app::{Draft, EditSession};
use crate::metrics::{format_kg, Targets};
use crate::types::ProfileField;

const FAT_COLOR: Color = Color::Yellow;
const LEAN_COLOR: Color = Color::Cyan;

pub fn render_profile_view(frame: &mut Frame, app: &App, body: Rect) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(12), Constraint::Length(3)])
        .split(body);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(40),
            Constraint::Percentage(35),
        ])
        .split(outer[0]);

    render_tier_panel(frame, app, panels[0]);
    render_fields_panel(frame, app, panels[1]);
    render_targets_panel(frame, app, panels[2]);

    let controls = if app.is_editing() {
        utils::controls_bar(&[
            ("Enter", "Save"),
            ("Tab", "Next field"),
            ("←/→", "Move / choose"),
            ("Esc", "Leave"),
        ])
    } else {
        utils::controls_bar(&[
            ("↑/↓", "Select"),
            ("Enter", "Edit"),
            ("C", "Calculate"),
            ("H", "Home"),
            ("O", "Sign out"),
            ("Q", "Quit"),
        ])
    };
    frame.render_widget(controls, outer[1]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::White),
        ))
        .padding(Padding::horizontal(1))
}

fn render_tier_panel(frame: &mut Frame, app: &App, area: Rect) {
    let tier = app.tier();
    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.extend(
        tier.art()
            .iter()
            .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::Yellow)))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Rank {} / 6", tier.rank()),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("{} entries", app.entry_count),
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel(tier.image_id()));
    frame.render_widget(paragraph, area);
}

fn render_fields_panel(frame: &mut Frame, app: &App, area: Rect) {
    let Some(profile) = &app.profile else {
        let text = if app.is_logged_in {
            "No profile yet"
        } else {
            "Not signed in"
        };
        let empty = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(panel("Profile"));
        frame.render_widget(empty, area);
        return;
    };

    let mut lines: Vec<Line> = vec![Line::from("")];
    for field in ProfileField::ALL {
        let focused = app.focused_field == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::styled(format!("{:<12}", field.label()), label_style)];

        match &app.edit {
            EditSession::Editing { field: f, draft } if *f == field => {
                let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
                match draft {
                    Draft::Text(input) => {
                        let (before, after) = input.split_at_cursor();
                        spans.extend(utils::with_cursor(before, after, style));
                    }
                    Draft::Sex(sex) => {
                        let shown = sex.map(|s| s.as_str()).unwrap_or("-");
                        spans.push(Span::styled(format!("< {} >", shown), style));
                    }
                }
                spans.push(Span::raw(unit_suffix(field)));
                spans.push(Span::styled("  [save]", Style::default().fg(Color::Green)));
            }
            _ => {
                let value = profile.field_text(field);
                let shown = if value.is_empty() { "-".to_string() } else { value };
                spans.push(Span::styled(shown, Style::default().fg(Color::White)));
                spans.push(Span::raw(unit_suffix(field)));
                if focused {
                    spans.push(Span::styled("  [edit]", Style::default().fg(Color::Yellow)));
                }
            }
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).block(panel("Profile"));
    frame.render_widget(paragraph, area);
}

fn unit_suffix(field: ProfileField) -> String {
    field.unit().map(|u| format!(" {}", u)).unwrap_or_default()
}

fn render_targets_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel("Targets");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let button_style = if app.can_calculate() {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(inner);

    let mut lines = vec![
        Line::from(Span::styled("[C] けいさん", button_style)),
        Line::from(""),
    ];
    match &app.targets {
        Some(targets) => {
            lines.push(target_line("Standard weight", targets.standard_weight, Color::White));
            lines.push(target_line("Standard fat", targets.standard_fat, FAT_COLOR));
            lines.push(target_line("Standard lean", targets.standard_lean, LEAN_COLOR));
        }
        None => lines.push(Line::from(Span::styled(
            "Set height and sex, then calculate",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    frame.render_widget(Paragraph::new(lines), split[0]);

    if let Some(targets) = &app.targets {
        render_composition(frame, targets, split[1]);
    }
}

fn target_line(label: &str, value: f64, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled("■ ", Style::default().fg(color)),
        Span::styled(format!("{:<16}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(format_kg(value), Style::default().fg(Color::White)),
    ])
}

fn render_composition(frame: &mut Frame, targets: &Targets, area: Rect) {
    use tui_piechart::{PieChart, PieSlice};

    if area.height < 4 {
        return;
    }

    let fat_pct = targets.fat_share() * 100.0;
    let slices = vec![
        PieSlice::new("Fat", fat_pct, FAT_COLOR),
        PieSlice::new("Lean", 100.0 - fat_pct, LEAN_COLOR),
    ];

    // Square-ish pie, legend underneath
    let pie_height = (area.width / 2).min(area.height.saturating_sub(1));
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(pie_height), Constraint::Min(0)])
        .split(area);

    let pie = PieChart::new(slices)
        .show_legend(false)
        .show_percentages(false);
    frame.render_widget(pie, split[0]);

    let legend = Paragraph::new(Line::from(vec![
        Span::styled("■ ", Style::default().fg(FAT_COLOR)),
        Span::styled(format!("fat {:.0}%  ", fat_pct), Style::default().fg(Color::DarkGray)),
        Span::styled("■ ", Style::default().fg(LEAN_COLOR)),
        Span::styled(
            format!("lean {:.0}%", 100.0 - fat_pct),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(legend, split[1]);
}
