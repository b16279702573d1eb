use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

mod dialogs;
mod home_view;
mod landing_view;
mod profile_view;
pub(super) mod utils;

const TITLE: &str = " けんこうCheers!";

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, root[0]);

    let body = root[1];
    match app.current_view {
        View::Landing => landing_view::render_landing_view(frame, app, body),
        View::Profile => profile_view::render_profile_view(frame, app, body),
        View::Home => home_view::render_home_view(frame, app, body),
    }

    render_status(frame, app, root[2]);

    // Overlays, topmost last
    if app.auth_form.is_some() {
        dialogs::render_auth_dialog(frame, app);
    }
    if app.nickname_input.is_some() {
        dialogs::render_nickname_dialog(frame, app);
    }
    if app.alert.is_some() {
        dialogs::render_alert(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let throbber_area = Rect {
        x: area.x + 1,
        y: area.y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        label_area,
    );
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = &app.status_message else {
        return;
    };
    let color = if message.starts_with("Warning") || message.starts_with("Could not") {
        Color::Red
    } else {
        Color::DarkGray
    };
    frame.render_widget(
        Paragraph::new(Span::styled(message.as_str(), Style::default().fg(color)))
            .alignment(Alignment::Center),
        area,
    );
}
