use super::*;
use crate::app::AuthFormField;
use crate::types::AuthMode;

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn render_auth_dialog(frame: &mut Frame, app: &App) {
    let Some(form) = &app.auth_form else {
        return;
    };

    let area = utils::centered_rect(56, 12, frame.area());
    frame.render_widget(Clear, area);

    let (title, intro) = match form.mode {
        AuthMode::Login => (" ろぐいん ", "Log in with your email and password."),
        AuthMode::SignUp => (" しんきとうろく ", "Create a new account."),
    };

    let email_focused = form.focused_field == AuthFormField::Email;
    let password_focused = form.focused_field == AuthFormField::Password;
    let value_style = Style::default().fg(Color::White);

    let mut email = vec![Span::styled("Email:    ", field_style(email_focused))];
    if email_focused {
        let (before, after) = form.email.split_at_cursor();
        email.extend(utils::with_cursor(before, after, value_style));
    } else {
        email.push(Span::styled(form.email.value.clone(), value_style));
    }

    // Password is masked
    let mask = |s: &str| "•".repeat(s.chars().count());
    let mut password = vec![Span::styled("Password: ", field_style(password_focused))];
    if password_focused {
        let (before, after) = form.password.split_at_cursor();
        password.extend(utils::with_cursor(&mask(before), &mask(after), value_style));
    } else {
        password.push(Span::styled(mask(&form.password.value), value_style));
    }

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(intro, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(email),
        Line::from(password),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(": Switch field  "),
            Span::styled("Ctrl+T", Style::default().fg(Color::Yellow)),
            Span::raw(": Login / Sign up  "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(": Submit  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(": Close"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(title, Style::default().fg(Color::Yellow)))
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(paragraph, area);
}

pub fn render_nickname_dialog(frame: &mut Frame, app: &App) {
    let Some(input) = &app.nickname_input else {
        return;
    };

    let area = utils::centered_rect(50, 9, frame.area());
    frame.render_widget(Clear, area);

    let (before, after) = input.split_at_cursor();
    let mut name = vec![Span::styled("Nickname: ", Style::default().fg(Color::Yellow))];
    name.extend(utils::with_cursor(before, after, Style::default().fg(Color::White)));

    let lines = vec![
        Line::from(""),
        Line::from("ニックネームを入力してください"),
        Line::from(""),
        Line::from(name),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(": Create profile  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(": Later"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(
                " ようこそ ",
                Style::default().fg(Color::Yellow),
            )),
    );
    frame.render_widget(paragraph, area);
}

pub fn render_alert(frame: &mut Frame, app: &App) {
    let Some(message) = &app.alert else {
        return;
    };

    let area = utils::centered_rect(60, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(": OK"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(Span::styled(" Alert ", Style::default().fg(Color::Red))),
        );
    frame.render_widget(paragraph, area);
}
