use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use gobarber_core::forms::FieldErrors;

use crate::app::{App, AppState, Screen, SignInFocus, SignUpFocus};

use super::{styles, toasts};

/// Visible width of a text input
const FIELD_WIDTH: usize = 24;

const LOGO: [&str; 3] = [
    "   ╔═╗╔═╗╔╗ ╔═╗╦═╗╔╗ ╔═╗╦═╗",
    "   ║ ╦║ ║╠╩╗╠═╣╠╦╝╠╩╗║╣ ╠╦╝",
    "   ╚═╝╚═╝╚═╝╩ ╩╩╚═╚═╝╚═╝╩╚═",
];

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    frame.render_widget(Block::default().style(styles::screen_style()), chunks[0]);

    match app.screen {
        Screen::SignIn => render_sign_in(frame, app, chunks[0]),
        Screen::SignUp => render_sign_up(frame, app, chunks[0]),
        Screen::Dashboard => render_dashboard(frame, app, chunks[0]),
    }
    render_status_bar(frame, app, chunks[1]);

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }

    // Toasts sit above everything else
    toasts::render(frame, &app.toasts.visible());
}

fn logo_lines() -> Vec<Line<'static>> {
    LOGO.iter()
        .map(|row| Line::from(Span::styled(*row, styles::title_style())))
        .collect()
}

/// One labelled input row, plus its validation message when there is one
fn field_lines(
    label: &str,
    value: &str,
    masked: bool,
    focused: bool,
    error: Option<&str>,
) -> Vec<Line<'static>> {
    let shown: String = if masked {
        "*".repeat(value.chars().count().min(FIELD_WIDTH))
    } else {
        // Keep the tail visible while typing
        let skip = value.chars().count().saturating_sub(FIELD_WIDTH);
        value.chars().skip(skip).collect()
    };
    let style = if focused {
        styles::selected_style()
    } else {
        styles::input_style()
    };
    let cursor = if focused { "▌" } else { " " };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("   {:>9}: [", label), styles::muted_style()),
        Span::styled(format!("{:<width$}{}", shown, cursor, width = FIELD_WIDTH), style),
        Span::styled("]", styles::muted_style()),
    ])];

    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!("              {}", error),
            styles::error_style(),
        )));
    }
    lines
}

fn button_line(label: &str, focused: bool) -> Line<'static> {
    if focused {
        Line::from(vec![
            Span::raw("             ["),
            Span::styled(format!(" ▶ {} ◀ ", label), styles::selected_style()),
            Span::raw("]"),
        ])
    } else {
        Line::from(vec![
            Span::raw("             ["),
            Span::styled(format!("   {}   ", label), styles::input_style()),
            Span::raw("]"),
        ])
    }
}

fn link_line(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::title_style()
    };
    Line::from(vec![Span::raw("   "), Span::styled(label.to_string(), style)])
}

fn render_form(frame: &mut Frame, area: Rect, heading: &str, body: Vec<Line<'static>>) {
    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("   {}", heading),
        styles::input_style(),
    )));
    lines.push(Line::from(""));
    lines.extend(body);

    let height = lines.len() as u16 + 2;
    let dialog = centered_rect_fixed(46, height, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Clear, dialog);
    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

fn render_sign_in(frame: &mut Frame, app: &App, area: Rect) {
    let errors: &FieldErrors = &app.sign_in_errors;
    let focus = app.sign_in_focus;

    let mut body = Vec::new();
    body.extend(field_lines(
        "E-mail",
        &app.sign_in_form.email,
        false,
        focus == SignInFocus::Email,
        errors.get("email"),
    ));
    body.extend(field_lines(
        "Senha",
        &app.sign_in_form.password,
        true,
        focus == SignInFocus::Password,
        errors.get("password"),
    ));
    body.push(Line::from(""));
    let label = if app.submitting { "Entrando..." } else { "Entrar" };
    body.push(button_line(label, focus == SignInFocus::Button));
    body.push(Line::from(""));
    body.push(link_line("Criar conta", focus == SignInFocus::SignUpLink));

    render_form(frame, area, "Faça seu logon", body);
}

fn render_sign_up(frame: &mut Frame, app: &App, area: Rect) {
    let errors: &FieldErrors = &app.sign_up_errors;
    let focus = app.sign_up_focus;

    let mut body = Vec::new();
    body.extend(field_lines(
        "Nome",
        &app.sign_up_form.name,
        false,
        focus == SignUpFocus::Name,
        errors.get("name"),
    ));
    body.extend(field_lines(
        "E-mail",
        &app.sign_up_form.email,
        false,
        focus == SignUpFocus::Email,
        errors.get("email"),
    ));
    body.extend(field_lines(
        "Senha",
        &app.sign_up_form.password,
        true,
        focus == SignUpFocus::Password,
        errors.get("password"),
    ));
    body.push(Line::from(""));
    let label = if app.submitting { "Enviando..." } else { "Cadastrar" };
    body.push(button_line(label, focus == SignUpFocus::Button));
    body.push(Line::from(""));
    body.push(link_line("← Voltar para o logon", focus == SignUpFocus::BackLink));

    render_form(frame, area, "Faça seu cadastro", body);
}

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = logo_lines();
    lines.push(Line::from(""));

    match app.session.user() {
        Some(user) => {
            lines.push(Line::from(vec![
                Span::styled("   Bem-vindo, ", styles::input_style()),
                Span::styled(user.display_name().to_string(), styles::title_style()),
            ]));
            if let Some(email) = user.email {
                lines.push(Line::from(Span::styled(
                    format!("   {}", email),
                    styles::muted_style(),
                )));
            }
        }
        None => {
            lines.push(Line::from(Span::styled("   Sessão encerrada", styles::muted_style())));
        }
    }

    let dialog = centered_rect_fixed(46, lines.len() as u16 + 2, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts: &[(&str, &str)] = match app.screen {
        Screen::SignIn | Screen::SignUp => &[
            ("Tab", "next"),
            ("Enter", "select"),
            ("Ctrl+D", "dismiss"),
            ("Esc", "quit"),
        ],
        Screen::Dashboard => &[("s", "sign out"), ("Ctrl+D", "dismiss"), ("q", "quit")],
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, desc)) in shortcuts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(format!("[{}]", key), styles::help_key_style()));
        spans.push(Span::raw(format!(" {}", desc)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 9, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("   Sair do GoBarber?", styles::input_style())));
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("[y]", styles::help_key_style()),
        Span::raw(" sim   "),
        Span::styled("[n]", styles::help_key_style()),
        Span::raw(" não"),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::app::tests::{settle, test_app};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_centered_rect_fixed() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect_fixed(46, 10, area), Rect::new(27, 15, 46, 10));
        // Clamped to small screens
        let small = Rect::new(0, 0, 20, 5);
        assert_eq!(centered_rect_fixed(46, 10, small), Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_field_lines_masks_and_reports_error() {
        let lines = field_lines("Senha", "secret", true, false, Some("Senha obrigatória"));
        assert_eq!(lines.len(), 2);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("******"));
        assert!(!text.contains("secret"));
    }

    #[tokio::test]
    async fn test_sign_in_screen_shows_inline_errors_and_toasts() {
        let mut app = test_app(false);
        app.sign_in_form.email = "ana@example.com".into();
        app.sign_in_form.password = "x".into();
        app.submit_sign_in();
        settle(&mut app).await;
        app.sign_in_form.email.clear();
        app.submit_sign_in();

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Faça seu logon"));
        assert!(text.contains("E-mail obrigatório"));
        assert!(text.contains("Erro na autenticação"));
    }
}
