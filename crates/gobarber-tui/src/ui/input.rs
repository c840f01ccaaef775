//! Keyboard and mouse handling for the TUI.
//!
//! Events are translated into `App` state changes. Form submission only starts
//! the request; its outcome is applied on a later tick.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, AppState, Screen, SignInFocus, SignUpFocus};

use super::toasts;

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Dismiss works on every screen
    if key.code == KeyCode::Char('d') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.toasts.dismiss_oldest();
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match app.screen {
        Screen::SignIn => handle_sign_in_input(app, key),
        Screen::SignUp => handle_sign_up_input(app, key),
        Screen::Dashboard => handle_dashboard_input(app, key),
    }
}

/// Handle mouse input. A left click on a toast dismisses it.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        let visible = app.toasts.visible();
        if let Some(id) = toasts::hit_test(area, &visible, mouse.column, mouse.row) {
            app.toasts.dismiss(&id);
        }
    }
}

fn handle_sign_in_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.sign_in_focus = app.sign_in_focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.sign_in_focus = app.sign_in_focus.prev();
        }
        KeyCode::Enter => match app.sign_in_focus {
            SignInFocus::Email => app.sign_in_focus = SignInFocus::Password,
            SignInFocus::Password | SignInFocus::Button => {
                app.submit_sign_in();
            }
            SignInFocus::SignUpLink => app.go_to_sign_up(),
        },
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) if is_plain(key) => {
            app.input_char(c);
        }
        _ => {}
    }
    Ok(false)
}

fn handle_sign_up_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.go_to_sign_in(),
        KeyCode::Down | KeyCode::Tab => {
            app.sign_up_focus = app.sign_up_focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.sign_up_focus = app.sign_up_focus.prev();
        }
        KeyCode::Enter => match app.sign_up_focus {
            SignUpFocus::Name | SignUpFocus::Email => {
                app.sign_up_focus = app.sign_up_focus.next();
            }
            SignUpFocus::Password | SignUpFocus::Button => {
                app.submit_sign_up();
            }
            SignUpFocus::BackLink => app.go_to_sign_in(),
        },
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) if is_plain(key) => {
            app.input_char(c);
        }
        _ => {}
    }
    Ok(false)
}

/// No Ctrl or Alt held, so the key is text
fn is_plain(key: KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('S') => app.sign_out(),
        KeyCode::Char('q') | KeyCode::Esc => app.state = AppState::ConfirmingQuit,
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobarber_core::toast::NewToast;

    use std::sync::Arc;
    use std::time::Duration;

    use gobarber_core::config::Config;
    use gobarber_core::storage::MemoryStorage;

    use crate::app::tests::stub::SlowApi;
    use crate::app::tests::{settle, test_app};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_input(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[tokio::test]
    async fn test_full_sign_in_by_keyboard() {
        let mut app = test_app(true);

        type_text(&mut app, "ana@example.com");
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.sign_in_focus, SignInFocus::Password);
        type_text(&mut app, "123456");
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        settle(&mut app).await;

        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_returns_while_sign_in_is_pending() {
        let mut app = App::with_parts(
            Config::default(),
            Arc::new(MemoryStorage::new()),
            Arc::new(SlowApi { delay: Duration::from_secs(20) }),
        );
        app.sign_in_form.email = "ana@example.com".into();
        app.sign_in_form.password = "123456".into();
        app.sign_in_focus = SignInFocus::Button;

        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.submitting);

        // Keys are still handled, and repeat presses send nothing
        handle_input(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.sign_in_focus, SignInFocus::Password);
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.screen, Screen::SignIn);

        tokio::time::sleep(Duration::from_secs(21)).await;
        app.tick();
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn test_modified_chars_are_not_typed() {
        let mut app = test_app(true);

        handle_input(&mut app, KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)).unwrap();
        handle_input(&mut app, KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT)).unwrap();
        assert!(app.sign_in_form.email.is_empty());

        handle_input(&mut app, KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(app.sign_in_form.email, "A");
    }

    #[tokio::test]
    async fn test_sign_up_link_and_back() {
        let mut app = test_app(true);
        app.sign_in_focus = SignInFocus::SignUpLink;

        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.screen, Screen::SignUp);

        type_text(&mut app, "Ana");
        assert_eq!(app.sign_up_form.name, "Ana");

        handle_input(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.screen, Screen::SignIn);
    }

    #[tokio::test]
    async fn test_sign_up_submit_reports_errors_inline() {
        let mut app = test_app(true);
        app.go_to_sign_up();
        app.sign_up_focus = SignUpFocus::Button;

        handle_input(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.screen, Screen::SignUp);
        assert_eq!(app.sign_up_errors.len(), 3);
        assert!(app.toasts.visible().is_empty());
    }

    #[tokio::test]
    async fn test_quit_confirmation() {
        let mut app = test_app(true);

        assert!(!handle_input(&mut app, key(KeyCode::Esc)).unwrap());
        assert_eq!(app.state, AppState::ConfirmingQuit);

        assert!(!handle_input(&mut app, key(KeyCode::Char('n'))).unwrap());
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))).unwrap());
        assert_eq!(app.state, AppState::Quitting);
    }

    #[tokio::test]
    async fn test_dashboard_sign_out() {
        let mut app = test_app(true);
        app.sign_in_form.email = "ana@example.com".into();
        app.sign_in_form.password = "123456".into();
        app.submit_sign_in();
        settle(&mut app).await;
        assert_eq!(app.screen, Screen::Dashboard);

        handle_input(&mut app, key(KeyCode::Char('s'))).unwrap();

        assert_eq!(app.screen, Screen::SignIn);
        assert!(!app.session.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ctrl_d_dismisses_oldest_toast() {
        let mut app = test_app(true);
        let store = app.toasts.store().clone();
        store.add_toast(NewToast::info("first"));
        let second = store.add_toast(NewToast::info("second"));
        app.tick();

        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        handle_input(&mut app, ctrl_d).unwrap();

        assert_eq!(app.toasts.visible(), vec![second]);
        // Not typed into the focused field
        assert!(app.sign_in_form.email.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_dismisses_toast() {
        let mut app = test_app(true);
        let store = app.toasts.store().clone();
        let msg = store.add_toast(NewToast::error("Erro no cadastro"));
        app.tick();

        let area = Rect::new(0, 0, 100, 30);
        let miss = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut app, miss, area);
        assert!(store.contains(msg.id()));

        let hit = MouseEvent { column: 70, row: 2, ..miss };
        handle_mouse(&mut app, hit, area);
        assert!(store.is_empty());
        assert_eq!(app.toasts.mounted_count(), 0);
    }
}
