use ratatui::style::{Color, Modifier, Style};

use gobarber_core::toast::ToastType;

// Color palette
pub const PRIMARY: Color = Color::Rgb(255, 144, 0);
pub const BACKGROUND: Color = Color::Rgb(49, 46, 56);
pub const ERROR: Color = Color::Rgb(197, 48, 48);
pub const MUTED: Color = Color::Rgb(102, 96, 112);
pub const HIGHLIGHT: Color = Color::Rgb(35, 33, 41);

// Toast palette: (foreground, background)
const TOAST_INFO: (Color, Color) = (Color::Rgb(49, 114, 183), Color::Rgb(235, 248, 255));
const TOAST_SUCCESS: (Color, Color) = (Color::Rgb(46, 101, 106), Color::Rgb(230, 255, 250));
const TOAST_ERROR: (Color, Color) = (Color::Rgb(197, 48, 48), Color::Rgb(253, 222, 222));

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(HIGHLIGHT)
        .fg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn input_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn screen_style() -> Style {
    Style::default().bg(BACKGROUND)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(HIGHLIGHT).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

fn toast_colors(kind: ToastType) -> (Color, Color) {
    match kind {
        ToastType::Info => TOAST_INFO,
        ToastType::Success => TOAST_SUCCESS,
        ToastType::Error => TOAST_ERROR,
    }
}

pub fn toast_style(kind: ToastType) -> Style {
    let (fg, bg) = toast_colors(kind);
    Style::default().fg(fg).bg(bg)
}

pub fn toast_title_style(kind: ToastType) -> Style {
    toast_style(kind).add_modifier(Modifier::BOLD)
}
