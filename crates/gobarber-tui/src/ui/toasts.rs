//! Notification stack drawn at the top-right corner over every screen.
//!
//! Layout is a pure function of the terminal area and the messages, so the
//! same geometry serves both drawing and mouse hit-testing.

use ratatui::{
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use gobarber_core::toast::{ToastMessage, ToastType};

use super::styles;

/// Outer width of one toast, borders included.
const TOAST_WIDTH: u16 = 40;

/// Gap between the toasts and the screen edges / each other.
const TOAST_MARGIN: u16 = 1;

/// Close affordance shown right of the title.
const CLOSE_LABEL: &str = "[x]";

fn icon(kind: ToastType) -> &'static str {
    match kind {
        ToastType::Info => "i",
        ToastType::Success => "✓",
        ToastType::Error => "!",
    }
}

/// Title row plus the description, sized to the inner width of the toast.
fn toast_lines(message: &ToastMessage, inner_width: u16) -> Vec<Line<'static>> {
    let kind = message.kind();
    let title_width = (inner_width as usize).saturating_sub(2 + CLOSE_LABEL.len() + 1);
    let title: String = message.title().chars().take(title_width).collect();
    let padding = title_width.saturating_sub(title.chars().count());

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", icon(kind)), styles::toast_title_style(kind)),
        Span::styled(title, styles::toast_title_style(kind)),
        Span::raw(" ".repeat(padding + 1)),
        Span::styled(CLOSE_LABEL, styles::toast_style(kind)),
    ])];

    if let Some(description) = message.description() {
        lines.push(Line::from(Span::styled(
            description.to_string(),
            styles::toast_style(kind),
        )));
    }
    lines
}

fn toast_paragraph(message: &ToastMessage, inner_width: u16) -> Paragraph<'static> {
    Paragraph::new(toast_lines(message, inner_width)).wrap(Wrap { trim: false })
}

/// Outer height of a toast: the wrapped text plus both borders.
fn toast_height(message: &ToastMessage, inner_width: u16) -> u16 {
    let rows = toast_paragraph(message, inner_width).line_count(inner_width);
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
}

/// Screen rectangles for each toast, oldest on top. Toasts that do not fit
/// below the previous ones are left out.
pub fn toast_areas(area: Rect, messages: &[ToastMessage]) -> Vec<Rect> {
    let width = TOAST_WIDTH.min(area.width.saturating_sub(TOAST_MARGIN * 2));
    if width < 3 {
        return Vec::new();
    }
    let x = area.x + area.width.saturating_sub(width + TOAST_MARGIN);
    let mut y = area.y + TOAST_MARGIN;

    let mut areas = Vec::with_capacity(messages.len());
    for message in messages {
        let height = toast_height(message, width - 2);
        if y.saturating_add(height) > area.bottom() {
            break;
        }
        areas.push(Rect::new(x, y, width, height));
        y += height + TOAST_MARGIN;
    }
    areas
}

/// Id of the toast drawn under the given cell, if any.
pub fn hit_test(area: Rect, messages: &[ToastMessage], column: u16, row: u16) -> Option<String> {
    toast_areas(area, messages)
        .into_iter()
        .zip(messages)
        .find(|(rect, _)| rect.contains(Position::new(column, row)))
        .map(|(_, message)| message.id().to_string())
}

pub fn render(frame: &mut Frame, messages: &[ToastMessage]) {
    let areas = toast_areas(frame.area(), messages);

    for (area, message) in areas.into_iter().zip(messages) {
        let kind = message.kind();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::toast_title_style(kind))
            .style(styles::toast_style(kind));

        let paragraph = toast_paragraph(message, area.width.saturating_sub(2)).block(block);

        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobarber_core::toast::{NewToast, ToastStore};

    fn messages(toasts: Vec<NewToast>) -> Vec<ToastMessage> {
        let store = ToastStore::new();
        for toast in toasts {
            store.add_toast(toast);
        }
        store.messages()
    }

    #[test]
    fn test_toasts_stack_top_right() {
        let screen = Rect::new(0, 0, 100, 30);
        let msgs = messages(vec![
            NewToast::info("one"),
            NewToast::error("two").with_description("short"),
        ]);

        let areas = toast_areas(screen, &msgs);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0], Rect::new(59, 1, 40, 3));
        assert_eq!(areas[1], Rect::new(59, 5, 40, 4));
    }

    #[test]
    fn test_long_description_grows_toast() {
        let screen = Rect::new(0, 0, 100, 30);
        let msgs = messages(vec![NewToast::error("Erro no cadastro")
            .with_description("Ocorreu um erro ao fazer o cadastro, tente novamente")]);

        let areas = toast_areas(screen, &msgs);

        // Description wraps onto two rows of the 38-wide interior
        assert_eq!(areas[0].height, 5);
    }

    #[test]
    fn test_description_wraps_on_words() {
        let screen = Rect::new(0, 0, 100, 30);
        // 72 chars would fit two rows by count, but each word starts a new row
        let description = format!("{} {} {}", "a".repeat(30), "b".repeat(30), "c".repeat(10));
        let msgs = messages(vec![NewToast::info("Aviso").with_description(description)]);

        let areas = toast_areas(screen, &msgs);

        assert_eq!(areas[0].height, 6);
    }

    #[test]
    fn test_huge_description_does_not_overflow() {
        let screen = Rect::new(0, 0, 100, 30);
        let msgs = messages(vec![
            NewToast::info("Aviso").with_description("x ".repeat(1_500_000)),
            NewToast::info("next"),
        ]);

        // Too tall for the screen, so nothing is laid out after it either
        assert!(toast_areas(screen, &msgs).is_empty());
    }

    #[test]
    fn test_overflowing_toasts_are_skipped() {
        let screen = Rect::new(0, 0, 80, 7);
        let msgs = messages(vec![
            NewToast::info("a"),
            NewToast::info("b"),
            NewToast::info("c"),
        ]);

        assert_eq!(toast_areas(screen, &msgs).len(), 1);
    }

    #[test]
    fn test_narrow_screen() {
        let screen = Rect::new(0, 0, 20, 10);
        let msgs = messages(vec![NewToast::info("a")]);
        let areas = toast_areas(screen, &msgs);
        assert_eq!(areas[0].width, 18);

        assert!(toast_areas(Rect::new(0, 0, 3, 10), &msgs).is_empty());
    }

    #[test]
    fn test_hit_test() {
        let screen = Rect::new(0, 0, 100, 30);
        let msgs = messages(vec![NewToast::info("one"), NewToast::info("two")]);

        assert_eq!(hit_test(screen, &msgs, 60, 2).as_deref(), Some(msgs[0].id()));
        assert_eq!(hit_test(screen, &msgs, 98, 6).as_deref(), Some(msgs[1].id()));
        assert_eq!(hit_test(screen, &msgs, 10, 2), None);
        // The gap between toasts is not a hit
        assert_eq!(hit_test(screen, &msgs, 60, 4), None);
    }
}
