use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::glyphs::{color_for_severity, glyph_for_severity};
use order_tracker::notifications::Toast;

const TOAST_WIDTH: u16 = 42;
const TOAST_HEIGHT: u16 = 4;

/// Stack area for the i-th toast, anchored top-right. None once the stack
/// runs off the bottom of the screen.
fn toast_area(screen: Rect, slot: u16) -> Option<Rect> {
    let width = TOAST_WIDTH.min(screen.width);
    let y = screen.y + 1 + slot * TOAST_HEIGHT;
    if y + TOAST_HEIGHT > screen.y + screen.height {
        return None;
    }
    Some(Rect::new(
        screen.x + screen.width - width,
        y,
        width,
        TOAST_HEIGHT,
    ))
}

/// Render toasts newest first, stacked down from the top-right corner.
pub fn render_toasts(frame: &mut Frame, toasts: &[Toast]) {
    let screen = frame.area();

    for (slot, toast) in toasts.iter().rev().enumerate() {
        let Some(area) = toast_area(screen, slot as u16) else {
            break;
        };

        let severity = toast.notification.severity;
        let color = color_for_severity(severity);
        let mut border_style = Style::default().fg(color);
        if severity.is_destructive() {
            border_style = border_style.add_modifier(Modifier::BOLD);
        }

        let body = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{} ", glyph_for_severity(severity)),
                Style::default().fg(color),
            ),
            Span::raw(toast.notification.description.clone()),
        ]))
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", toast.notification.title),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: true });

        frame.render_widget(Clear, area);
        frame.render_widget(body, area);
    }
}
