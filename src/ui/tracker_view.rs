use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::glyphs::{color_for_status, glyph_for_stage};
use order_tracker::{Outcome, StageStatus, Tracker};

/// Main tracker screen: heading, progress bar, one column per stage,
/// and the action/outcome bar.
pub struct TrackerView {
    /// Stage highlighted for keyboard jumps
    pub cursor: usize,
    /// Column rects from the last render, for mouse hit-testing
    stage_areas: Vec<Rect>,
}

impl TrackerView {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            stage_areas: Vec::new(),
        }
    }

    pub fn cursor_next(&mut self, stage_count: usize) {
        if stage_count > 0 {
            self.cursor = (self.cursor + 1) % stage_count;
        }
    }

    pub fn cursor_prev(&mut self, stage_count: usize) {
        if stage_count > 0 {
            self.cursor = if self.cursor == 0 {
                stage_count - 1
            } else {
                self.cursor - 1
            };
        }
    }

    /// Stage column under a terminal cell, if any
    pub fn stage_index_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.stage_areas
            .iter()
            .position(|area| area.contains(position))
    }

    pub fn render(&mut self, frame: &mut Frame, tracker: &Tracker, title: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Heading
                Constraint::Length(3), // Progress
                Constraint::Min(7),    // Stages
                Constraint::Length(4), // Actions / outcome
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let heading = Paragraph::new(Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::White),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(heading, chunks[0]);

        self.render_progress(frame, chunks[1], tracker);
        self.render_stages(frame, chunks[2], tracker);
        render_actions(frame, chunks[3], tracker);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::raw(" help  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ]))
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(footer, chunks[4]);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect, tracker: &Tracker) {
        let color = if tracker.is_cancelled() {
            Color::Red
        } else {
            Color::Cyan
        };

        let stage = tracker.current_stage();
        let label = format!(
            "{}/{} {}",
            tracker.current_index() + 1,
            tracker.stages().len(),
            stage.title
        );

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Progress "))
            .gauge_style(Style::default().fg(color))
            .ratio(tracker.progress().clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(gauge, area);
    }

    fn render_stages(&mut self, frame: &mut Frame, area: Rect, tracker: &Tracker) {
        let views = tracker.stages_view();
        let count = views.len() as u32;
        let constraints: Vec<Constraint> = views
            .iter()
            .map(|_| Constraint::Ratio(1, count))
            .collect();

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        self.stage_areas = columns.to_vec();

        for (view, column) in views.iter().zip(columns.iter()) {
            let color = color_for_status(view.status);
            let glyph = glyph_for_stage(view.symbol, view.status);
            let under_cursor = view.index == self.cursor && !tracker.is_cancelled();

            let mut border_style = Style::default().fg(color);
            if view.status == StageStatus::Active {
                border_style = border_style.add_modifier(Modifier::BOLD);
            }
            if under_cursor {
                border_style = border_style.add_modifier(Modifier::REVERSED);
            }

            let title_style = match view.status {
                StageStatus::Active => Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
                StageStatus::Cancelled => Style::default().fg(Color::Red),
                _ => Style::default().fg(Color::White),
            };

            let lines = vec![
                Line::from(Span::styled(
                    glyph,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(view.title.to_string(), title_style)),
                Line::from(Span::styled(
                    view.description.to_string(),
                    Style::default().fg(Color::Gray),
                )),
            ];

            let paragraph = Paragraph::new(lines)
                .block(
                    Block::default()
                        .title(format!(" {} ", view.index + 1))
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });

            frame.render_widget(paragraph, *column);
        }
    }
}

fn render_actions(frame: &mut Frame, area: Rect, tracker: &Tracker) {
    let mut lines = Vec::new();

    match tracker.outcome() {
        Outcome::Cancelled => {
            lines.push(Line::from(Span::styled(
                "Order Cancelled",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "Your order has been cancelled successfully",
                Style::default().fg(Color::Gray),
            )));
        }
        Outcome::Delivered => {
            lines.push(Line::from(Span::styled(
                "Order Delivered!",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "Thank you for your order",
                Style::default().fg(Color::Gray),
            )));
        }
        Outcome::InProgress => {}
    }

    let mut buttons = Vec::new();
    if tracker.can_advance() {
        buttons.push(Span::styled(
            " [n] Next Step ",
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        buttons.push(Span::raw("  "));
    }
    if tracker.can_cancel() {
        buttons.push(Span::styled(
            " [c] Cancel Order ",
            Style::default().fg(Color::White).bg(Color::Red),
        ));
    }
    if !buttons.is_empty() {
        lines.insert(0, Line::from(buttons));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_tracker::notifications::LogNotifier;
    use order_tracker::StageList;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn tracker() -> Tracker {
        Tracker::new(StageList::order_lifecycle(), Arc::new(LogNotifier))
    }

    fn render_to_string(view: &mut TrackerView, tracker: &Tracker) -> String {
        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| view.render(f, tracker, "Order Tracking"))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_cursor_wraps() {
        let mut view = TrackerView::new();
        view.cursor_prev(6);
        assert_eq!(view.cursor, 5);
        view.cursor_next(6);
        assert_eq!(view.cursor, 0);
        view.cursor_next(0);
        assert_eq!(view.cursor, 0);
    }

    #[test]
    fn test_render_shows_heading_and_actions() {
        let mut view = TrackerView::new();
        let text = render_to_string(&mut view, &tracker());

        assert!(text.contains("Order Tracking"));
        assert!(text.contains("Next Step"));
        assert!(text.contains("Cancel Order"));
        assert!(!text.contains("Order Delivered!"));
    }

    #[test]
    fn test_render_delivered_banner_hides_next_step() {
        let mut tracker = tracker();
        tracker.jump_to(5).unwrap();
        let mut view = TrackerView::new();
        let text = render_to_string(&mut view, &tracker);

        assert!(text.contains("Order Delivered!"));
        assert!(!text.contains("Next Step"));
        assert!(text.contains("Cancel Order"));
    }

    #[test]
    fn test_render_cancelled_banner_hides_buttons() {
        let mut tracker = tracker();
        tracker.cancel();
        let mut view = TrackerView::new();
        let text = render_to_string(&mut view, &tracker);

        assert!(text.contains("Order Cancelled"));
        assert!(!text.contains("Next Step"));
        assert!(!text.contains("Cancel Order"));
    }

    #[test]
    fn test_stage_hit_testing_after_render() {
        let tracker = tracker();
        let mut view = TrackerView::new();
        assert_eq!(view.stage_index_at(1, 7), None);

        render_to_string(&mut view, &tracker);

        // Stages row starts below heading (2) and progress (3); 120 cols / 6 = 20 each
        assert_eq!(view.stage_index_at(1, 7), Some(0));
        assert_eq!(view.stage_index_at(45, 7), Some(2));
        assert_eq!(view.stage_index_at(119, 7), Some(5));
        assert_eq!(view.stage_index_at(1, 0), None);
    }
}
