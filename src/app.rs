use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use std::sync::Arc;
use std::time::Duration;

use order_tracker::config::Config;
use order_tracker::notifications::{NotificationService, ToastBoard};
use order_tracker::{Notification, Notifier, Tracker, TrackerError};

use crate::ui::{install_panic_hook, render_toasts, HelpDialog, TerminalGuard, TrackerView};

pub struct App {
    config: Config,
    tracker: Tracker,
    toasts: ToastBoard,
    view: TrackerView,
    help_dialog: HelpDialog,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let stages = config.stage_list()?;
        let toasts = ToastBoard::new(
            config.notifications.toast_duration_ms,
            config.notifications.max_visible,
        );
        let service = NotificationService::from_config(&config, toasts.clone());

        tracing::info!(
            stages = stages.len(),
            os_notifications = config.notifications.os.enabled,
            "Tracker initialized"
        );

        Ok(Self {
            tracker: Tracker::new(stages, Arc::new(service)),
            toasts,
            view: TrackerView::new(),
            help_dialog: HelpDialog::new(),
            should_quit: false,
            config,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let mut terminal = TerminalGuard::new()?;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            self.toasts.prune();

            terminal.draw(|f| {
                self.view.render(f, &self.tracker, &self.config.ui.title);
                render_toasts(f, &self.toasts.visible());
                self.help_dialog.render(f);
            })?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        terminal.restore();
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        // Help dialog takes priority
        if self.help_dialog.visible {
            self.help_dialog.visible = false;
            return;
        }

        let stage_count = self.tracker.stages().len();

        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.help_dialog.toggle();
            }
            KeyCode::Char('n') | KeyCode::Enter | KeyCode::Char(' ') => {
                if self.tracker.advance() {
                    self.view.cursor = self.tracker.current_index();
                }
            }
            KeyCode::Char('c') => {
                self.tracker.cancel();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.view.cursor_prev(stage_count);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.view.cursor_next(stage_count);
            }
            KeyCode::Char('j') | KeyCode::Char('g') => {
                self.jump_to(self.view.cursor);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.jump_to(index);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.help_dialog.visible {
            return;
        }

        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(index) = self.view.stage_index_at(mouse.column, mouse.row) {
                self.view.cursor = index;
                self.jump_to(index);
            }
        }
    }

    fn jump_to(&mut self, index: usize) {
        match self.tracker.jump_to(index) {
            Ok(true) => self.view.cursor = index,
            Ok(false) => {}
            Err(TrackerError::IndexOutOfRange { len, .. }) => {
                self.toasts.notify(&Notification::warning(
                    "Unknown stage",
                    format!("There are only {len} stages"),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use order_tracker::{Severity, StageStatus};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        App::new(Config::default()).unwrap()
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_next_key_advances_and_posts_toast() {
        let mut app = app();

        app.handle_key(KeyCode::Char('n'));

        assert_eq!(app.tracker.current_index(), 1);
        assert_eq!(app.view.cursor, 1);
        let toasts = app.toasts.visible();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].notification.title, "Start Ride");
    }

    #[test]
    fn test_digit_jumps_to_stage() {
        let mut app = app();

        app.handle_key(KeyCode::Char('5'));

        assert_eq!(app.tracker.current_index(), 4);
        assert_eq!(app.tracker.status_of(4), Some(StageStatus::Active));
    }

    #[test]
    fn test_digit_past_last_stage_warns() {
        let mut app = app();

        app.handle_key(KeyCode::Char('9'));

        assert_eq!(app.tracker.current_index(), 0);
        let toasts = app.toasts.visible();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].notification.severity, Severity::Warning);
    }

    #[test]
    fn test_cursor_jump() {
        let mut app = app();

        app.handle_key(KeyCode::Left);
        assert_eq!(app.view.cursor, 5);
        app.handle_key(KeyCode::Char('j'));

        assert_eq!(app.tracker.current_index(), 5);
        assert!(app.tracker.is_complete());
    }

    #[test]
    fn test_cancel_key_blocks_further_moves() {
        let mut app = app();
        app.handle_key(KeyCode::Char('3'));

        app.handle_key(KeyCode::Char('c'));
        app.handle_key(KeyCode::Char('n'));
        app.handle_key(KeyCode::Char('1'));

        assert!(app.tracker.is_cancelled());
        assert_eq!(app.tracker.current_index(), 2);
        let last = app.toasts.visible().pop().unwrap();
        assert_eq!(last.notification.severity, Severity::Error);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();

        app.handle_key(KeyCode::Char('?'));
        assert!(app.help_dialog.visible);

        app.handle_key(KeyCode::Char('n'));
        assert!(!app.help_dialog.visible);
        assert_eq!(app.tracker.current_index(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = self::app();
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_click_on_stage_column_jumps() {
        let mut app = app();
        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| app.view.render(f, &app.tracker, "Order Tracking"))
            .unwrap();

        app.handle_mouse(click(65, 8));

        assert_eq!(app.tracker.current_index(), 3);
        assert_eq!(app.view.cursor, 3);
    }

    #[test]
    fn test_click_outside_stages_ignored() {
        let mut app = app();
        app.handle_mouse(click(5, 5));
        assert_eq!(app.tracker.current_index(), 0);
        assert!(app.toasts.is_empty());
    }
}
