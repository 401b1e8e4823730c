//! Terminal session that restores the user's terminal however the app exits.

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use std::ops::{Deref, DerefMut};

/// Owns the ratatui terminal and undoes raw mode, the alternate screen and
/// mouse capture when dropped (early `?` returns included).
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalGuard {
    /// Switch the terminal into TUI mode.
    ///
    /// Mouse capture is enabled so stage columns can be clicked.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            Self::restore_terminal();
            return Err(e).context("Failed to enter alternate screen");
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                Self::restore_terminal();
                return Err(e).context("Failed to create terminal");
            }
        };

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Leave TUI mode now rather than at drop.
    pub fn restore(&mut self) {
        if !self.restored {
            self.restored = true;
            Self::restore_terminal();
        }
    }

    /// Best-effort reset, also used by the panic hook.
    pub fn restore_terminal() {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
        let _ = io::stdout().flush();
    }
}

impl Deref for TerminalGuard {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Install panic hook that restores terminal before printing panic.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal first so panic message is readable
        TerminalGuard::restore_terminal();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_terminal_is_callable() {
        // Terminal ops fail without a tty but must not panic
        TerminalGuard::restore_terminal();
    }
}
