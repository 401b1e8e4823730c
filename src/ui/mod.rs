pub mod dialogs;
mod glyphs;
pub mod keybindings;
pub mod terminal_guard;
mod toasts;
pub mod tracker_view;

pub use dialogs::HelpDialog;
pub use terminal_guard::{install_panic_hook, TerminalGuard};
pub use toasts::render_toasts;
pub use tracker_view::TrackerView;
