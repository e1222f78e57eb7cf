//! Immutable theme context: named style slots threaded through the renderer.
//!
//! The source kept a process-wide, mutable style table; this redesigns it
//! as a value object the renderer carries for its lifetime and components
//! read through `renderer.theme_context()` rather than any global.

use crate::style::{Color, Style, StyleToken};

/// A read-only bundle of named style slots.
///
/// Every field is an opaque [`StyleToken`]; components never construct or
/// inspect the underlying SGR bytes, only pass the token through to
/// [`crate::framebuffer::FrameBuffer::write_at`] and friends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeContext {
    /// Default body text.
    pub normal_text: StyleToken,
    /// Menu bar label text.
    pub menu_text: StyleToken,
    /// The hotkey letter within a menu label.
    pub menu_hotkey: StyleToken,
    /// Status line text.
    pub status_text: StyleToken,
    /// A key hint within the status line.
    pub status_key: StyleToken,
    /// The currently selected row/item.
    pub selected_text: StyleToken,
    /// Border of a focused panel.
    pub active_border: StyleToken,
    /// Border of an unfocused panel.
    pub inactive_border: StyleToken,
    /// Text inside an input field.
    pub input_text: StyleToken,
    /// The input caret.
    pub input_cursor: StyleToken,
    /// Scrollbar track/thumb.
    pub scrollbar: StyleToken,
    /// Error text.
    pub error_text: StyleToken,
    /// Warning text.
    pub warning_text: StyleToken,
    /// Emphasized/highlighted text.
    pub highlight_text: StyleToken,
    /// De-emphasized text.
    pub muted_text: StyleToken,
}

impl ThemeContext {
    /// The built-in dark theme, grounded in a classic blue Midnight
    /// Commander palette.
    pub fn default_dark() -> Self {
        let base = Style::new().fg(Color::White).bg(Color::Blue);
        Self {
            normal_text: base.to_token(),
            menu_text: Style::new().fg(Color::Black).bg(Color::White).to_token(),
            menu_hotkey: Style::new()
                .fg(Color::Red)
                .bg(Color::White)
                .bold(true)
                .to_token(),
            status_text: Style::new().fg(Color::Black).bg(Color::Cyan).to_token(),
            status_key: Style::new()
                .fg(Color::Yellow)
                .bg(Color::Cyan)
                .bold(true)
                .to_token(),
            selected_text: Style::new()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .to_token(),
            active_border: Style::new()
                .fg(Color::BrightWhite)
                .bg(Color::Blue)
                .bold(true)
                .to_token(),
            inactive_border: base.to_token(),
            input_text: Style::new().fg(Color::Black).bg(Color::White).to_token(),
            input_cursor: Style::new()
                .fg(Color::White)
                .bg(Color::Black)
                .reverse(true)
                .to_token(),
            scrollbar: Style::new().fg(Color::Cyan).bg(Color::Blue).to_token(),
            error_text: Style::new()
                .fg(Color::BrightWhite)
                .bg(Color::Red)
                .bold(true)
                .to_token(),
            warning_text: Style::new().fg(Color::Yellow).bg(Color::Blue).to_token(),
            highlight_text: Style::new()
                .fg(Color::BrightYellow)
                .bg(Color::Blue)
                .bold(true)
                .to_token(),
            muted_text: Style::new().fg(Color::BrightBlack).bg(Color::Blue).to_token(),
        }
    }

    /// A colorless theme for `--no-color` terminals: every slot relies on
    /// `bold`/`reverse`/`dim` alone, never a named color.
    pub fn monochrome() -> Self {
        // An explicit reset rather than `Style::new().to_token()`: the
        // latter is empty, which collides with `StyleToken::sentinel()` and
        // would defeat `FrameBuffer::invalidate`'s forced-redraw diff.
        let plain = StyleToken::from_raw("\x1b[0m");
        Self {
            normal_text: plain.clone(),
            menu_text: Style::new().reverse(true).to_token(),
            menu_hotkey: Style::new().reverse(true).bold(true).to_token(),
            status_text: Style::new().reverse(true).to_token(),
            status_key: Style::new().reverse(true).bold(true).to_token(),
            selected_text: Style::new().reverse(true).to_token(),
            active_border: Style::new().bold(true).to_token(),
            inactive_border: plain.clone(),
            input_text: Style::new().reverse(true).to_token(),
            input_cursor: Style::new().reverse(true).to_token(),
            scrollbar: plain.clone(),
            error_text: Style::new().bold(true).to_token(),
            warning_text: Style::new().bold(true).to_token(),
            highlight_text: Style::new().bold(true).to_token(),
            muted_text: Style::new().dim(true).to_token(),
        }
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::default_dark()
    }
}
