//! Error type for the terminal UI engine.

use std::io;

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors the engine can report.
///
/// Most of these are deliberately unreachable in normal operation. Screen-
/// not-found navigation and unknown key sequences are *not* represented
/// here: they are diagnostics, not errors, and never unwind past the frame
/// that produced them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying terminal I/O failed (raw mode, alternate screen, size
    /// query, write).
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// `Application` was asked to run without both a screen registry and a
    /// menu system configured. Represented as a builder-time error rather
    /// than a runtime panic so construction order is a type-level guarantee.
    #[error("application misconfigured: {0}")]
    Configuration(&'static str),
}
