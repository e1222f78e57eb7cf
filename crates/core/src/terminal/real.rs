//! Real-terminal driver backed by `crossterm`.

use std::io::{self, Read, Write};
use std::time::Duration;

use crossterm::{
    cursor, execute, queue,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::traits::Terminal;

/// A live TTY driver.
///
/// `crossterm` owns raw-mode, alternate-screen, and size-query plumbing;
/// this driver deliberately does **not** use `crossterm::event` to parse
/// key events — `crossterm::event::poll` is used only as a
/// byte-availability check, and bytes are then read one at a time from
/// stdin so the engine's own [`crate::key_decoder::KeyDecoder`] owns all
/// escape-sequence interpretation.
pub struct RealTerminal {
    initialized: bool,
}

impl RealTerminal {
    /// Create a driver. Call [`Terminal::initialize`] before use.
    pub fn new() -> Self {
        Self { initialized: false }
    }
}

impl Default for RealTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for RealTerminal {
    fn size(&self) -> (u16, u16) {
        terminal::size().unwrap_or((80, 24))
    }

    fn read_input(&mut self) -> Option<u8> {
        if !crossterm::event::poll(Duration::from_millis(0)).unwrap_or(false) {
            return None;
        }
        let mut buf = [0u8; 1];
        match io::stdin().read(&mut buf) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }

    fn has_input(&mut self) -> bool {
        crossterm::event::poll(Duration::from_millis(0)).unwrap_or(false)
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(bytes);
        let _ = stdout.flush();
    }

    fn initialize(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        queue!(stdout, cursor::Hide)?;
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
        self.initialized = true;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        let _ = queue!(stdout, cursor::Show);
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        self.initialized = false;
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

impl Drop for RealTerminal {
    fn drop(&mut self) {
        if self.initialized {
            let _ = self.cleanup();
        }
    }
}
