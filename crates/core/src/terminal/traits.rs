//! The `Terminal` driver trait: the C1 abstraction over real and virtual I/O.

/// Isolates raw terminal I/O from the rest of the engine.
///
/// Implemented by [`super::real::RealTerminal`] (a live TTY via `crossterm`)
/// and [`super::virtual_term::VirtualTerminal`] (a fully in-memory driver
/// used for deterministic tests). Every operation is either non-blocking or
/// bounded to a microsecond-scale poll; nothing here ever blocks for an
/// unbounded amount of time.
pub trait Terminal {
    /// Current terminal dimensions `(width, height)`.
    fn size(&self) -> (u16, u16);

    /// Non-blocking read of a single byte. Returns `None` immediately if
    /// nothing is available.
    fn read_input(&mut self) -> Option<u8>;

    /// Peek whether [`Terminal::read_input`] would return a byte right now.
    fn has_input(&mut self) -> bool;

    /// Write bytes to the output stream. Must be visible (flushed) before
    /// this call returns.
    fn write(&mut self, bytes: &[u8]);

    /// Enable raw mode, enter the alternate screen, hide the cursor, and
    /// clear the screen.
    fn initialize(&mut self) -> std::io::Result<()>;

    /// Exact inverse of [`Terminal::initialize`], in reverse order. Must
    /// succeed even if `initialize` only partially completed.
    fn cleanup(&mut self) -> std::io::Result<()>;

    /// Whether this driver is backed by a real interactive terminal.
    fn is_interactive(&self) -> bool;
}
