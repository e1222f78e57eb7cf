//! In-memory terminal driver for deterministic tests.

use std::collections::VecDeque;

use super::keymap::bytes_for_name;
use super::traits::Terminal;

/// A fully in-memory [`Terminal`]. Input is scripted via
/// [`VirtualTerminal::queue_input`] / [`VirtualTerminal::queue_raw_input`];
/// output is captured and readable via
/// [`VirtualTerminal::get_output`]. No real TTY is touched, and
/// `initialize`/`cleanup` are no-ops.
#[derive(Debug, Default)]
pub struct VirtualTerminal {
    input: VecDeque<u8>,
    output: Vec<u8>,
    width: u16,
    height: u16,
}

impl VirtualTerminal {
    /// Create a virtual terminal of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            input: VecDeque::new(),
            output: Vec::new(),
            width,
            height,
        }
    }

    /// Queue a logical key name (`"UP"`, `"F3"`, `"CTRL_C"`, `"a"`, ...),
    /// translated to the exact bytes a real terminal emits for that key.
    ///
    /// Panics if `name` is not recognized — tests should use a valid
    /// logical key name; an unrecognized one is a test bug, not a runtime
    /// condition the decoder needs to tolerate.
    pub fn queue_input(&mut self, name: &str) {
        let bytes = bytes_for_name(name)
            .unwrap_or_else(|| panic!("no byte sequence registered for key name {name:?}"));
        self.input.extend(bytes);
    }

    /// Queue raw bytes directly, bypassing name translation.
    pub fn queue_raw_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// The bytes written so far.
    pub fn get_output(&self) -> &[u8] {
        &self.output
    }

    /// Clear the captured output buffer.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Change the reported size.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

impl Terminal for VirtualTerminal {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn read_input(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn has_input(&mut self) -> bool {
        !self.input.is_empty()
    }

    fn write(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    fn initialize(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn cleanup(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
