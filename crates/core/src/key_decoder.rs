//! Stateful byte-stream to [`KeyEvent`] decoder (C2).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::key::{KeyEvent, NamedKey};
use crate::terminal::Terminal;

const ESC: u8 = 0x1b;
/// Bound on extra bytes read while reassembling an escape sequence.
const MAX_SEQUENCE_BYTES: usize = 10;

/// Default per-byte timeout while assembling an escape sequence on a real
/// terminal.
pub const REAL_ESCAPE_TIMEOUT: Duration = Duration::from_millis(100);
/// Default per-byte timeout while assembling an escape sequence against the
/// virtual driver, where bytes are already queued and there is nothing to
/// wait for.
pub const VIRTUAL_ESCAPE_TIMEOUT: Duration = Duration::from_millis(1);

/// Consumes bytes from a [`Terminal`] and yields typed [`KeyEvent`]s,
/// reassembling multi-byte escape sequences with a bounded per-byte
/// timeout. The sequence table (`ESC` body → named key) is extensible at
/// runtime via [`KeyDecoder::register_sequence`].
pub struct KeyDecoder {
    escape_timeout: Duration,
    sequences: HashMap<Vec<u8>, NamedKey>,
}

impl KeyDecoder {
    /// Build a decoder with an explicit per-byte escape-assembly timeout.
    pub fn new(escape_timeout: Duration) -> Self {
        Self {
            escape_timeout,
            sequences: default_sequence_table(),
        }
    }

    /// A decoder tuned for a real, human-operated terminal.
    pub fn for_real_terminal() -> Self {
        Self::new(REAL_ESCAPE_TIMEOUT)
    }

    /// A decoder tuned for the virtual driver, where queued bytes are
    /// already available and no real wait is needed.
    pub fn for_virtual_terminal() -> Self {
        Self::new(VIRTUAL_ESCAPE_TIMEOUT)
    }

    /// Register (or override) a sequence body (the bytes following `ESC`)
    /// mapped to a named key, for terminal-specific sequences beyond the
    /// built-in table.
    pub fn register_sequence(&mut self, body: Vec<u8>, key: NamedKey) {
        self.sequences.insert(body, key);
    }

    /// Read and decode the next key event, if any bytes are currently
    /// available. Returns `None` if the terminal has no input.
    pub fn next_key(&mut self, term: &mut dyn Terminal) -> Option<KeyEvent> {
        let first = term.read_input()?;
        if first != ESC {
            return Some(self.decode_single_byte(first));
        }
        Some(self.assemble_escape(term))
    }

    fn decode_single_byte(&self, byte: u8) -> KeyEvent {
        match byte {
            0x0a | 0x0d => KeyEvent::Named(NamedKey::Enter),
            0x09 => KeyEvent::Named(NamedKey::Tab),
            0x7f => KeyEvent::Named(NamedKey::Backspace),
            0x20 => KeyEvent::Named(NamedKey::Space),
            0x01..=0x1a => KeyEvent::Ctrl((b'a' + (byte - 0x01)) as char),
            _ => {
                if byte.is_ascii() {
                    KeyEvent::Char(byte as char)
                } else {
                    KeyEvent::Unknown(vec![byte])
                }
            }
        }
    }

    fn assemble_escape(&self, term: &mut dyn Terminal) -> KeyEvent {
        let mut raw = vec![ESC];
        let Some(b1) = self.read_byte_with_timeout(term) else {
            return KeyEvent::Named(NamedKey::Escape);
        };
        raw.push(b1);

        let mut body = vec![b1];
        match b1 {
            b'[' => {
                while body.len() < MAX_SEQUENCE_BYTES {
                    let Some(b) = self.read_byte_with_timeout(term) else {
                        break;
                    };
                    raw.push(b);
                    body.push(b);
                    if b == b'~' || b.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            b'O' => {
                if let Some(b) = self.read_byte_with_timeout(term) {
                    raw.push(b);
                    body.push(b);
                }
            }
            _ => {}
        }

        match self.sequences.get(&body) {
            Some(named) => KeyEvent::Named(*named),
            None => KeyEvent::Unknown(raw),
        }
    }

    fn read_byte_with_timeout(&self, term: &mut dyn Terminal) -> Option<u8> {
        if let Some(b) = term.read_input() {
            return Some(b);
        }
        let deadline = Instant::now() + self.escape_timeout;
        loop {
            if let Some(b) = term.read_input() {
                return Some(b);
            }
            if Instant::now() >= deadline {
                return None;
            }
            std::thread::sleep(self.escape_timeout / 20);
        }
    }
}

fn default_sequence_table() -> HashMap<Vec<u8>, NamedKey> {
    use NamedKey::*;
    let mut m = HashMap::new();
    m.insert(vec![b'[', b'A'], Up);
    m.insert(vec![b'[', b'B'], Down);
    m.insert(vec![b'[', b'C'], Right);
    m.insert(vec![b'[', b'D'], Left);
    m.insert(vec![b'[', b'1', b'~'], Home);
    m.insert(vec![b'[', b'4', b'~'], End);
    m.insert(vec![b'[', b'5', b'~'], PageUp);
    m.insert(vec![b'[', b'6', b'~'], PageDown);
    m.insert(vec![b'[', b'2', b'~'], Insert);
    m.insert(vec![b'[', b'3', b'~'], Delete);
    m.insert(vec![b'O', b'P'], F1);
    m.insert(vec![b'O', b'Q'], F2);
    m.insert(vec![b'O', b'R'], F3);
    m.insert(vec![b'O', b'S'], F4);
    m.insert(vec![b'[', b'1', b'5', b'~'], F5);
    m.insert(vec![b'[', b'1', b'7', b'~'], F6);
    m.insert(vec![b'[', b'1', b'8', b'~'], F7);
    m.insert(vec![b'[', b'1', b'9', b'~'], F8);
    m.insert(vec![b'[', b'2', b'0', b'~'], F9);
    m.insert(vec![b'[', b'2', b'1', b'~'], F10);
    m.insert(vec![b'[', b'2', b'3', b'~'], F11);
    m.insert(vec![b'[', b'2', b'4', b'~'], F12);
    m
}
