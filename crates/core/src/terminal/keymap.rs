//! Logical key-name to byte-sequence translation for the virtual driver.
//!
//! This is the canonical table a real terminal emits for each named key,
//! used so tests can queue `"F3"` or `"CTRL_C"` and have the exact bytes a
//! real terminal would send run through the unmodified decoder.

const ESC: u8 = 0x1b;

/// Translate a logical key name into the byte sequence a real terminal
/// emits for it. Returns `None` if `name` is not recognized and is not a
/// single printable character.
pub fn bytes_for_name(name: &str) -> Option<Vec<u8>> {
    let bytes = match name {
        "UP" => vec![ESC, b'[', b'A'],
        "DOWN" => vec![ESC, b'[', b'B'],
        "RIGHT" => vec![ESC, b'[', b'C'],
        "LEFT" => vec![ESC, b'[', b'D'],
        "HOME" => vec![ESC, b'[', b'1', b'~'],
        "END" => vec![ESC, b'[', b'4', b'~'],
        "PAGE_UP" => vec![ESC, b'[', b'5', b'~'],
        "PAGE_DOWN" => vec![ESC, b'[', b'6', b'~'],
        "INSERT" => vec![ESC, b'[', b'2', b'~'],
        "DELETE" => vec![ESC, b'[', b'3', b'~'],
        "F1" => vec![ESC, b'O', b'P'],
        "F2" => vec![ESC, b'O', b'Q'],
        "F3" => vec![ESC, b'O', b'R'],
        "F4" => vec![ESC, b'O', b'S'],
        "F5" => vec![ESC, b'[', b'1', b'5', b'~'],
        "F6" => vec![ESC, b'[', b'1', b'7', b'~'],
        "F7" => vec![ESC, b'[', b'1', b'8', b'~'],
        "F8" => vec![ESC, b'[', b'1', b'9', b'~'],
        "F9" => vec![ESC, b'[', b'2', b'0', b'~'],
        "F10" => vec![ESC, b'[', b'2', b'1', b'~'],
        "F11" => vec![ESC, b'[', b'2', b'3', b'~'],
        "F12" => vec![ESC, b'[', b'2', b'4', b'~'],
        "ENTER" => vec![0x0a],
        "TAB" => vec![0x09],
        "BACKSPACE" => vec![0x7f],
        "ESCAPE" => vec![ESC],
        other => {
            if let Some(letter) = other.strip_prefix("CTRL_") {
                let mut chars = letter.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                return Some(vec![(c.to_ascii_uppercase() as u8) & 0x1f]);
            }
            let mut chars = other.chars();
            let c = chars.next()?;
            if chars.next().is_some() || !c.is_ascii() {
                return None;
            }
            return Some(vec![c as u8]);
        }
    };
    Some(bytes)
}
