//! Minimal VT100-subset parser that reconstructs a cell grid from the bytes
//! the renderer emits (C4, virtual/test side only).

use crate::cell::Cell;
use crate::style::StyleToken;

/// A snapshot of what a terminal would display after interpreting a byte
/// stream, with query operations used by tests.
#[derive(Clone, Debug)]
pub struct ScreenCapture {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl ScreenCapture {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// The character at `(x, y)`, or `None` if out of bounds.
    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        self.index(x, y).map(|i| self.cells[i].ch)
    }

    /// The style token at `(x, y)`, or `None` if out of bounds.
    pub fn style_at(&self, x: u16, y: u16) -> Option<&StyleToken> {
        self.index(x, y).map(|i| &self.cells[i].style)
    }

    /// The full text of row `y`, trailing spaces included.
    pub fn line(&self, y: u16) -> String {
        (0..self.width)
            .map(|x| self.char_at(x, y).unwrap_or(' '))
            .collect()
    }

    /// The text within the rectangle `(x, y, w, h)`, one row per line.
    pub fn region(&self, x: u16, y: u16, w: u16, h: u16) -> Vec<String> {
        (y..y.saturating_add(h))
            .map(|row| {
                (x..x.saturating_add(w))
                    .map(|col| self.char_at(col, row).unwrap_or(' '))
                    .collect()
            })
            .collect()
    }

    /// Whether `needle` appears anywhere in the captured screen.
    pub fn contains(&self, needle: &str) -> bool {
        self.find(needle).is_some()
    }

    /// The `(x, y)` of the first occurrence of `needle` on a single row, if
    /// any.
    pub fn find(&self, needle: &str) -> Option<(u16, u16)> {
        if needle.is_empty() {
            return None;
        }
        let needle_chars: Vec<char> = needle.chars().collect();
        for y in 0..self.height {
            let row: Vec<char> = (0..self.width).map(|x| self.char_at(x, y).unwrap_or(' ')).collect();
            if let Some(start) = row
                .windows(needle_chars.len())
                .position(|w| w == needle_chars.as_slice())
            {
                return Some((start as u16, y));
            }
        }
        None
    }
}

/// Parses the byte stream the renderer emits, reconstructing a
/// [`ScreenCapture`].
pub struct AnsiParser {
    width: u16,
    height: u16,
    cursor_x: u16,
    cursor_y: u16,
    current_style: StyleToken,
    capture: ScreenCapture,
}

impl AnsiParser {
    /// Create a parser for a screen of the given size, initially blank.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
            current_style: StyleToken::sentinel(),
            capture: ScreenCapture::new(width, height),
        }
    }

    /// Feed more bytes into the parser.
    pub fn feed(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\x1b' => self.parse_escape(&mut chars),
                '\n' => self.line_feed(),
                '\r' => self.cursor_x = 0,
                '\t' => self.cursor_x = ((self.cursor_x / 8) + 1) * 8,
                _ => self.put_char(c),
            }
        }
    }

    /// Consume the current accumulated parse as a finished snapshot.
    pub fn capture(&self) -> ScreenCapture {
        self.capture.clone()
    }

    fn put_char(&mut self, ch: char) {
        if self.cursor_x >= self.width {
            self.line_feed();
        }
        if let Some(idx) = self.capture.index(self.cursor_x, self.cursor_y) {
            self.capture.cells[idx] = Cell::new(ch, self.current_style.clone());
        }
        self.cursor_x = self.cursor_x.saturating_add(1);
    }

    fn line_feed(&mut self) {
        self.cursor_x = 0;
        self.cursor_y = (self.cursor_y + 1).min(self.height.saturating_sub(1));
    }

    fn parse_escape(&mut self, chars: &mut std::iter::Peekable<std::str::Chars>) {
        match chars.next() {
            Some('[') => self.parse_csi(chars),
            Some(_) => {}
            None => {}
        }
    }

    fn parse_csi(&mut self, chars: &mut std::iter::Peekable<std::str::Chars>) {
        // A private-mode marker (`?`, `<`, `=`, `>`) may precede the
        // parameter digits, e.g. `CSI ? 2 5 l` (cursor hide) or
        // `CSI ? 1 0 4 9 h` (alt-screen). These sequences carry no screen
        // content; absorb and ignore the whole thing rather than letting
        // the marker fall through as a spurious final byte.
        let private = matches!(chars.peek(), Some('?' | '<' | '=' | '>'));
        if private {
            chars.next();
        }

        let mut params = String::new();
        let mut final_byte = None;
        for c in chars.by_ref() {
            if c.is_ascii_digit() || c == ';' {
                params.push(c);
            } else {
                final_byte = Some(c);
                break;
            }
        }
        let Some(final_byte) = final_byte else {
            return;
        };
        if private {
            return;
        }
        let nums: Vec<u16> = params
            .split(';')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();

        match final_byte {
            'H' | 'f' => {
                let row = nums.first().copied().unwrap_or(1).max(1) - 1;
                let col = nums.get(1).copied().unwrap_or(1).max(1) - 1;
                self.cursor_y = row.min(self.height.saturating_sub(1));
                self.cursor_x = col.min(self.width.saturating_sub(1));
            }
            'A' => {
                let n = nums.first().copied().unwrap_or(1).max(1);
                self.cursor_y = self.cursor_y.saturating_sub(n);
            }
            'B' => {
                let n = nums.first().copied().unwrap_or(1).max(1);
                self.cursor_y = (self.cursor_y + n).min(self.height.saturating_sub(1));
            }
            'C' => {
                let n = nums.first().copied().unwrap_or(1).max(1);
                self.cursor_x = (self.cursor_x + n).min(self.width.saturating_sub(1));
            }
            'D' => {
                let n = nums.first().copied().unwrap_or(1).max(1);
                self.cursor_x = self.cursor_x.saturating_sub(n);
            }
            'J' => {
                if nums.first().copied() == Some(2) {
                    self.capture = ScreenCapture::new(self.width, self.height);
                    self.cursor_x = 0;
                    self.cursor_y = 0;
                }
            }
            'K' => {
                let mode = nums.first().copied().unwrap_or(0);
                let (start, end) = match mode {
                    1 => (0, self.cursor_x),
                    2 => (0, self.width.saturating_sub(1)),
                    _ => (self.cursor_x, self.width.saturating_sub(1)),
                };
                for x in start..=end {
                    if let Some(idx) = self.capture.index(x, self.cursor_y) {
                        self.capture.cells[idx] = Cell::default();
                    }
                }
            }
            'm' => {
                self.current_style = StyleToken::from_raw(format!("\x1b[{params}m"));
            }
            _ => {}
        }
    }
}
