//! Double-buffered cell grid and diffing ANSI renderer (C3).

use crate::cell::Cell;
use crate::style::StyleToken;
use crate::terminal::Terminal;
use crate::theme::ThemeContext;

/// Two grids of [`Cell`] (`back`, `front`) plus the diffing logic that
/// turns the difference between them into a minimal ANSI byte stream.
///
/// `back` is the scratchpad for the frame under construction; `front` is
/// what the terminal is believed to currently display. After
/// [`FrameBuffer::end_frame`], `front` equals `back`.
pub struct FrameBuffer {
    width: u16,
    height: u16,
    back: Vec<Cell>,
    front: Vec<Cell>,
    theme: ThemeContext,
}

impl FrameBuffer {
    /// Create a frame buffer of the given size with the given theme.
    pub fn new(width: u16, height: u16, theme: ThemeContext) -> Self {
        let area = width as usize * height as usize;
        let blank = Cell::blank(theme.normal_text.clone());
        Self {
            width,
            height,
            back: vec![blank.clone(); area],
            front: vec![blank; area],
            theme,
        }
    }

    /// Current buffer size.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// The theme this renderer carries for its lifetime.
    pub fn theme_context(&self) -> &ThemeContext {
        &self.theme
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Begin a new frame: fill `back` with spaces in the theme's normal
    /// style.
    pub fn begin_frame(&mut self) {
        let blank = Cell::blank(self.theme.normal_text.clone());
        self.back.fill(blank);
    }

    /// Write text starting at `(x, y)`, one cell per character. Clipped
    /// silently to the buffer bounds; out-of-range writes are no-ops.
    pub fn write_at(&mut self, x: u16, y: u16, text: &str, style: &StyleToken) {
        let mut cx = x;
        for ch in text.chars() {
            match self.index(cx, y) {
                Some(idx) => self.back[idx] = Cell::new(ch, style.clone()),
                None => break,
            }
            cx = cx.saturating_add(1);
        }
    }

    /// Draw a single-line box border. A no-op unless `w >= 2 && h >= 2`.
    pub fn draw_box(&mut self, x: u16, y: u16, w: u16, h: u16, style: &StyleToken) {
        if w < 2 || h < 2 {
            return;
        }
        let right = x + w - 1;
        let bottom = y + h - 1;

        self.put(x, y, '\u{250c}', style);
        self.put(right, y, '\u{2510}', style);
        self.put(x, bottom, '\u{2514}', style);
        self.put(right, bottom, '\u{2518}', style);

        for cx in (x + 1)..right {
            self.put(cx, y, '\u{2500}', style);
            self.put(cx, bottom, '\u{2500}', style);
        }
        for cy in (y + 1)..bottom {
            self.put(x, cy, '\u{2502}', style);
            self.put(right, cy, '\u{2502}', style);
        }
    }

    /// Fill a rectangle with a repeated character and style. Clipped
    /// silently to the buffer bounds.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: &StyleToken) {
        for cy in y..y.saturating_add(h) {
            for cx in x..x.saturating_add(w) {
                self.put(cx, cy, ch, style);
            }
        }
    }

    fn put(&mut self, x: u16, y: u16, ch: char, style: &StyleToken) {
        if let Some(idx) = self.index(x, y) {
            self.back[idx] = Cell::new(ch, style.clone());
        }
    }

    /// Mark `front` as unknown: every cell is given the sentinel style, so
    /// the next [`FrameBuffer::end_frame`] re-emits the entire screen.
    pub fn invalidate(&mut self) {
        for cell in &mut self.front {
            cell.style = StyleToken::sentinel();
        }
    }

    /// Query the driver for the current size; if it has changed, reallocate
    /// both buffers and clear the terminal. Returns whether a resize
    /// occurred.
    pub fn handle_resize(&mut self, term: &mut dyn Terminal) -> bool {
        let (w, h) = term.size();
        if (w, h) == (self.width, self.height) {
            return false;
        }
        self.width = w;
        self.height = h;
        let area = w as usize * h as usize;
        self.back = vec![Cell::blank(self.theme.normal_text.clone()); area];
        self.front = vec![Cell::blank(StyleToken::sentinel()); area];
        term.write(b"\x1b[2J");
        true
    }

    /// Diff `back` against `front`, emit the minimal byte stream to bring
    /// the real screen into agreement, and set `front = back`.
    pub fn end_frame(&mut self, term: &mut dyn Terminal) {
        let mut out = Vec::new();
        let mut cursor: Option<(u16, u16)> = None;
        let mut last_style: Option<&StyleToken> = None;

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y as usize * self.width as usize + x as usize;
                if self.back[idx] == self.front[idx] {
                    continue;
                }
                if cursor != Some((x, y)) {
                    out.extend_from_slice(format!("\x1b[{};{}H", y + 1, x + 1).as_bytes());
                }
                let style = &self.back[idx].style;
                if last_style != Some(style) {
                    out.extend_from_slice(style.as_str().as_bytes());
                }
                let mut buf = [0u8; 4];
                out.extend_from_slice(self.back[idx].ch.encode_utf8(&mut buf).as_bytes());
                cursor = Some((x.saturating_add(1), y));
                last_style = Some(style);
            }
        }

        if !out.is_empty() {
            term.write(&out);
        }
        self.front.clone_from(&self.back);
    }
}
