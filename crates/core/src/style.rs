//! Style tokens: opaque ANSI SGR escape strings stamped on cells.
//!
//! A cell's style is an opaque string of ANSI SGR escape bytes, and the only
//! equality that matters for a [`Cell`] is `(char, style)`. [`StyleToken`] is
//! exactly that opaque wrapper. [`Style`] and [`Color`] are the *builder*
//! side: a typed description of a look that [`Style::to_token`] compiles
//! down to the SGR bytes the renderer stamps on cells. Nothing downstream of
//! [`StyleToken`] ever inspects its contents.
//!
//! [`Cell`]: crate::cell::Cell

use std::fmt;

/// A terminal color: one of the 16 classic ANSI colors, or 24-bit truecolor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Black (SGR 30/40).
    Black,
    /// Red (SGR 31/41).
    Red,
    /// Green (SGR 32/42).
    Green,
    /// Yellow (SGR 33/43).
    Yellow,
    /// Blue (SGR 34/44).
    Blue,
    /// Magenta (SGR 35/45).
    Magenta,
    /// Cyan (SGR 36/46).
    Cyan,
    /// White (SGR 37/47).
    White,
    /// Bright black / gray (SGR 90/100).
    BrightBlack,
    /// Bright red (SGR 91/101).
    BrightRed,
    /// Bright green (SGR 92/102).
    BrightGreen,
    /// Bright yellow (SGR 93/103).
    BrightYellow,
    /// Bright blue (SGR 94/104).
    BrightBlue,
    /// Bright magenta (SGR 95/105).
    BrightMagenta,
    /// Bright cyan (SGR 96/106).
    BrightCyan,
    /// Bright white (SGR 97/107).
    BrightWhite,
    /// 24-bit truecolor.
    Rgb {
        /// Red channel.
        r: u8,
        /// Green channel.
        g: u8,
        /// Blue channel.
        b: u8,
    },
}

impl Color {
    fn fg_code(self) -> String {
        match self {
            Color::Black => "30".into(),
            Color::Red => "31".into(),
            Color::Green => "32".into(),
            Color::Yellow => "33".into(),
            Color::Blue => "34".into(),
            Color::Magenta => "35".into(),
            Color::Cyan => "36".into(),
            Color::White => "37".into(),
            Color::BrightBlack => "90".into(),
            Color::BrightRed => "91".into(),
            Color::BrightGreen => "92".into(),
            Color::BrightYellow => "93".into(),
            Color::BrightBlue => "94".into(),
            Color::BrightMagenta => "95".into(),
            Color::BrightCyan => "96".into(),
            Color::BrightWhite => "97".into(),
            Color::Rgb { r, g, b } => format!("38;2;{r};{g};{b}"),
        }
    }

    fn bg_code(self) -> String {
        match self {
            Color::Black => "40".into(),
            Color::Red => "41".into(),
            Color::Green => "42".into(),
            Color::Yellow => "43".into(),
            Color::Blue => "44".into(),
            Color::Magenta => "45".into(),
            Color::Cyan => "46".into(),
            Color::White => "47".into(),
            Color::BrightBlack => "100".into(),
            Color::BrightRed => "101".into(),
            Color::BrightGreen => "102".into(),
            Color::BrightYellow => "103".into(),
            Color::BrightBlue => "104".into(),
            Color::BrightMagenta => "105".into(),
            Color::BrightCyan => "106".into(),
            Color::BrightWhite => "107".into(),
            Color::Rgb { r, g, b } => format!("48;2;{r};{g};{b}"),
        }
    }
}

/// A style description: colors plus attribute flags.
///
/// Builder methods follow the `#[must_use]` fluent pattern: each returns
/// `Self` so callers chain `Style::new().fg(..).bold(true)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    /// Foreground color, or terminal default if unset.
    pub fg: Option<Color>,
    /// Background color, or terminal default if unset.
    pub bg: Option<Color>,
    /// Bold text.
    pub bold: bool,
    /// Underlined text.
    pub underline: bool,
    /// Reverse video (swap fg/bg).
    pub reverse: bool,
    /// Dim/faint text.
    pub dim: bool,
}

impl Style {
    /// An empty style with no attributes set.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            underline: false,
            reverse: false,
            dim: false,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set bold.
    #[must_use]
    pub const fn bold(mut self, val: bool) -> Self {
        self.bold = val;
        self
    }

    /// Set underline.
    #[must_use]
    pub const fn underline(mut self, val: bool) -> Self {
        self.underline = val;
        self
    }

    /// Set reverse video.
    #[must_use]
    pub const fn reverse(mut self, val: bool) -> Self {
        self.reverse = val;
        self
    }

    /// Set dim.
    #[must_use]
    pub const fn dim(mut self, val: bool) -> Self {
        self.dim = val;
        self
    }

    /// Compile this style down to the opaque SGR [`StyleToken`] the
    /// renderer stamps on cells. An all-default style compiles to the empty
    /// token, the sentinel no legal style may otherwise produce.
    pub fn to_token(self) -> StyleToken {
        if self == Self::new() {
            return StyleToken::default();
        }
        let mut codes: Vec<String> = Vec::new();
        if self.bold {
            codes.push("1".into());
        }
        if self.dim {
            codes.push("2".into());
        }
        if self.underline {
            codes.push("4".into());
        }
        if self.reverse {
            codes.push("7".into());
        }
        if let Some(fg) = self.fg {
            codes.push(fg.fg_code());
        }
        if let Some(bg) = self.bg {
            codes.push(bg.bg_code());
        }
        StyleToken(format!("\u{1b}[{}m", codes.join(";")))
    }
}

/// An opaque ANSI SGR escape string identifying a cell's look.
///
/// The empty token is the sentinel: it is guaranteed to never equal the
/// output of [`Style::to_token`] for any style with at least one attribute
/// set, which is what lets [`crate::framebuffer::FrameBuffer::invalidate`]
/// use it to force a full redraw.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleToken(String);

impl StyleToken {
    /// The sentinel token: matches no legal style, used to force a cell to
    /// be considered "changed" regardless of its actual content.
    pub fn sentinel() -> Self {
        Self::default()
    }

    /// Borrow the raw SGR bytes.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an already-built SGR escape string as a token, for external
    /// theme collaborators that hand the renderer pre-built style strings
    /// rather than going through [`Style`].
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for StyleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
