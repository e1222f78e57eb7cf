//! Two placeholder screens that exercise the engine end-to-end: a root menu
//! screen and a detail screen reachable from it. Neither is a file browser,
//! git view, or any other concrete panel — those stay out of scope here.

use mc_tui_core::component::Component;
use mc_tui_core::framebuffer::FrameBuffer;
use mc_tui_core::key::{KeyEvent, NamedKey};
use mc_tui_core::screen::Screen;

/// The screen shown at startup: static instructions plus a counter that
/// proves [`Component::update`] runs every frame regardless of input.
pub struct RootMenuScreen {
    focused: bool,
    ticks: u64,
}

impl RootMenuScreen {
    /// A fresh root screen.
    pub fn new() -> Self {
        Self {
            focused: false,
            ticks: 0,
        }
    }
}

impl Default for RootMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RootMenuScreen {
    fn render(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let theme = fb.theme_context().clone();
        fb.fill_rect(x, y, w, h, ' ', &theme.normal_text);
        fb.write_at(x + 1, y + 1, "mc-tui-demo", &theme.highlight_text);
        fb.write_at(
            x + 1,
            y + 3,
            "F3 Files   Ctrl+D Open detail screen   Ctrl+Q Quit",
            &theme.normal_text,
        );
        fb.write_at(
            x + 1,
            y + 5,
            &format!("ticks: {}", self.ticks),
            &theme.muted_text,
        );
    }

    fn handle_input(&mut self, _key: &KeyEvent) -> bool {
        false
    }

    fn update(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn min_size(&self) -> (u16, u16) {
        (40, 6)
    }
}

impl Screen for RootMenuScreen {
    fn title(&self) -> &str {
        "Root"
    }

    fn type_name(&self) -> &'static str {
        "root"
    }
}

/// A detail screen pushed on top of the root screen. Escape pops back.
pub struct DetailScreen {
    focused: bool,
    selected: usize,
    rows: Vec<&'static str>,
}

impl DetailScreen {
    /// A fresh detail screen with a small fixed row list.
    pub fn new() -> Self {
        Self {
            focused: true,
            selected: 0,
            rows: vec!["alpha", "beta", "gamma", "delta"],
        }
    }
}

impl Default for DetailScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DetailScreen {
    fn render(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let theme = fb.theme_context().clone();
        fb.fill_rect(x, y, w, h, ' ', &theme.normal_text);
        fb.draw_box(x, y, w, h, &theme.active_border);
        for (row, label) in self.rows.iter().enumerate() {
            let style = if row == self.selected {
                &theme.selected_text
            } else {
                &theme.normal_text
            };
            fb.write_at(x + 2, y + 1 + row as u16, label, style);
        }
    }

    fn handle_input(&mut self, key: &KeyEvent) -> bool {
        match key {
            KeyEvent::Named(NamedKey::Down) => {
                self.selected = (self.selected + 1) % self.rows.len();
                true
            }
            KeyEvent::Named(NamedKey::Up) => {
                self.selected = if self.selected == 0 {
                    self.rows.len() - 1
                } else {
                    self.selected - 1
                };
                true
            }
            _ => false,
        }
    }

    fn update(&mut self) {}

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn min_size(&self) -> (u16, u16) {
        (20, self.rows.len() as u16 + 2)
    }
}

impl Screen for DetailScreen {
    fn title(&self) -> &str {
        "Detail"
    }

    fn type_name(&self) -> &'static str {
        "detail"
    }
}
