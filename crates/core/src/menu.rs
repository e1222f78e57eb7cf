//! Menu bar and single-dropdown menu system (C8).

use std::panic::{self, AssertUnwindSafe};

use tracing::error;

use crate::framebuffer::FrameBuffer;
use crate::key::{KeyCombination, KeyEvent, NamedKey};
use crate::theme::ThemeContext;

/// A typed, no-op-default thunk run when an [`MenuItem::Action`] item is
/// activated. Re-expressed from nullable callback fields: there is no null
/// check, only an always-callable closure.
pub type ActionThunk = Box<dyn FnMut()>;

/// One entry in a menu's item list.
pub enum MenuItem {
    /// Navigates to a named screen when activated.
    Screen {
        /// Visible label.
        label: String,
        /// The target screen's type name (matches [`crate::screen::Screen::type_name`]).
        screen_name: String,
        /// Lowercase hotkey; defaults to the label's first code point.
        hotkey: char,
    },
    /// Runs a thunk when activated.
    Action {
        /// Visible label.
        label: String,
        /// The thunk to run.
        thunk: ActionThunk,
        /// Lowercase hotkey.
        hotkey: char,
    },
    /// Opens a nested list of items when activated.
    Submenu {
        /// Visible label.
        label: String,
        /// The nested items.
        items: Vec<MenuItem>,
        /// Lowercase hotkey.
        hotkey: char,
    },
    /// A non-interactive horizontal rule.
    Separator,
}

impl MenuItem {
    /// A `Screen` item, defaulting its hotkey to the label's first
    /// character.
    pub fn screen(label: impl Into<String>, screen_name: impl Into<String>) -> Self {
        let label = label.into();
        let hotkey = default_hotkey(&label);
        Self::Screen {
            label,
            screen_name: screen_name.into(),
            hotkey,
        }
    }

    /// An `Action` item, defaulting its hotkey to the label's first
    /// character.
    pub fn action(label: impl Into<String>, thunk: ActionThunk) -> Self {
        let label = label.into();
        let hotkey = default_hotkey(&label);
        Self::Action {
            label,
            thunk,
            hotkey,
        }
    }

    /// A `Submenu` item, defaulting its hotkey to the label's first
    /// character.
    pub fn submenu(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        let label = label.into();
        let hotkey = default_hotkey(&label);
        Self::Submenu {
            label,
            items,
            hotkey,
        }
    }

    fn label(&self) -> Option<&str> {
        match self {
            MenuItem::Screen { label, .. }
            | MenuItem::Action { label, .. }
            | MenuItem::Submenu { label, .. } => Some(label),
            MenuItem::Separator => None,
        }
    }

    fn hotkey(&self) -> Option<char> {
        match self {
            MenuItem::Screen { hotkey, .. }
            | MenuItem::Action { hotkey, .. }
            | MenuItem::Submenu { hotkey, .. } => Some(*hotkey),
            MenuItem::Separator => None,
        }
    }

    fn is_separator(&self) -> bool {
        matches!(self, MenuItem::Separator)
    }
}

fn default_hotkey(label: &str) -> char {
    label.chars().next().unwrap_or(' ').to_ascii_lowercase()
}

/// A single top-level menu: a label, the function key that opens it, its
/// items, and a display priority.
pub struct MenuDefinition {
    /// Visible label, e.g. `"Files"`.
    pub label: String,
    /// The key combination that opens this menu while closed.
    pub fkey: KeyCombination,
    /// The menu's items, top to bottom.
    pub items: Vec<MenuItem>,
    /// Left-to-right ordering among sibling menus (ascending, stable).
    pub priority: i32,
}

/// The result of activating a menu item, reported back to the
/// [`crate::app::Application`] main loop.
pub enum MenuAction {
    /// Navigate to the named screen.
    NavigateTo(String),
    /// Nothing further to do; the thunk already ran.
    None,
    /// The thunk panicked; it was caught and logged, and the loop must
    /// force a redraw since the thunk's partial effects are unknown.
    Invalidate,
}

/// Either the dropdown is closed, or a specific menu/item pair is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuSystemState {
    /// No dropdown is open.
    Closed,
    /// `(menu_index, item_index)` is the open dropdown and its highlighted
    /// item.
    Open(usize, usize),
}

/// Owns the menu bar and its single optional dropdown.
pub struct MenuSystem {
    menus: Vec<MenuDefinition>,
    state: MenuSystemState,
    /// Stack of submenu item lists entered while a dropdown is open,
    /// innermost last. Empty means the open dropdown shows the menu's
    /// top-level items.
    submenu_stack: Vec<usize>,
}

impl MenuSystem {
    /// Build a menu system from definitions, sorted by ascending priority
    /// (stable, so equal priorities keep their given order).
    pub fn new(mut menus: Vec<MenuDefinition>) -> Self {
        menus.sort_by_key(|m| m.priority);
        Self {
            menus,
            state: MenuSystemState::Closed,
            submenu_stack: Vec::new(),
        }
    }

    /// The current state.
    pub fn state(&self) -> MenuSystemState {
        self.state
    }

    fn items_for(&self, menu_ix: usize) -> &[MenuItem] {
        let mut items = self.menus[menu_ix].items.as_slice();
        for &submenu_ix in &self.submenu_stack {
            items = match &items[submenu_ix] {
                MenuItem::Submenu { items, .. } => items.as_slice(),
                _ => items,
            };
        }
        items
    }

    fn first_non_separator(items: &[MenuItem]) -> usize {
        items.iter().position(|i| !i.is_separator()).unwrap_or(0)
    }

    /// Dispatch a key event. Returns `(consumed, action)`.
    pub fn handle_input(&mut self, key: &KeyEvent) -> (bool, MenuAction) {
        match self.state {
            MenuSystemState::Closed => self.handle_closed(key),
            MenuSystemState::Open(menu_ix, item_ix) => self.handle_open(key, menu_ix, item_ix),
        }
    }

    fn handle_closed(&mut self, key: &KeyEvent) -> (bool, MenuAction) {
        let Some(combo) = KeyCombination::from_event(key) else {
            return (false, MenuAction::None);
        };
        for (ix, menu) in self.menus.iter().enumerate() {
            if menu.fkey == combo {
                let item_ix = Self::first_non_separator(&menu.items);
                self.state = MenuSystemState::Open(ix, item_ix);
                self.submenu_stack.clear();
                return (true, MenuAction::None);
            }
        }
        (false, MenuAction::None)
    }

    fn handle_open(&mut self, key: &KeyEvent, menu_ix: usize, item_ix: usize) -> (bool, MenuAction) {
        let len = self.items_for(menu_ix).len();
        match key {
            KeyEvent::Named(NamedKey::Up) => {
                let next = self.prev_non_separator(menu_ix, item_ix, len);
                self.state = MenuSystemState::Open(menu_ix, next);
                (true, MenuAction::None)
            }
            KeyEvent::Named(NamedKey::Down) => {
                let next = self.next_non_separator(menu_ix, item_ix, len);
                self.state = MenuSystemState::Open(menu_ix, next);
                (true, MenuAction::None)
            }
            KeyEvent::Named(NamedKey::Escape) => {
                self.close();
                (true, MenuAction::None)
            }
            KeyEvent::Named(NamedKey::Enter) | KeyEvent::Named(NamedKey::Space) => {
                let action = self.activate(menu_ix, item_ix);
                (true, action)
            }
            KeyEvent::Char(c) => {
                let hotkey_ix = self
                    .items_for(menu_ix)
                    .iter()
                    .position(|i| i.hotkey() == Some(c.to_ascii_lowercase()));
                match hotkey_ix {
                    Some(ix) => {
                        let action = self.activate(menu_ix, ix);
                        (true, action)
                    }
                    None => (true, MenuAction::None),
                }
            }
            _ => (true, MenuAction::None),
        }
    }

    fn next_non_separator(&self, menu_ix: usize, from: usize, len: usize) -> usize {
        if len == 0 {
            return from;
        }
        let items = self.items_for(menu_ix);
        let mut ix = from;
        for _ in 0..len {
            ix = (ix + 1) % len;
            if !items[ix].is_separator() {
                return ix;
            }
        }
        from
    }

    fn prev_non_separator(&self, menu_ix: usize, from: usize, len: usize) -> usize {
        if len == 0 {
            return from;
        }
        let items = self.items_for(menu_ix);
        let mut ix = from;
        for _ in 0..len {
            ix = if ix == 0 { len - 1 } else { ix - 1 };
            if !items[ix].is_separator() {
                return ix;
            }
        }
        from
    }

    fn activate(&mut self, menu_ix: usize, item_ix: usize) -> MenuAction {
        let submenu_stack = std::mem::take(&mut self.submenu_stack);
        let is_submenu = {
            let mut items = self.menus[menu_ix].items.as_mut_slice();
            for &ix in &submenu_stack {
                items = match &mut items[ix] {
                    MenuItem::Submenu { items, .. } => items.as_mut_slice(),
                    _ => items,
                };
            }
            matches!(items[item_ix], MenuItem::Submenu { .. })
        };

        if is_submenu {
            self.submenu_stack = submenu_stack;
            self.submenu_stack.push(item_ix);
            let first = Self::first_non_separator(self.items_for(menu_ix));
            self.state = MenuSystemState::Open(menu_ix, first);
            return MenuAction::None;
        }

        let mut items = self.menus[menu_ix].items.as_mut_slice();
        for &ix in &submenu_stack {
            items = match &mut items[ix] {
                MenuItem::Submenu { items, .. } => items.as_mut_slice(),
                _ => items,
            };
        }
        let action = match &mut items[item_ix] {
            MenuItem::Screen { screen_name, .. } => MenuAction::NavigateTo(screen_name.clone()),
            MenuItem::Action { thunk, .. } => {
                if panic::catch_unwind(AssertUnwindSafe(|| thunk())).is_err() {
                    error!("menu action thunk panicked; forcing redraw");
                    MenuAction::Invalidate
                } else {
                    MenuAction::None
                }
            }
            MenuItem::Submenu { .. } => unreachable!("handled above"),
            MenuItem::Separator => MenuAction::None,
        };
        self.close();
        action
    }

    fn close(&mut self) {
        self.state = MenuSystemState::Closed;
        self.submenu_stack.clear();
    }

    /// Render the menu bar (always) and, if open, the dropdown overlay.
    /// The dropdown is drawn last so it overlays screen content beneath.
    pub fn render(&self, fb: &mut FrameBuffer, theme: &ThemeContext, width: u16) {
        self.render_bar(fb, theme, width);
        if let MenuSystemState::Open(menu_ix, item_ix) = self.state {
            self.render_dropdown(fb, theme, menu_ix, item_ix);
        }
    }

    fn render_bar(&self, fb: &mut FrameBuffer, theme: &ThemeContext, width: u16) {
        fb.fill_rect(0, 0, width, 1, ' ', &theme.menu_text);
        let mut x = 0;
        for menu in &self.menus {
            let label = format!(" {} ", menu.label);
            fb.write_at(x, 0, &label, &theme.menu_text);
            x = x.saturating_add(label.chars().count() as u16);
        }
    }

    fn render_dropdown(&self, fb: &mut FrameBuffer, theme: &ThemeContext, menu_ix: usize, item_ix: usize) {
        let items = self.items_for(menu_ix);
        let width = items
            .iter()
            .filter_map(MenuItem::label)
            .map(|l| l.chars().count() as u16 + 2)
            .max()
            .unwrap_or(10)
            .max(10);
        let x = 0;
        let y = 1;
        for (row, item) in items.iter().enumerate() {
            let style = if row == item_ix {
                &theme.selected_text
            } else {
                &theme.menu_text
            };
            match item {
                MenuItem::Separator => {
                    fb.fill_rect(x, y + row as u16, width, 1, '\u{2500}', style);
                }
                _ => {
                    let label = item.label().unwrap_or("");
                    let padded = format!(" {label:<pad$} ", pad = width as usize - 2);
                    fb.write_at(x, y + row as u16, &padded, style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{BaseKey, Modifiers};

    fn files_menu() -> MenuDefinition {
        MenuDefinition {
            label: "Files".into(),
            fkey: KeyCombination::new(Modifiers::None, BaseKey::Named(NamedKey::F3)),
            items: vec![
                MenuItem::action("Open", Box::new(|| {})),
                MenuItem::Separator,
                MenuItem::action("Quit", Box::new(|| {})),
            ],
            priority: 0,
        }
    }

    #[test]
    fn fkey_opens_menu_at_first_item() {
        let mut system = MenuSystem::new(vec![files_menu()]);
        let (consumed, _) = system.handle_input(&KeyEvent::Named(NamedKey::F3));
        assert!(consumed);
        assert_eq!(system.state(), MenuSystemState::Open(0, 0));
    }

    #[test]
    fn unrelated_key_is_not_consumed_while_closed() {
        let mut system = MenuSystem::new(vec![files_menu()]);
        let (consumed, _) = system.handle_input(&KeyEvent::Char('x'));
        assert!(!consumed);
        assert_eq!(system.state(), MenuSystemState::Closed);
    }

    #[test]
    fn down_skips_separator_with_wraparound() {
        let mut system = MenuSystem::new(vec![files_menu()]);
        system.handle_input(&KeyEvent::Named(NamedKey::F3));
        system.handle_input(&KeyEvent::Named(NamedKey::Down));
        assert_eq!(system.state(), MenuSystemState::Open(0, 2));
        system.handle_input(&KeyEvent::Named(NamedKey::Down));
        assert_eq!(system.state(), MenuSystemState::Open(0, 0));
    }

    #[test]
    fn escape_closes_dropdown() {
        let mut system = MenuSystem::new(vec![files_menu()]);
        system.handle_input(&KeyEvent::Named(NamedKey::F3));
        system.handle_input(&KeyEvent::Named(NamedKey::Escape));
        assert_eq!(system.state(), MenuSystemState::Closed);
    }

    #[test]
    fn enter_activates_item_and_closes() {
        let mut system = MenuSystem::new(vec![files_menu()]);
        system.handle_input(&KeyEvent::Named(NamedKey::F3));
        let (consumed, action) = system.handle_input(&KeyEvent::Named(NamedKey::Enter));
        assert!(consumed);
        assert!(matches!(action, MenuAction::None));
        assert_eq!(system.state(), MenuSystemState::Closed);
    }

    #[test]
    fn screen_item_activation_reports_navigation() {
        let menu = MenuDefinition {
            label: "Files".into(),
            fkey: KeyCombination::new(Modifiers::None, BaseKey::Named(NamedKey::F3)),
            items: vec![MenuItem::screen("Browser", "file_browser")],
            priority: 0,
        };
        let mut system = MenuSystem::new(vec![menu]);
        system.handle_input(&KeyEvent::Named(NamedKey::F3));
        let (_, action) = system.handle_input(&KeyEvent::Named(NamedKey::Enter));
        match action {
            MenuAction::NavigateTo(name) => assert_eq!(name, "file_browser"),
            _ => panic!("expected navigation"),
        }
    }

    #[test]
    fn panicking_thunk_is_caught_and_reports_invalidate() {
        let menu = MenuDefinition {
            label: "Files".into(),
            fkey: KeyCombination::new(Modifiers::None, BaseKey::Named(NamedKey::F3)),
            items: vec![MenuItem::action(
                "Boom",
                Box::new(|| panic!("thunk exploded")),
            )],
            priority: 0,
        };
        let mut system = MenuSystem::new(vec![menu]);
        system.handle_input(&KeyEvent::Named(NamedKey::F3));
        let (consumed, action) = system.handle_input(&KeyEvent::Named(NamedKey::Enter));
        assert!(consumed);
        assert!(matches!(action, MenuAction::Invalidate));
        // The system must still be usable afterwards: the dropdown closed
        // normally, same as a non-panicking activation.
        assert_eq!(system.state(), MenuSystemState::Closed);
    }

    #[test]
    fn priority_orders_menus_ascending_stable() {
        let a = MenuDefinition {
            label: "A".into(),
            fkey: KeyCombination::new(Modifiers::None, BaseKey::Named(NamedKey::F1)),
            items: vec![MenuItem::action("x", Box::new(|| {}))],
            priority: 5,
        };
        let b = MenuDefinition {
            label: "B".into(),
            fkey: KeyCombination::new(Modifiers::None, BaseKey::Named(NamedKey::F2)),
            items: vec![MenuItem::action("y", Box::new(|| {}))],
            priority: 1,
        };
        let system = MenuSystem::new(vec![a, b]);
        assert_eq!(system.menus[0].label, "B");
        assert_eq!(system.menus[1].label, "A");
    }

    #[test]
    fn all_input_while_open_is_consumed() {
        let mut system = MenuSystem::new(vec![files_menu()]);
        system.handle_input(&KeyEvent::Named(NamedKey::F3));
        let (consumed, _) = system.handle_input(&KeyEvent::Char('z'));
        assert!(consumed);
    }
}
