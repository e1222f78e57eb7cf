//! Component capability trait and the exclusive-ownership container (C5).

use crate::framebuffer::FrameBuffer;
use crate::key::KeyEvent;

/// The recursive component contract.
///
/// Re-expressed from the source's dynamic inheritance of abstract component
/// bases as a capability trait with a small tagged set of concrete shapes
/// (leaves and [`Container`]), rather than an open class hierarchy.
pub trait Component {
    /// Render into `fb` within the rectangle `(x, y, w, h)`.
    fn render(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16);

    /// Offer a key event. Returns `true` if it was handled.
    fn handle_input(&mut self, key: &KeyEvent) -> bool;

    /// Per-frame update, called once per loop iteration regardless of
    /// input.
    fn update(&mut self);

    /// Set this component's focus state. Containers propagate a `false`
    /// recursively to their children; a `true` does not auto-focus any
    /// child.
    fn set_focused(&mut self, focused: bool);

    /// Whether this component currently holds focus.
    fn is_focused(&self) -> bool;

    /// The minimum `(width, height)` this component needs to render
    /// meaningfully.
    fn min_size(&self) -> (u16, u16);
}

/// A composite component that owns an ordered, exclusive sequence of
/// children (one parent per child — no back-pointers).
///
/// The default `handle_input` offers the key to the focused child only,
/// matching the "offer to focused child first" rule; there is exactly one
/// focused child at a time, tracked by index.
pub struct Container {
    children: Vec<Box<dyn Component>>,
    focused_child: Option<usize>,
    focused: bool,
}

impl Container {
    /// An empty container.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            focused_child: None,
            focused: false,
        }
    }

    /// Add a child, taking exclusive ownership of it.
    pub fn push_child(&mut self, child: Box<dyn Component>) {
        self.children.push(child);
    }

    /// The number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether this container has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Explicitly give focus to the child at `index`, clearing focus from
    /// any previously focused child. Out-of-range indices are a no-op.
    pub fn focus_child(&mut self, index: usize) {
        if index >= self.children.len() {
            return;
        }
        if let Some(prev) = self.focused_child {
            if prev != index {
                self.children[prev].set_focused(false);
            }
        }
        self.children[index].set_focused(true);
        self.focused_child = Some(index);
    }

    /// Borrow a child by index.
    pub fn child(&self, index: usize) -> Option<&dyn Component> {
        self.children.get(index).map(|c| c.as_ref())
    }

    /// Mutably borrow a child by index.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Box<dyn Component>> {
        self.children.get_mut(index)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Container {
    fn render(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        for child in &self.children {
            child.render(fb, x, y, w, h);
        }
    }

    fn handle_input(&mut self, key: &KeyEvent) -> bool {
        match self.focused_child {
            Some(idx) => self.children[idx].handle_input(key),
            None => false,
        }
    }

    fn update(&mut self) {
        for child in &mut self.children {
            child.update();
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            for child in &mut self.children {
                child.set_focused(false);
            }
        }
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn min_size(&self) -> (u16, u16) {
        self.children
            .iter()
            .map(|c| c.min_size())
            .fold((0, 0), |(aw, ah), (w, h)| (aw.max(w), ah.max(h)))
    }
}
