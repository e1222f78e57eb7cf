//! Key events and the canonicalised combinations used for binding lookup.

/// Named (non-printable) keys the decoder recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NamedKey {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Insert.
    Insert,
    /// Delete.
    Delete,
    /// Enter (also produced by a bare carriage return).
    Enter,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Escape.
    Escape,
    /// Space.
    Space,
    /// F1.
    F1,
    /// F2.
    F2,
    /// F3.
    F3,
    /// F4.
    F4,
    /// F5.
    F5,
    /// F6.
    F6,
    /// F7.
    F7,
    /// F8.
    F8,
    /// F9.
    F9,
    /// F10.
    F10,
    /// F11.
    F11,
    /// F12.
    F12,
}

/// A decoded key event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable character.
    Char(char),
    /// A named, non-printable key.
    Named(NamedKey),
    /// A control character combined with a printable base key.
    Ctrl(char),
    /// A byte sequence the decoder could not interpret, kept for
    /// diagnostics. Never parses to a [`KeyCombination`].
    Unknown(Vec<u8>),
}

/// The base key half of a canonicalised [`KeyCombination`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseKey {
    /// An uppercased printable character.
    Char(char),
    /// A named key.
    Named(NamedKey),
}

/// The modifier-set half of a canonicalised [`KeyCombination`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifiers {
    /// No modifier.
    None,
    /// Control held.
    Ctrl,
}

/// A canonicalised `(modifiers, base_key)` pair used as a binding-lookup
/// key. Canonicalisation guarantees structural equality: `Ctrl+Enter` is
/// always represented the same way, never as `Enter+Ctrl`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    /// The modifier set.
    pub modifiers: Modifiers,
    /// The base key.
    pub base: BaseKey,
}

impl KeyCombination {
    /// Build a combination directly from parts.
    pub const fn new(modifiers: Modifiers, base: BaseKey) -> Self {
        Self { modifiers, base }
    }

    /// Canonicalise a [`KeyEvent`] into a lookup key. Returns `None` for
    /// `Unknown` events, which never parse to a combination.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        match event {
            KeyEvent::Ctrl(base) => Some(Self::new(
                Modifiers::Ctrl,
                BaseKey::Char(base.to_ascii_uppercase()),
            )),
            KeyEvent::Named(k) => Some(Self::new(Modifiers::None, BaseKey::Named(*k))),
            KeyEvent::Char(c) => Some(Self::new(
                Modifiers::None,
                BaseKey::Char(c.to_ascii_uppercase()),
            )),
            KeyEvent::Unknown(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_canonicalises_to_ctrl_modifier() {
        let combo = KeyCombination::from_event(&KeyEvent::Ctrl('g'));
        assert_eq!(
            combo,
            Some(KeyCombination::new(Modifiers::Ctrl, BaseKey::Char('G')))
        );
    }

    #[test]
    fn named_canonicalises_with_no_modifier() {
        let combo = KeyCombination::from_event(&KeyEvent::Named(NamedKey::Up));
        assert_eq!(
            combo,
            Some(KeyCombination::new(
                Modifiers::None,
                BaseKey::Named(NamedKey::Up)
            ))
        );
    }

    #[test]
    fn char_is_uppercased() {
        let combo = KeyCombination::from_event(&KeyEvent::Char('q'));
        assert_eq!(
            combo,
            Some(KeyCombination::new(Modifiers::None, BaseKey::Char('Q')))
        );
    }

    #[test]
    fn unknown_does_not_parse() {
        assert_eq!(
            KeyCombination::from_event(&KeyEvent::Unknown(vec![0x1b, 0x5a])),
            None
        );
    }

    #[test]
    fn combination_equality_is_structural_not_order_dependent() {
        let a = KeyCombination::new(Modifiers::Ctrl, BaseKey::Char('G'));
        let b = KeyCombination::new(Modifiers::Ctrl, BaseKey::Char('G'));
        assert_eq!(a, b);
    }
}
