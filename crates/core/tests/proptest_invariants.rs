//! Property tests for the structural invariants spec §8 states universally
//! rather than for one example at a time.

use proptest::prelude::*;

use mc_tui_core::framebuffer::FrameBuffer;
use mc_tui_core::key::{BaseKey, KeyCombination, KeyEvent, Modifiers};
use mc_tui_core::keybinding::{KeyBinding, KeyBindingRegistry};
use mc_tui_core::style::StyleToken;
use mc_tui_core::terminal::VirtualTerminal;
use mc_tui_core::theme::ThemeContext;

proptest! {
    /// Writes landing entirely outside the buffer never produce observable
    /// output, for any buffer size and any out-of-range origin.
    #[test]
    fn out_of_range_write_at_is_always_a_noop(
        width in 1u16..40,
        height in 1u16..40,
        dx in 0u16..200,
        dy in 0u16..200,
        text in "[a-zA-Z0-9]{1,8}",
    ) {
        let x = width.saturating_add(dx);
        let y = height.saturating_add(dy);

        let mut fb = FrameBuffer::new(width, height, ThemeContext::default_dark());
        let mut term = VirtualTerminal::new(width, height);
        let style = StyleToken::from_raw("\x1b[31m");

        fb.begin_frame();
        fb.write_at(x, y, &text, &style);
        fb.end_frame(&mut term);

        prop_assert!(term.get_output().is_empty());
    }

    /// Key-combination canonicalization folds any ASCII letter's case to
    /// uppercase, for both plain characters and Ctrl-modified ones.
    #[test]
    fn key_combination_canonicalizes_letter_case(c in "[a-zA-Z]") {
        let ch = c.chars().next().unwrap();
        let lower = ch.to_ascii_lowercase();
        let upper = ch.to_ascii_uppercase();

        let from_plain = KeyCombination::from_event(&KeyEvent::Char(lower));
        prop_assert_eq!(
            from_plain,
            Some(KeyCombination::new(Modifiers::None, BaseKey::Char(upper)))
        );

        let from_ctrl = KeyCombination::from_event(&KeyEvent::Ctrl(lower));
        prop_assert_eq!(
            from_ctrl,
            Some(KeyCombination::new(Modifiers::Ctrl, BaseKey::Char(upper)))
        );
    }

    /// Binding lookup is deterministic: whichever binding registers first
    /// for a combination is the one `match_key` returns, no matter what the
    /// second registration's action id or description is.
    #[test]
    fn first_registered_binding_wins(
        letter in "[A-Z]",
        first_action in "[a-z.]{1,16}",
        second_action in "[a-z.]{1,16}",
    ) {
        let ch = letter.chars().next().unwrap();
        let combo = KeyCombination::new(Modifiers::Ctrl, BaseKey::Char(ch));

        let mut registry = KeyBindingRegistry::new();
        registry.register(KeyBinding::new(combo, &first_action, "first", "test"));
        registry.register(KeyBinding::new(combo, &second_action, "second", "test"));

        let key = KeyEvent::Ctrl(ch.to_ascii_lowercase());
        let matched = registry.match_key(&key).expect("a binding was registered");
        prop_assert_eq!(&matched.action_id, &first_action);
    }
}
