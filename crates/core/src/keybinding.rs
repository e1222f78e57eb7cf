//! Key binding registry: key combination → action id lookup (C7).

use std::collections::HashMap;

use tracing::warn;

use crate::key::{KeyCombination, KeyEvent};

/// A single registered binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBinding {
    /// The canonicalised key combination that triggers this binding.
    pub combination: KeyCombination,
    /// The dotted-namespace action identifier (e.g. `app.quit`).
    pub action_id: String,
    /// A human-readable description, shown in help overlays.
    pub description: String,
    /// A grouping category, used by [`KeyBindingRegistry::all_by_category`].
    pub category: String,
}

impl KeyBinding {
    /// Construct a binding.
    pub fn new(
        combination: KeyCombination,
        action_id: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            combination,
            action_id: action_id.into(),
            description: description.into(),
            category: category.into(),
        }
    }
}

/// Maps key combinations to bindings, with two auxiliary indexes kept in
/// registration order.
///
/// Ties within a combination are broken by insertion order: first
/// registered wins on [`KeyBindingRegistry::match_key`]. Registering a
/// second binding for an already-bound combination is permitted — the
/// newer one is shadowed — but emits a `tracing` diagnostic. `HashMap`
/// iteration order is not insertion order, so "first registered wins"
/// across *different* combinations mapped to the same action id cannot be
/// derived by scanning `by_combination`'s values — `by_action_id` and
/// `registration_order` are separate indexes built alongside it in
/// [`KeyBindingRegistry::register`] specifically to carry that guarantee.
#[derive(Default)]
pub struct KeyBindingRegistry {
    by_combination: HashMap<KeyCombination, Vec<KeyBinding>>,
    by_action_id: HashMap<String, Vec<KeyBinding>>,
    registration_order: Vec<KeyBinding>,
}

impl KeyBindingRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding. If its combination already has a binding, the
    /// new one is appended (shadowed) and a diagnostic is logged.
    pub fn register(&mut self, binding: KeyBinding) {
        let entry = self
            .by_combination
            .entry(binding.combination)
            .or_default();
        if !entry.is_empty() {
            warn!(
                action_id = %binding.action_id,
                "key combination already bound; new binding is shadowed"
            );
        }
        entry.push(binding.clone());

        self.by_action_id
            .entry(binding.action_id.clone())
            .or_default()
            .push(binding.clone());

        self.registration_order.push(binding);
    }

    /// Look up the binding for a raw key event, normalising it to a
    /// [`KeyCombination`] first. Returns the first-registered binding for
    /// that combination.
    pub fn match_key(&self, key: &KeyEvent) -> Option<&KeyBinding> {
        let combo = KeyCombination::from_event(key)?;
        self.by_combination.get(&combo)?.first()
    }

    /// The first-registered binding for a given action id, across all
    /// combinations.
    pub fn primary_by_action_id(&self, action_id: &str) -> Option<&KeyBinding> {
        self.by_action_id.get(action_id)?.first()
    }

    /// All bindings in a given category, in registration order.
    pub fn all_by_category(&self, category: &str) -> Vec<&KeyBinding> {
        self.registration_order
            .iter()
            .filter(|b| b.category == category)
            .collect()
    }

    /// Remove every binding for an action id.
    pub fn remove_by_action_id(&mut self, action_id: &str) {
        for bindings in self.by_combination.values_mut() {
            bindings.retain(|b| b.action_id != action_id);
        }
        self.by_combination.retain(|_, v| !v.is_empty());
        self.by_action_id.remove(action_id);
        self.registration_order
            .retain(|b| b.action_id != action_id);
    }
}
