//! Leaf mapping from combo descriptors to registered callbacks.
//!
//! The registry knows nothing about key events or the host input source; it
//! only stores descriptor entries and hands the dispatcher a point-in-time
//! snapshot to iterate.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::event::KeyEvent;

/// Callback invoked with the key event that matched its descriptor.
pub type HotkeyCallback = Box<dyn FnMut(&KeyEvent)>;

/// Shared, updatable slot holding one registered callback. The slot is empty
/// only while its callback is being invoked; the dispatcher takes the
/// function out for the duration of the call so the callback can retarget
/// its own slot without re-borrowing it.
pub type CallbackSlot = Rc<RefCell<Option<HotkeyCallback>>>;

/// Stable identity for one registered callback.
///
/// The token stays valid across [`HotkeyRegistry::update`] calls, so a
/// collaborator can swap the stored function without re-registering and
/// without disturbing entry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackToken(u64);

#[derive(Default)]
pub struct HotkeyRegistry {
    bindings: HashMap<String, Vec<CallbackToken>>,
    slots: HashMap<CallbackToken, CallbackSlot>,
    next_token: u64,
}

impl HotkeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `callback` to the entry for `descriptor`, creating the entry
    /// if absent. Descriptor validity is the matcher's concern at match time,
    /// never checked here.
    pub fn register(&mut self, descriptor: &str, callback: HotkeyCallback) -> CallbackToken {
        let token = CallbackToken(self.next_token);
        self.next_token += 1;
        self.slots.insert(token, Rc::new(RefCell::new(Some(callback))));
        self.bindings
            .entry(descriptor.to_string())
            .or_default()
            .push(token);
        tracing::debug!(descriptor, ?token, "registered hotkey callback");
        token
    }

    /// Replaces the function stored behind `token` in place. Returns `false`
    /// when the token is no longer registered. A callback may retarget its
    /// own token while it is executing; the replacement runs from the next
    /// invocation.
    pub fn update(&mut self, token: CallbackToken, callback: HotkeyCallback) -> bool {
        match self.slots.get(&token) {
            Some(slot) => {
                *slot.borrow_mut() = Some(callback);
                true
            }
            None => false,
        }
    }

    /// Removes the callback registered under `descriptor` with `token`; the
    /// entry itself disappears once its last callback is removed. A miss on
    /// either the descriptor or the token is a silent no-op.
    pub fn unregister(&mut self, descriptor: &str, token: CallbackToken) {
        let Some(tokens) = self.bindings.get_mut(descriptor) else {
            return;
        };
        let Some(position) = tokens.iter().position(|candidate| *candidate == token) else {
            return;
        };
        tokens.remove(position);
        if tokens.is_empty() {
            self.bindings.remove(descriptor);
        }
        self.slots.remove(&token);
        tracing::debug!(descriptor, ?token, "unregistered hotkey callback");
    }

    /// Point-in-time view for dispatch iteration. Slots are shared handles,
    /// so a callback swapped via [`HotkeyRegistry::update`] mid-dispatch is
    /// picked up from its next invocation, while registration and removal
    /// only affect later snapshots.
    pub fn snapshot(&self) -> Vec<(String, Vec<CallbackSlot>)> {
        self.bindings
            .iter()
            .map(|(descriptor, tokens)| {
                let slots = tokens
                    .iter()
                    .filter_map(|token| self.slots.get(token))
                    .cloned()
                    .collect();
                (descriptor.clone(), slots)
            })
            .collect()
    }

    /// Number of descriptors with at least one live callback.
    pub(crate) fn descriptor_count(&self) -> usize {
        self.bindings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyModifiers;

    fn noop() -> HotkeyCallback {
        Box::new(|_event: &KeyEvent| {})
    }

    #[test]
    fn register_preserves_insertion_order_per_descriptor() {
        let mut registry = HotkeyRegistry::new();
        let first = registry.register("ctrl+d", noop());
        let second = registry.register("ctrl+d", noop());

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 1);
        let (descriptor, slots) = &snapshot[0];
        assert_eq!(descriptor, "ctrl+d");
        assert_eq!(slots.len(), 2);
        assert_ne!(first, second);
    }

    #[test]
    fn unregister_removes_entry_once_empty() {
        let mut registry = HotkeyRegistry::new();
        let a = registry.register("g+b", noop());
        let b = registry.register("g+b", noop());
        assert_eq!(registry.descriptor_count(), 1);

        registry.unregister("g+b", a);
        assert_eq!(registry.descriptor_count(), 1);

        registry.unregister("g+b", b);
        assert_eq!(registry.descriptor_count(), 0);
    }

    #[test]
    fn unregister_is_idempotent_and_tolerates_misses() {
        let mut registry = HotkeyRegistry::new();
        let token = registry.register("a", noop());

        registry.unregister("a", token);
        registry.unregister("a", token);
        registry.unregister("never-registered", token);
        assert_eq!(registry.descriptor_count(), 0);
    }

    #[test]
    fn update_swaps_the_stored_callback_in_place() {
        let mut registry = HotkeyRegistry::new();
        let hits = Rc::new(RefCell::new(0));

        let token = registry.register("a", noop());
        let counter = Rc::clone(&hits);
        let swapped: HotkeyCallback =
            Box::new(move |_event: &KeyEvent| *counter.borrow_mut() += 1);
        assert!(registry.update(token, swapped));

        let snapshot = registry.snapshot();
        let event = KeyEvent::new("a", KeyModifiers::NONE);
        for (_, slots) in &snapshot {
            for slot in slots {
                if let Some(callback) = slot.borrow_mut().as_mut() {
                    callback(&event);
                }
            }
        }
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn update_reports_unknown_tokens() {
        let mut registry = HotkeyRegistry::new();
        let token = registry.register("a", noop());
        registry.unregister("a", token);
        assert!(!registry.update(token, noop()));
    }

    #[test]
    fn snapshot_is_unaffected_by_later_mutation() {
        let mut registry = HotkeyRegistry::new();
        registry.register("a", noop());

        let snapshot = registry.snapshot();
        registry.register("b", noop());
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.descriptor_count(), 2);
    }
}
