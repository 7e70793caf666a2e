//! Chord-aware dispatch over the hotkey registry.
//!
//! One [`HotkeyDispatcher`] is constructed per active UI root and dropped
//! with it; it owns the registry and the previously pressed, still-held key
//! that makes two-key chords possible. Collaborators register through
//! [`HotkeyRegistrar`] handles or scoped [`HotkeyBinding`] guards.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::combo::{combo_matches, DEFAULT_COMBO};
use crate::event::KeyEvent;
use crate::registry::{CallbackToken, HotkeyCallback, HotkeyRegistry};

pub struct HotkeyDispatcher {
    registry: Rc<RefCell<HotkeyRegistry>>,
    prev_key: Option<String>,
}

impl HotkeyDispatcher {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(HotkeyRegistry::new())),
            prev_key: None,
        }
    }

    /// Cloneable registration handle tied to this dispatcher's lifetime.
    pub fn registrar(&self) -> HotkeyRegistrar {
        HotkeyRegistrar {
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Registers `callback` under `descriptor` for as long as the returned
    /// guard lives.
    pub fn bind(&self, descriptor: &str, callback: HotkeyCallback) -> HotkeyBinding {
        let registrar = self.registrar();
        let token = registrar.register(descriptor, callback);
        HotkeyBinding {
            registrar,
            descriptor: descriptor.to_string(),
            token,
        }
    }

    /// Feeds one key-down event through every registered combo.
    ///
    /// Events from a text-entry widget are ignored outright. Otherwise each
    /// entry in a snapshot of the registry is evaluated (`default` matches
    /// unconditionally) and every callback of every matching entry runs in
    /// registration order. The previous-key state is then set to this event's
    /// key whether or not anything matched; that is what arms a chord whose
    /// first key is still held when the second arrives.
    pub fn on_key_down(&mut self, event: &KeyEvent) {
        if event.text_input_active {
            tracing::trace!(key = %event.key, "key-down in text input ignored");
            return;
        }

        // Snapshot first: a callback may register or unregister combos, and
        // the in-flight dispatch must not see those changes.
        let snapshot = self.registry.borrow().snapshot();
        for (descriptor, slots) in &snapshot {
            let matched = descriptor == DEFAULT_COMBO
                || combo_matches(descriptor, event, self.prev_key.as_deref());
            if !matched {
                continue;
            }
            tracing::debug!(descriptor = %descriptor, key = %event.key, "combo matched");
            for slot in slots {
                // Take the callback out for the duration of the call; the
                // slot must not stay borrowed while user code runs, or a
                // callback retargeting its own token would re-borrow it.
                let Some(mut callback) = slot.borrow_mut().take() else {
                    continue;
                };
                callback(event);
                let mut vacated = slot.borrow_mut();
                if vacated.is_none() {
                    *vacated = Some(callback);
                }
            }
        }

        self.prev_key = Some(event.normalized_key());
    }

    /// Clears the previous-key state when the tracked key is released.
    pub fn on_key_up(&mut self, event: &KeyEvent) {
        if self.prev_key.as_deref() == Some(event.normalized_key().as_str()) {
            self.prev_key = None;
        }
    }

    /// The previously pressed key still considered held, if any.
    pub fn held_key(&self) -> Option<&str> {
        self.prev_key.as_deref()
    }
}

impl Default for HotkeyDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration handle for UI collaborators.
///
/// Handles stay cheap to clone and hand out, but they do not keep the
/// dispatcher alive: using one after its dispatcher was dropped is a wiring
/// mistake and panics.
#[derive(Clone)]
pub struct HotkeyRegistrar {
    registry: Weak<RefCell<HotkeyRegistry>>,
}

impl HotkeyRegistrar {
    fn registry(&self) -> Rc<RefCell<HotkeyRegistry>> {
        self.registry
            .upgrade()
            .expect("hotkey registrar used after its HotkeyDispatcher was dropped")
    }

    /// Appends `callback` to the entry for `descriptor`; see
    /// [`HotkeyRegistry::register`].
    pub fn register(&self, descriptor: &str, callback: HotkeyCallback) -> CallbackToken {
        self.registry().borrow_mut().register(descriptor, callback)
    }

    /// Removes a registration; a miss is a silent no-op.
    pub fn unregister(&self, descriptor: &str, token: CallbackToken) {
        self.registry().borrow_mut().unregister(descriptor, token);
    }

    /// Swaps the function behind `token` in place; see
    /// [`HotkeyRegistry::update`].
    pub fn update(&self, token: CallbackToken, callback: HotkeyCallback) -> bool {
        self.registry().borrow_mut().update(token, callback)
    }
}

/// Scoped registration: registers on construction, unregisters on drop.
///
/// This is the acquire-on-mount / release-on-unmount contract for shortcut
/// consumers; holding the guard for the lifetime of the consuming component
/// guarantees the symmetric unregister.
pub struct HotkeyBinding {
    registrar: HotkeyRegistrar,
    descriptor: String,
    token: CallbackToken,
}

impl HotkeyBinding {
    pub fn token(&self) -> CallbackToken {
        self.token
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Swaps the invoked function without re-registering; entry order and
    /// token identity are preserved.
    pub fn set_callback(&self, callback: HotkeyCallback) -> bool {
        self.registrar.update(self.token, callback)
    }
}

impl Drop for HotkeyBinding {
    fn drop(&mut self) {
        // During teardown the dispatcher may already be gone, which also
        // released the registration; only a live registry needs the call.
        if let Some(registry) = self.registrar.registry.upgrade() {
            registry.borrow_mut().unregister(&self.descriptor, self.token);
        }
    }
}
