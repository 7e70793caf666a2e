//! Scoped keyboard-shortcut dispatch.
//!
//! Combos are described by strings such as `"ctrl+d"`, `"shift+a+b"` (a
//! two-key chord: `a` still held when `b` is pressed) or the catch-all
//! `"default"`. A [`HotkeyDispatcher`] is created per UI root, consumes the
//! host's key-down/key-up stream as [`KeyEvent`] snapshots, and invokes every
//! callback whose descriptor matches. Collaborators register through
//! [`HotkeyRegistrar`] handles or, preferably, scoped [`HotkeyBinding`]
//! guards that release the registration on drop.

pub mod combo;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod logging;
pub mod registry;

pub use combo::{combo_matches, DEFAULT_COMBO};
pub use dispatcher::{HotkeyBinding, HotkeyDispatcher, HotkeyRegistrar};
pub use error::ComboError;
pub use event::{KeyEvent, KeyModifiers};
pub use registry::{CallbackToken, HotkeyCallback, HotkeyRegistry};
