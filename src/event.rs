/// Modifier flags active at the time of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub const NONE: Self = Self::new(false, false, false, false);

    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        Self {
            shift,
            ctrl,
            alt,
            meta,
        }
    }
}

/// Immutable snapshot of one key-down or key-up delivery from the host.
///
/// `key` is the host's key identifier; matching lower-cases it, so hosts do
/// not need to normalize. `text_input_active` marks events originating from a
/// free-form text-entry widget (text field or multi-line area); shortcuts
/// never fire for those.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyEvent {
    pub key: String,
    pub modifiers: KeyModifiers,
    pub text_input_active: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: KeyModifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            text_input_active: false,
        }
    }

    pub(crate) fn normalized_key(&self) -> String {
        self.key.to_lowercase()
    }
}
