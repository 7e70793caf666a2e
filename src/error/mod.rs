use thiserror::Error;

/// Non-fatal diagnostics raised while evaluating a combo descriptor.
///
/// A malformed descriptor is reported and then evaluated best-effort; it will
/// most likely never match, but it never aborts a dispatch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComboError {
    #[error(
        "combo '{descriptor}' lists {count} non-modifier keys; only combinations \
         of up to 2 keys plus modifiers are allowed, e.g. 'shift+a+b'"
    )]
    TooManyPrimaryKeys { descriptor: String, count: usize },

    #[error(
        "combo '{descriptor}' contains multi-character key '{token}'; \
         non-modifier keys must be single characters"
    )]
    MultiCharPrimaryKey { descriptor: String, token: String },
}
