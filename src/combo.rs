//! Combo descriptor parsing and the matching algorithm.
//!
//! A descriptor is a `+`-separated list of modifier tokens (`shift`, `ctrl`,
//! `alt`, `meta`) and up to two single-character primary keys. Two primary
//! keys form a chord: the first must still be held when the second is
//! pressed. Parsing is case-insensitive.

use crate::error::ComboError;
use crate::event::{KeyEvent, KeyModifiers};

/// Descriptor that matches every key event unconditionally. The dispatcher
/// short-circuits it before the matcher runs.
pub const DEFAULT_COMBO: &str = "default";

const SEPARATOR: char = '+';
const MODIFIER_TOKENS: [&str; 4] = ["shift", "ctrl", "alt", "meta"];
const MAX_PRIMARY_KEYS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedCombo {
    required: KeyModifiers,
    primaries: Vec<String>,
}

fn parse_combo(descriptor: &str) -> ParsedCombo {
    let tokens: Vec<String> = descriptor
        .split(SEPARATOR)
        .map(|token| token.trim().to_lowercase())
        .collect();

    let required = KeyModifiers {
        shift: tokens.iter().any(|token| token == "shift"),
        ctrl: tokens.iter().any(|token| token == "ctrl"),
        alt: tokens.iter().any(|token| token == "alt"),
        meta: tokens.iter().any(|token| token == "meta"),
    };

    let primaries = tokens
        .into_iter()
        .filter(|token| !MODIFIER_TOKENS.contains(&token.as_str()))
        .collect();

    ParsedCombo { required, primaries }
}

fn validate_primaries(descriptor: &str, primaries: &[String]) -> Result<(), ComboError> {
    if primaries.len() > MAX_PRIMARY_KEYS {
        return Err(ComboError::TooManyPrimaryKeys {
            descriptor: descriptor.to_string(),
            count: primaries.len(),
        });
    }
    if let Some(token) = primaries.iter().find(|token| token.chars().count() != 1) {
        return Err(ComboError::MultiCharPrimaryKey {
            descriptor: descriptor.to_string(),
            token: token.clone(),
        });
    }
    Ok(())
}

/// Evaluates one registered descriptor against a key event.
///
/// `prev_key` is the dispatcher's previously pressed, still-held key (already
/// lower-cased); it is what makes two-key chords possible. A malformed
/// descriptor is reported through `tracing` and then evaluated as-is rather
/// than failing the dispatch.
pub fn combo_matches(descriptor: &str, event: &KeyEvent, prev_key: Option<&str>) -> bool {
    let combo = parse_combo(descriptor);
    if let Err(err) = validate_primaries(descriptor, &combo.primaries) {
        tracing::error!(%err, descriptor, "invalid key combo");
    }

    let key = event.normalized_key();
    let primaries_match = match combo.primaries.len() {
        // Modifiers-only combo: the primary condition holds vacuously and
        // the modifier flags alone decide the match.
        0 => true,
        2 => {
            let has_current = combo.primaries.contains(&key);
            let has_prev =
                prev_key.is_some_and(|prev| combo.primaries.iter().any(|token| token == prev));
            has_current && has_prev
        }
        // One primary key, or an invalid longer list degrading to a plain
        // membership test.
        _ => combo.primaries.contains(&key),
    };

    primaries_match && combo.required == event.modifiers
}
