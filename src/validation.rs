//! Identifier validation and display-name helpers for component labels.

use crate::error::{ComponentError, Result};

/// Returns true when `value` is a valid identifier: letters, digits and
/// underscores, not starting with a digit.
pub fn is_valid_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}

/// Validates a component label
pub fn validate_label(label: &str) -> Result<()> {
    if is_valid_identifier(label) {
        Ok(())
    } else {
        Err(ComponentError::InvalidLabel {
            label: label.to_string(),
        })
    }
}

/// Last dotted segment of a module path (`"a.b.c"` -> `"c"`)
pub fn last_segment(path: &str) -> &str {
    path.rsplit_once('.').map_or(path, |(_, tail)| tail)
}

/// Title-cases `value`: every run of letters starts upper-case and continues
/// lower-case, anything else is copied through and ends the run.
pub fn title_case(value: &str) -> String {
    let mut titled = String::with_capacity(value.len());
    let mut in_word = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            titled.push(c);
            in_word = false;
        }
    }

    titled
}
