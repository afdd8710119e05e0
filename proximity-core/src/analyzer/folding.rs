//! Case folding for index keys.
//!
//! City and country names are always folded before they touch the membership
//! maps. Name keys are folded only when the engine is configured for
//! case-insensitive prefixes.
//!
//! Unlike a full text normalizer this never touches whitespace: the full-name
//! key is `"{first} {last}"` and its single space is part of the key.
//!
//! Folding is per character, so the fold of a prefix is always a prefix of
//! the fold of the whole key. `str::to_lowercase` is not: it maps a final
//! capital sigma to `ς` but an inner one to `σ`.

use std::borrow::Cow;

/// Lowercases keys, borrowing the input when it is already lowercase.
///
/// # Examples
///
/// ```
/// use proximity_core::analyzer::CaseFolder;
///
/// let folder = CaseFolder::new();
/// assert_eq!(folder.fold("Berlin"), "berlin");
/// assert_eq!(folder.fold("Łódź"), "łódź");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFolder;

impl CaseFolder {
    /// Creates a folder.
    pub const fn new() -> Self {
        Self
    }

    /// Folds `input`, allocating only when some character changes.
    #[inline]
    pub fn fold<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if input.is_ascii() {
            if input.bytes().any(|b| b.is_ascii_uppercase()) {
                Cow::Owned(input.to_ascii_lowercase())
            } else {
                Cow::Borrowed(input)
            }
        } else if input.chars().any(changes_when_lowercased) {
            Cow::Owned(input.chars().flat_map(char::to_lowercase).collect())
        } else {
            Cow::Borrowed(input)
        }
    }
}

/// Whether folding `c` changes it. Covers titlecase letters like `ǅ`, which
/// are not uppercase but still lowercase to something else.
#[inline]
fn changes_when_lowercased(c: char) -> bool {
    let mut lower = c.to_lowercase();
    lower.next() != Some(c) || lower.next().is_some()
}
