// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `LocalizedText` and preferred-locale
//! reduction.

use std::fmt;

use crate::string::UAString;

/// A single translation: a locale tag paired with the text in that locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocalizedText {
    /// RFC 3066 locale identifier, e.g. `"en-US"`. Null/empty means
    /// "unspecified locale" and is treated as a fallback.
    pub locale: UAString,
    /// The text in `locale`.
    pub text: UAString,
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl LocalizedText {
    /// Construct a translation.
    pub fn new(locale: impl Into<UAString>, text: impl Into<UAString>) -> Self {
        Self {
            locale: locale.into(),
            text: text.into(),
        }
    }

    /// Construct with an empty (default) locale, as AddNode's `DisplayName`
    /// default rule does.
    pub fn from_text(text: impl Into<UAString>) -> Self {
        Self {
            locale: UAString::null(),
            text: text.into(),
        }
    }

    /// `true` when both locale and text are null.
    pub fn is_null(&self) -> bool {
        self.locale.is_null() && self.text.is_null()
    }

    /// Select the first translation in `candidates` whose locale matches
    /// one of `preferred_locales`, in the caller's preference order. Falls
    /// back to the first candidate when nothing matches or the list is
    /// empty.
    pub fn select_preferred<'a>(
        candidates: &'a [LocalizedText],
        preferred_locales: &[String],
    ) -> Option<&'a LocalizedText> {
        if candidates.is_empty() {
            return None;
        }
        for locale in preferred_locales {
            if let Some(found) = candidates
                .iter()
                .find(|c| locale_matches(c.locale.as_ref(), locale))
            {
                return Some(found);
            }
        }
        candidates.first()
    }
}

/// Locale match is case-insensitive and matches on the language prefix, so
/// a preference of `"en"` matches a stored `"en-US"` translation.
fn locale_matches(stored: &str, preferred: &str) -> bool {
    if stored.eq_ignore_ascii_case(preferred) {
        return true;
    }
    let stored_lang = stored.split('-').next().unwrap_or(stored);
    let preferred_lang = preferred.split('-').next().unwrap_or(preferred);
    !stored_lang.is_empty() && stored_lang.eq_ignore_ascii_case(preferred_lang)
}

impl From<&str> for LocalizedText {
    fn from(v: &str) -> Self {
        LocalizedText::from_text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_first_when_nothing_matches() {
        let candidates = vec![
            LocalizedText::new("de-DE", "Hallo"),
            LocalizedText::new("fr-FR", "Bonjour"),
        ];
        let preferred = vec!["en-US".to_owned()];
        let selected = LocalizedText::select_preferred(&candidates, &preferred).unwrap();
        assert_eq!(selected.text.as_ref(), "Hallo");
    }

    #[test]
    fn matches_language_prefix() {
        let candidates = vec![
            LocalizedText::new("en-US", "Hello"),
            LocalizedText::new("en-GB", "Hullo"),
        ];
        let preferred = vec!["en".to_owned()];
        let selected = LocalizedText::select_preferred(&candidates, &preferred).unwrap();
        assert_eq!(selected.text.as_ref(), "Hello");
    }
}
