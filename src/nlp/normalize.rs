//! Deterministic text cleanup applied before vectorization.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NON_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z\s]").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Message text reduced to lowercase ASCII letters separated by single spaces.
///
/// Only [`normalize`] produces values of this type, so holding one is proof
/// the cleanup has run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Whitespace-separated words; never yields empty strings.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|word| !word.is_empty())
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase, drop everything except ASCII letters and whitespace, then
/// collapse whitespace runs and trim.
///
/// Dropped characters are deleted rather than replaced, so `"re-boot"`
/// becomes `"reboot"`.
pub fn normalize(text: &str) -> NormalizedText {
    let lower = text.to_lowercase();
    let letters = NON_LETTER.replace_all(&lower, "");
    let collapsed = WHITESPACE.replace_all(&letters, " ");
    NormalizedText(collapsed.trim().to_string())
}
