//! Greek text helpers: script detection, greeklish transliteration and
//! accent stripping.

use std::fmt;
use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::RabotError;

/// Wiktionary editions the bot knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Greek,
}

impl Language {
    /// Subdomain code, e.g. `el` in `el.wiktionary.org`.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Greek => "el",
        }
    }
}

impl FromStr for Language {
    type Err = RabotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "english" | "en" => Ok(Language::English),
            "greek" | "el" | "ελληνικά" => Ok(Language::Greek),
            other => Err(RabotError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Greek => write!(f, "greek"),
        }
    }
}

/// Heuristic used by WordReference routing: anything outside the Latin-1-ish
/// range is taken as Greek.
pub fn is_english(word: &str) -> bool {
    word.chars().all(|c| (c as u32) < 200)
}

fn greeklish_char(c: char) -> Option<&'static str> {
    let mapped = match c {
        'a' => "α",
        'b' => "β",
        // No direct equivalent; σ is what loanwords use.
        'c' => "σ",
        'd' => "δ",
        'e' => "ε",
        'f' => "φ",
        'g' => "γ",
        'h' => "η",
        'i' => "ι",
        'j' => "τζ",
        'k' => "κ",
        'l' => "λ",
        'm' => "μ",
        'n' => "ν",
        'o' => "ο",
        'p' => "π",
        'q' => "κ",
        'r' => "ρ",
        's' => "σ",
        't' => "τ",
        'u' => "υ",
        'v' => "β",
        'w' => "ω",
        'x' => "χ",
        'y' => "υ",
        'z' => "ζ",
        _ => return None,
    };
    Some(mapped)
}

/// Lower-case `word` and transliterate Latin letters to Greek.
/// Characters without a mapping are kept as-is.
pub fn greeklish_to_greek(word: &str) -> String {
    let mut out = String::with_capacity(word.len() * 2);
    for c in word.to_lowercase().chars() {
        match greeklish_char(c) {
            Some(g) => out.push_str(g),
            None => out.push(c),
        }
    }
    out
}

/// Strip diacritics while keeping case: `Καλημέρα` → `Καλημερα`.
pub fn remove_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Accent-less, case-folded form used for fuzzy comparisons.
///
/// `Άλφα`, `Αλφα`, `άλφα` and `αλφα` all map to `αλφα`.
pub fn normalize_greek_word(word: &str) -> String {
    word.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        // Final sigma folds to σ, as Python's casefold does.
        .map(|c| if c == 'ς' { 'σ' } else { c })
        .collect()
}
