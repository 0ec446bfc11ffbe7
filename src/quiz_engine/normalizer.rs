//! Canonical form of free text used for answer comparison.

use unicode_normalization::UnicodeNormalization;

/// Normalize `text` for comparison.
///
/// Lowercases, strips diacritics (NFD decomposition, then combining marks
/// U+0300..=U+036F are dropped), removes everything that is neither a word
/// character nor whitespace, collapses whitespace runs and trims.
///
/// `"  Hueso   Parietal!!"` and `"hueso parietal"` share the form
/// `"hueso parietal"`; `"Húmero"` becomes `"humero"`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|&c| !is_combining_diacritic(c))
        .filter(|&c| is_word_char(c) || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
