pub mod apostrophe;
pub mod diacritics;

use unicode_normalization::UnicodeNormalization;

/// Canonical form of practice text, whether pasted or extracted.
///
/// Applied in order:
/// 1. mark-before-letter diacritic repair
/// 2. letter-before-mark diacritic repair
/// 3. NFC
/// 4. apostrophe unification, which also sweeps up stray acute and grave
///    glyphs that did not belong to a repaired pair
/// 5. trim
///
/// Absent input is treated as empty. The result is stable under a second
/// application.
pub fn normalize(input: Option<&str>) -> String {
    let text = input.unwrap_or_default();
    let repaired = diacritics::repair(text);
    let composed: String = repaired.nfc().collect();
    apostrophe::unify_apostrophes(&composed).trim().to_string()
}

pub fn normalize_str(input: &str) -> String {
    normalize(Some(input))
}
