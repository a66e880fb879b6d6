/// Characters that end up standing in for an apostrophe: right single
/// quotation mark, acute accent, modifier letter apostrophe, grave accent.
pub const APOSTROPHE_VARIANTS: &[char] = &['\u{2019}', '\u{00B4}', '\u{02BC}', '\u{0060}'];

pub const APOSTROPHE: &str = "'";

pub fn unify_apostrophes(text: &str) -> String {
    text.replace(APOSTROPHE_VARIANTS, APOSTROPHE)
}
