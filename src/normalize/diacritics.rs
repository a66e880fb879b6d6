//! Repair of accented letters that PDF text extractors split into a bare
//! letter and a separate accent glyph, e.g. "ge´ne´re´" or "g´en´er´e".

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Acute,
    Grave,
    Circumflex,
    Cedilla,
    Diaeresis,
}

impl Mark {
    pub const ALL: [Mark; 5] = [
        Mark::Acute,
        Mark::Grave,
        Mark::Circumflex,
        Mark::Cedilla,
        Mark::Diaeresis,
    ];

    /// Free-standing glyph of the mark.
    pub fn spacing(self) -> char {
        match self {
            Mark::Acute => '\u{00B4}',
            Mark::Grave => '\u{0060}',
            Mark::Circumflex => '\u{005E}',
            Mark::Cedilla => '\u{00B8}',
            Mark::Diaeresis => '\u{00A8}',
        }
    }

    pub fn combining(self) -> char {
        match self {
            Mark::Acute => '\u{0301}',
            Mark::Grave => '\u{0300}',
            Mark::Circumflex => '\u{0302}',
            Mark::Cedilla => '\u{0327}',
            Mark::Diaeresis => '\u{0308}',
        }
    }

    /// Code points that NFC turns into this mark. They have to be matched
    /// up front, otherwise a second cleanup would find a fresh pair.
    pub fn canonical_equivalents(self) -> &'static [char] {
        match self {
            // COMBINING ACUTE TONE MARK, COMBINING GREEK DIALYTIKA TONOS
            Mark::Acute => &['\u{0341}', '\u{0344}'],
            // COMBINING GRAVE TONE MARK
            Mark::Grave => &['\u{0340}'],
            Mark::Diaeresis => &['\u{0344}'],
            Mark::Circumflex | Mark::Cedilla => &[],
        }
    }

    fn class_pattern(self) -> String {
        let alternatives: Vec<String> = [self.spacing(), self.combining()]
            .into_iter()
            .chain(self.canonical_equivalents().iter().copied())
            .map(|c| regex::escape(&c.to_string()))
            .collect();
        format!("(?:{})", alternatives.join("|"))
    }
}

/// (mark, base letter, precomposed lowercase letter)
pub type Rule = (Mark, char, &'static str);

/// Mark first, then the letter: "´e" -> "é".
pub const MARK_BEFORE_LETTER: &[Rule] = &[
    (Mark::Acute, 'e', "é"),
    (Mark::Grave, 'a', "à"),
    (Mark::Grave, 'e', "è"),
    (Mark::Grave, 'u', "ù"),
    (Mark::Circumflex, 'a', "â"),
    (Mark::Circumflex, 'e', "ê"),
    (Mark::Circumflex, 'i', "î"),
    (Mark::Circumflex, 'o', "ô"),
    (Mark::Circumflex, 'u', "û"),
    (Mark::Cedilla, 'c', "ç"),
    (Mark::Diaeresis, 'e', "ë"),
    (Mark::Diaeresis, 'i', "ï"),
    (Mark::Diaeresis, 'u', "ü"),
];

/// Letter first, then the mark: "e´" -> "é".
pub const LETTER_BEFORE_MARK: &[Rule] = &[
    (Mark::Grave, 'a', "à"),
    (Mark::Acute, 'e', "é"),
    (Mark::Grave, 'e', "è"),
    (Mark::Grave, 'u', "ù"),
    (Mark::Circumflex, 'a', "â"),
    (Mark::Circumflex, 'e', "ê"),
    (Mark::Circumflex, 'i', "î"),
    (Mark::Circumflex, 'o', "ô"),
    (Mark::Circumflex, 'u', "û"),
    (Mark::Cedilla, 'c', "ç"),
    (Mark::Diaeresis, 'e', "ë"),
    (Mark::Diaeresis, 'i', "ï"),
    (Mark::Diaeresis, 'u', "ü"),
];

// Only spaces and tabs may separate a mark from its letter.
const GAP: &str = "[ \\t]*";

static MARK_BEFORE_LETTER_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile(MARK_BEFORE_LETTER, |mark, letter| {
        format!("(?i){}{GAP}{letter}", mark.class_pattern())
    })
});

static LETTER_BEFORE_MARK_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile(LETTER_BEFORE_MARK, |mark, letter| {
        format!("(?i){letter}{GAP}{}", mark.class_pattern())
    })
});

fn compile(
    rules: &[Rule],
    pattern: impl Fn(Mark, char) -> String,
) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|&(mark, letter, composed)| {
            let source = pattern(mark, letter);
            let regex = Regex::new(&source)
                .unwrap_or_else(|err| panic!("invalid diacritic pattern {source:?}: {err}"));
            (regex, composed)
        })
        .collect()
}

fn apply(rules: &[(Regex, &'static str)], text: String) -> String {
    rules.iter().fold(text, |acc, (regex, composed)| {
        regex.replace_all(&acc, *composed).into_owned()
    })
}

/// Mark-before-letter rules, in table order.
pub fn repair_mark_before_letter(text: &str) -> String {
    apply(&MARK_BEFORE_LETTER_RULES, text.to_string())
}

/// Letter-before-mark rules, in table order.
pub fn repair_letter_before_mark(text: &str) -> String {
    apply(&LETTER_BEFORE_MARK_RULES, text.to_string())
}

/// Both passes, mark-before-letter first.
///
/// Matching ignores the letter's case in both passes but always emits the
/// lowercase precomposed letter, so "´E" becomes "é". This applies to
/// properly decomposed (NFD) text too: "E\u{301}cole" comes back as
/// "école", which affects pastes from sources that store NFD, such as
/// macOS file names.
pub fn repair(text: &str) -> String {
    let first = repair_mark_before_letter(text);
    apply(&LETTER_BEFORE_MARK_RULES, first)
}
