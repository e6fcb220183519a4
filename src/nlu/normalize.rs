//! Arabic text normalization used for matching place names.
//!
//! Nothing here is meant for display: the output drops hamza and diacritics
//! so that differently spelled variants of the same name compare equal.

/// Dialect words and their standard forms. Matched per whole word.
const EGYPTIAN_WORDS: &[(&str, &str)] = &[
    ("عايز", "أريد"),
    ("عايزة", "أريد"),
    ("عاوز", "أريد"),
    ("عاوزة", "أريد"),
    ("روح", "اذهب"),
    ("روحة", "اذهب"),
    ("روحه", "اذهب"),
    ("إزاي", "كيف"),
    ("ازاي", "كيف"),
    ("إمتى", "متى"),
    ("امتى", "متى"),
    ("منين", "من أين"),
    ("فين", "أين"),
    ("ليه", "لماذا"),
    ("سيف", "السيوف"),
    ("سيوف", "السيوف"),
    ("منشية", "المنشية"),
];

/// Punctuation trimmed from the edges of a word before dictionary lookups
pub const EDGE_PUNCTUATION: &[char] = &['?', '؟', '.', '!', '،', ',', ':', ';', '"', '\''];

const TATWEEL: char = '\u{0640}';

/// Arabic diacritics (harakat, tanween, shadda, sukun, superscript alef)
fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}')
}

/// Fold Arabic spelling variants onto one form.
///
/// - أ إ آ ٱ become ا
/// - ى becomes ي
/// - ة becomes ه
/// - tatweel and diacritics are dropped
pub fn normalize_arabic(text: &str) -> String {
    text.chars()
        .filter(|c| *c != TATWEEL && !is_diacritic(*c))
        .map(|c| match c {
            'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
            'ى' => 'ي',
            'ة' => 'ه',
            other => other,
        })
        .collect()
}

/// Replace Egyptian dialect words with their standard Arabic equivalents.
///
/// Replacement is per whitespace-separated word; a dialect word inside a
/// longer word (e.g. `روح` in `أروح`) is left alone. Punctuation stuck to
/// the end of a word is preserved.
pub fn normalize_egyptian(text: &str) -> String {
    text.split_whitespace()
        .map(|token| {
            let core = token.trim_end_matches(EDGE_PUNCTUATION);
            let tail = &token[core.len()..];
            match EGYPTIAN_WORDS.iter().find(|(word, _)| *word == core) {
                Some((_, standard)) => format!("{}{}", standard, tail),
                None => token.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, trim and fold Arabic variants: the form used for index keys.
pub fn match_key(text: &str) -> String {
    normalize_arabic(text.trim()).to_lowercase()
}
