//! Romanized sound -> Bengali spelling table
//!
//! Each entry lists every script token a romanized unit may be written as at a
//! single position. An empty string means the sound may have no mark at all
//! (the inherent vowel). The table is a fixed contract: dropping a variant
//! loses recall, so entries are covered by tests rather than inferred.
//!
//! ড় (U+09DC), ঢ় (U+09DD) and য় (U+09DF) are written as escapes because they
//! are the precomposed code points; an editor that normalizes would silently
//! turn them into base + nukta.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Two-letter units, tested before single letters
pub const DIGRAPHS: &[(&str, &[&str])] = &[
    ("sh", &["শ", "ষ", "স"]),
    ("th", &["থ", "ঠ"]),
    ("ph", &["ফ"]),
    ("gh", &["ঘ"]),
    ("kh", &["খ", "ক্ষ"]),
    ("dh", &["ধ", "ঢ"]),
    ("ch", &["চ", "ছ"]),
    ("bh", &["ভ"]),
    ("jh", &["ঝ"]),
    ("ng", &["ং", "ঙ"]),
];

/// Single letters
pub const LETTERS: &[(char, &[&str])] = &[
    // vowels, independent form and matra
    ('a', &["অ", "আ", "া", ""]),
    ('e', &["এ", "ে", "ই", "ি"]),
    ('i', &["ই", "ঈ", "ি", "ী", "ৈ"]),
    ('o', &["ও", "ো", "অ", "ৌ", "ু"]),
    ('u', &["উ", "ঊ", "ু", "ূ"]),
    // consonants
    ('k', &["ক", "খ"]),
    ('g', &["গ"]),
    ('c', &["চ", "ক", "স"]),
    ('j', &["জ", "য", "্জ"]),
    ('t', &["ট", "ত", "ৎ", "ঃ"]),
    ('d', &["ড", "দ"]),
    ('n', &["ন", "ণ", "ঞ", "ঙ", "ং"]),
    ('p', &["প"]),
    ('f', &["ফ"]),
    ('b', &["ব", "ভ"]),
    ('m', &["ম"]),
    ('r', &["র", "\u{09DC}", "\u{09DD}", "ৃ", "্র", "র্"]),
    ('l', &["ল"]),
    ('s', &["স", "শ", "ষ"]),
    ('h', &["হ", "ঃ"]),
    ('y', &["\u{09DF}", "য", "্য"]),
    ('v', &["ভ", "ব"]),
    ('w', &["ব", "ও"]),
    ('z', &["জ", "য"]),
];

static DIGRAPH_INDEX: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| DIGRAPHS.iter().copied().collect());

static LETTER_INDEX: Lazy<HashMap<char, &'static [&'static str]>> =
    Lazy::new(|| LETTERS.iter().copied().collect());

/// Look up a digraph such as `"sh"`
pub fn digraph(pair: &str) -> Option<&'static [&'static str]> {
    DIGRAPH_INDEX.get(pair).copied()
}

/// Look up a single lower-case letter
pub fn letter(c: char) -> Option<&'static [&'static str]> {
    LETTER_INDEX.get(&c).copied()
}

/// Whether `first` followed by `second` forms a digraph
pub fn is_digraph(first: char, second: char) -> bool {
    let mut buf = [0u8; 8];
    let len = first.encode_utf8(&mut buf).len();
    let len = len + second.encode_utf8(&mut buf[len..]).len();
    std::str::from_utf8(&buf[..len])
        .map(|pair| DIGRAPH_INDEX.contains_key(pair))
        .unwrap_or(false)
}
