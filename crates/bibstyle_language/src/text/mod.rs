//! Brace-aware text algorithms behind the string builtins.
//!
//! BibTeX text is plain characters plus brace groups. A group opened at
//! depth 0 whose first character is a backslash, like `{\'e}` or `{\ss}`,
//! is a *special character*: it counts as one character, and its control
//! word may name a foreign letter. Every other group protects its content
//! from case changes and name splitting.

mod case;
mod names;
mod purify;
mod slice;
mod width;

pub use case::{CaseMode, change_case};
pub use names::{NameToken, PersonName, count_names, format_name, parse_name, split_names};
pub use purify::purify;
pub use slice::{substring, text_length, text_prefix};
pub use width::{char_width, text_width};

/// Control words that denote foreign letters.
const FOREIGN_LETTERS: &[&str] = &[
    "oe", "OE", "ae", "AE", "aa", "AA", "o", "O", "l", "L", "ss", "i", "j",
];

/// Returns true if `word` is a foreign-letter control word.
pub(crate) fn is_foreign_letter(word: &str) -> bool {
    FOREIGN_LETTERS.contains(&word)
}

/// Returns true if a special character starts at `open`.
pub(crate) fn is_special_group(chars: &[char], open: usize) -> bool {
    chars.get(open) == Some(&'{') && chars.get(open + 1) == Some(&'\\')
}

/// Returns the index just past the brace that closes the group at `open`,
/// or the end of input if the group is unterminated.
pub(crate) fn group_end(chars: &[char], open: usize) -> usize {
    let mut depth = 0usize;
    for (i, &c) in chars.iter().enumerate().skip(open) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
    }
    chars.len()
}

/// Returns the content of the group at `open` and the index past it.
///
/// An unterminated group runs to the end of input.
pub(crate) fn group_body(chars: &[char], open: usize) -> (&[char], usize) {
    let mut depth = 0usize;
    for (i, &c) in chars.iter().enumerate().skip(open) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (&chars[open + 1..i], i + 1);
                }
            }
            _ => {}
        }
    }
    (&chars[(open + 1).min(chars.len())..], chars.len())
}

/// Reads the control sequence whose backslash is at `backslash`.
///
/// Returns the name without the backslash and the index after it. A
/// control word is a run of ASCII letters; anything else is a one-character
/// control symbol such as `\'`.
pub(crate) fn control_word(chars: &[char], backslash: usize) -> (String, usize) {
    let start = backslash + 1;
    let mut end = start;
    while chars.get(end).is_some_and(char::is_ascii_alphabetic) {
        end += 1;
    }
    if end == start && start < chars.len() {
        end += 1;
    }
    (chars[start.min(chars.len())..end].iter().collect(), end)
}

/// Appends a period unless the text already ends in sentence punctuation.
///
/// Trailing right braces are skipped when looking for the last character.
/// Empty text stays empty.
#[must_use]
pub fn add_period(s: &str) -> String {
    match s.trim_end_matches('}').chars().last() {
        None => s.to_string(),
        Some('.' | '!' | '?') => s.to_string(),
        Some(_) => format!("{s}."),
    }
}
