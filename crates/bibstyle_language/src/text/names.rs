//! Personal names: splitting lists, parsing parts, and formatting.
//!
//! A name list is a string of names joined by the word `and` at brace depth
//! 0. Each name is split into four parts following BibTeX:
//!
//! - `First von Last` when there is no comma; the von part is the run of
//!   words from the first to the last lowercase word before the final word.
//! - `von Last, First` with one comma.
//! - `von Last, Jr, First` with two.

use super::{
    control_word, group_body, group_end, is_foreign_letter, is_special_group, text_length,
};

/// One word of a name part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameToken {
    /// The word as written, braces included.
    pub text: String,
    /// The separator that followed the word: a space, `-`, or `~`.
    pub separator: char,
}

impl NameToken {
    fn new(text: impl Into<String>, separator: char) -> Self {
        Self {
            text: text.into(),
            separator,
        }
    }
}

/// A parsed personal name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonName {
    /// Given names.
    pub first: Vec<NameToken>,
    /// Particles such as `de la` or `van`.
    pub von: Vec<NameToken>,
    /// Family name.
    pub last: Vec<NameToken>,
    /// Suffix such as `Jr.` or `III`.
    pub jr: Vec<NameToken>,
}

impl PersonName {
    fn part(&self, letter: char) -> &[NameToken] {
        match letter {
            'f' => &self.first,
            'v' => &self.von,
            'l' => &self.last,
            _ => &self.jr,
        }
    }
}

// =============================================================================
// Splitting
// =============================================================================

/// Splits a name list at every depth-0 `and` surrounded by whitespace.
///
/// The separator is matched case-insensitively. Blank input has no names.
#[must_use]
pub fn split_names(s: &str) -> Vec<&str> {
    let words = depth_zero_words(s);
    if words.is_empty() {
        return Vec::new();
    }

    let mut names = Vec::new();
    let mut first_word: Option<usize> = None;
    let mut last_end = 0;
    let last_index = words.len() - 1;

    for (i, &(start, end)) in words.iter().enumerate() {
        let is_separator = i > 0 && i < last_index && s[start..end].eq_ignore_ascii_case("and");
        if is_separator {
            names.push(first_word.map_or("", |from| &s[from..last_end]));
            first_word = None;
        } else {
            first_word.get_or_insert(start);
            last_end = end;
        }
    }
    names.push(first_word.map_or("", |from| &s[from..last_end]));
    names
}

/// Counts the names in a name list.
#[must_use]
pub fn count_names(s: &str) -> usize {
    split_names(s).len()
}

/// Byte ranges of the whitespace-separated words at brace depth 0.
fn depth_zero_words(s: &str) -> Vec<(usize, usize)> {
    let mut words = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    for (i, c) in s.char_indices() {
        if depth == 0 && c.is_whitespace() {
            if let Some(from) = start.take() {
                words.push((from, i));
            }
            continue;
        }
        start.get_or_insert(i);
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    if let Some(from) = start {
        words.push((from, s.len()));
    }
    words
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses one name into its parts.
#[must_use]
pub fn parse_name(s: &str) -> PersonName {
    let mut parts = tokenize(s);
    match parts.len() {
        0 | 1 => {
            let tokens = parts.pop().unwrap_or_default();
            first_von_last(tokens)
        }
        2 => {
            let first = parts.pop().unwrap_or_default();
            let (von, last) = von_last(parts.pop().unwrap_or_default());
            PersonName {
                first,
                von,
                last,
                jr: Vec::new(),
            }
        }
        _ => {
            let mut parts = parts.into_iter();
            let (von, last) = von_last(parts.next().unwrap_or_default());
            let jr = parts.next().unwrap_or_default();
            // Extra commas are folded into the first part.
            let first = parts.flatten().collect();
            PersonName {
                first,
                von,
                last,
                jr,
            }
        }
    }
}

/// Splits a name into comma-separated parts of tokens.
fn tokenize(s: &str) -> Vec<Vec<NameToken>> {
    let mut parts: Vec<Vec<NameToken>> = vec![Vec::new()];
    let mut word = String::new();
    let mut depth = 0usize;

    for c in s.chars() {
        if depth == 0 {
            let separator = match c {
                ',' | '-' | '~' => Some(c),
                c if c.is_whitespace() => Some(' '),
                _ => None,
            };
            if let Some(sep) = separator {
                if let Some(part) = parts.last_mut() {
                    end_word(part, &mut word, sep);
                }
                if sep == ',' {
                    parts.push(Vec::new());
                }
                continue;
            }
        }
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        word.push(c);
    }
    if let Some(part) = parts.last_mut() {
        end_word(part, &mut word, ' ');
    }
    parts
}

/// Ends the current word, recording the separator that ended it.
///
/// A hyphen or tie after whitespace still marks the previous word.
fn end_word(part: &mut Vec<NameToken>, word: &mut String, sep: char) {
    let sep = if sep == ',' { ' ' } else { sep };
    if !word.is_empty() {
        part.push(NameToken::new(std::mem::take(word), sep));
    } else if sep != ' ' {
        if let Some(prev) = part.last_mut() {
            prev.separator = sep;
        }
    }
}

fn first_von_last(mut tokens: Vec<NameToken>) -> PersonName {
    let n = tokens.len();
    if n == 0 {
        return PersonName::default();
    }
    let Some(von_start) = (0..n - 1).find(|&i| is_von(&tokens[i].text)) else {
        let last = tokens.split_off(n - 1);
        return PersonName {
            first: tokens,
            last,
            ..PersonName::default()
        };
    };
    let von_end = (von_start..n - 1)
        .rev()
        .find(|&i| is_von(&tokens[i].text))
        .unwrap_or(von_start);
    let last = tokens.split_off(von_end + 1);
    let von = tokens.split_off(von_start);
    PersonName {
        first: tokens,
        von,
        last,
        jr: Vec::new(),
    }
}

fn von_last(mut tokens: Vec<NameToken>) -> (Vec<NameToken>, Vec<NameToken>) {
    let n = tokens.len();
    if n == 0 {
        return (Vec::new(), Vec::new());
    }
    match (0..n - 1).rev().find(|&i| is_von(&tokens[i].text)) {
        Some(von_end) => {
            let last = tokens.split_off(von_end + 1);
            (tokens, last)
        }
        None => (Vec::new(), tokens),
    }
}

/// Returns true if the first cased letter of a word is lowercase.
///
/// Ordinary brace groups are caseless. Special characters are cased by
/// their foreign-letter control word or the first letter they contain.
fn is_von(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '{' {
            let end = group_end(&chars, i);
            if is_special_group(&chars, i) {
                let (control, after) = control_word(&chars, i + 1);
                if is_foreign_letter(&control) {
                    return control.starts_with(|c: char| c.is_lowercase());
                }
                if let Some(&letter) = chars[after.min(end)..end].iter().find(|c| c.is_alphabetic()) {
                    return letter.is_lowercase();
                }
            }
            i = end;
            continue;
        }
        if c.is_alphabetic() {
            return c.is_lowercase();
        }
        i += 1;
    }
    false
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats a parsed name with a BibTeX name pattern such as `{vv~}{ll}{, f.}`.
///
/// Text outside braces is copied. Each depth-1 group names a part by its
/// first letter (`f`, `v`, `l`, `j`); a doubled letter prints full words, a
/// single one abbreviates them. A brace group right after the letters
/// replaces the separator between words. A group whose part is empty
/// prints nothing at all.
#[must_use]
pub fn format_name(name: &PersonName, pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '{' => {
                let (body, end) = group_body(&chars, i);
                if let Some(letter) = part_letter(body) {
                    let tokens = name.part(letter);
                    if !tokens.is_empty() {
                        format_group(body, tokens, &mut out);
                    }
                }
                i = end;
            }
            '}' => i += 1,
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// The part a group refers to: its first depth-1 letter among `fvlj`.
fn part_letter(body: &[char]) -> Option<char> {
    let mut depth = 0usize;
    for &c in body {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            c if depth == 0 && c.is_alphabetic() => {
                let c = c.to_ascii_lowercase();
                return matches!(c, 'f' | 'v' | 'l' | 'j').then_some(c);
            }
            _ => {}
        }
    }
    None
}

/// Emits one pattern group for a non-empty part.
fn format_group(body: &[char], tokens: &[NameToken], out: &mut String) {
    let mut depth = 0usize;
    let mut part_start = out.len();
    let mut full = false;
    let mut emitted = false;
    let mut j = 0;

    while j < body.len() {
        let c = body[j];
        if depth == 0 && c.is_alphabetic() && !emitted {
            part_start = out.len();
            full = body
                .get(j + 1)
                .is_some_and(|next| next.eq_ignore_ascii_case(&c));
            if full {
                j += 1;
            }
            let mut custom = None;
            if body.get(j + 1) == Some(&'{') {
                let (separator, end) = group_body(body, j + 1);
                custom = Some(separator.iter().collect::<String>());
                j = end - 1;
            }
            emit_tokens(tokens, full, custom.as_deref(), part_start, out);
            emitted = true;
        } else if c == '{' {
            depth += 1;
            out.push(c);
        } else if c == '}' {
            depth = depth.saturating_sub(1);
            out.push(c);
        } else {
            out.push(c);
        }
        j += 1;
    }

    // A trailing tie is discretionary: keep it only after short parts.
    if out.ends_with('~') {
        let long = text_length(&out[part_start..]) >= 4;
        if long || (tokens.len() > 1 && !full) {
            out.pop();
            out.push(' ');
        }
    }
}

/// Emits the words of a part with the separators between them.
fn emit_tokens(
    tokens: &[NameToken],
    full: bool,
    custom: Option<&str>,
    part_start: usize,
    out: &mut String,
) {
    for (k, token) in tokens.iter().enumerate() {
        if full {
            out.push_str(&token.text);
        } else {
            out.push_str(&abbreviate(&token.text));
        }
        if k + 1 == tokens.len() {
            break;
        }
        if let Some(sep) = custom {
            out.push_str(sep);
            continue;
        }
        if !full {
            out.push('.');
        }
        if token.separator != ' ' {
            out.push(token.separator);
        } else if k + 2 == tokens.len() || text_length(&out[part_start..]) < 3 {
            out.push('~');
        } else {
            out.push(' ');
        }
    }
}

/// Shortens a word to its first letter, or to its first brace group if the
/// word starts with one.
fn abbreviate(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c == '{' {
            return chars[i..group_end(&chars, i)].iter().collect();
        }
        if c.is_alphabetic() {
            return c.to_string();
        }
    }
    String::new()
}
