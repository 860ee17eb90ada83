//! Case conversion for `change.case$`.

use super::{control_word, group_end, is_special_group};

/// How `change.case$` converts text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseMode {
    /// Lowercase everything except the first character and the first
    /// character after a colon and whitespace.
    Title,
    /// Uppercase every unprotected letter.
    Upper,
    /// Lowercase every unprotected letter.
    Lower,
}

impl CaseMode {
    /// Parses a mode specifier: `t`, `u`, or `l` in either case.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        match spec {
            "t" | "T" => Some(Self::Title),
            "u" | "U" => Some(Self::Upper),
            "l" | "L" => Some(Self::Lower),
            _ => None,
        }
    }
}

/// Converts the case of `s`.
///
/// Brace groups are left alone, except special characters: their plain
/// letters are converted and foreign-letter control words are mapped, so
/// `{\oe}` becomes `{\OE}` and `{\ss}` becomes `{SS}` in upper case.
#[must_use]
pub fn change_case(s: &str, mode: CaseMode) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut prev_colon = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let sentence_start = i == 0 || (prev_colon && chars[i - 1].is_whitespace());

        if c == '{' {
            let end = group_end(&chars, i);
            if is_special_group(&chars, i) && !(mode == CaseMode::Title && sentence_start) {
                convert_special(&chars[i..end], mode, &mut out);
            } else {
                out.extend(&chars[i..end]);
            }
            prev_colon = false;
            i = end;
            continue;
        }

        match mode {
            CaseMode::Title if sentence_start => out.push(c),
            CaseMode::Title | CaseMode::Lower => out.extend(c.to_lowercase()),
            CaseMode::Upper => out.extend(c.to_uppercase()),
        }

        if c == ':' {
            prev_colon = true;
        } else if !c.is_whitespace() {
            prev_colon = false;
        }
        i += 1;
    }
    out
}

/// Converts one special-character group, braces included.
fn convert_special(group: &[char], mode: CaseMode, out: &mut String) {
    let mut j = 0;
    while j < group.len() {
        let c = group[j];
        if c == '\\' {
            let (word, next) = control_word(group, j);
            match convert_foreign(&word, mode) {
                Some(mapped) => out.push_str(mapped),
                None => {
                    out.push('\\');
                    out.push_str(&word);
                }
            }
            j = next;
            continue;
        }
        match mode {
            CaseMode::Upper => out.extend(c.to_uppercase()),
            CaseMode::Title | CaseMode::Lower => out.extend(c.to_lowercase()),
        }
        j += 1;
    }
}

/// Maps a foreign-letter control word to its converted spelling.
///
/// Dotless i and j have no upper-case control word, so they become plain
/// letters, as does `\ss`.
fn convert_foreign(word: &str, mode: CaseMode) -> Option<&'static str> {
    match mode {
        CaseMode::Upper => match word {
            "oe" => Some("\\OE"),
            "ae" => Some("\\AE"),
            "aa" => Some("\\AA"),
            "o" => Some("\\O"),
            "l" => Some("\\L"),
            "i" => Some("I"),
            "j" => Some("J"),
            "ss" => Some("SS"),
            _ => None,
        },
        CaseMode::Title | CaseMode::Lower => match word {
            "OE" => Some("\\oe"),
            "AE" => Some("\\ae"),
            "AA" => Some("\\aa"),
            "O" => Some("\\o"),
            "L" => Some("\\l"),
            _ => None,
        },
    }
}
