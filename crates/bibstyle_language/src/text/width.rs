//! Pseudo-widths for `width$`, measured in cmr10 units.

use super::{control_word, is_special_group};

/// Width of a character in the cmr10 font, 0 for anything unlisted.
#[must_use]
pub const fn char_width(c: char) -> i32 {
    match c {
        ' ' | '!' | '\'' | ',' | '.' | ':' | ';' | '<' | '[' | ']' | '`' => 278,
        '"' | '$' | '/' | '*' | '\\' | '^' | '{' | '}' | '~' | '0'..='9' => 500,
        '#' | '%' | 'm' => 833,
        '&' | '@' | '+' | '=' | 'O' | 'Q' | 'K' => 778,
        '(' | ')' => 389,
        '-' => 333,
        '>' | '?' => 472,
        '|' => 1000,
        'A' | 'H' | 'N' | 'U' | 'V' | 'X' | 'Y' => 750,
        'B' => 708,
        'C' | 'T' => 722,
        'D' => 764,
        'E' | 'P' => 681,
        'F' => 653,
        'G' => 785,
        'I' => 361,
        'J' => 514,
        'L' => 625,
        'M' => 917,
        'R' => 736,
        'S' => 556,
        'W' => 1028,
        'Z' => 611,
        'a' | 'o' | 'g' => 500,
        'b' | 'd' | 'h' | 'n' | 'p' | 'u' => 556,
        'c' | 'e' | 'z' => 444,
        'f' | 'j' => 306,
        'i' | 'l' => 278,
        'k' | 'q' | 'v' | 'x' | 'y' => 528,
        'r' => 392,
        's' => 394,
        't' => 389,
        'w' => 722,
        _ => 0,
    }
}

/// Width of a foreign-letter control word inside a special character.
fn foreign_width(word: &str) -> Option<i32> {
    match word {
        "ss" => Some(500),
        "ae" => Some(722),
        "oe" => Some(778),
        "AE" => Some(903),
        "OE" => Some(1014),
        "i" | "j" | "o" | "O" | "l" | "L" | "aa" | "AA" => {
            word.chars().next().map(char_width)
        }
        _ => None,
    }
}

/// Sums the widths of the characters of `s`.
///
/// Braces count like any other character, except around special
/// characters, where only the letters inside are measured and unknown
/// control words contribute nothing.
#[must_use]
pub fn text_width(s: &str) -> i32 {
    let chars: Vec<char> = s.chars().collect();
    let mut width = 0;
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '{' => {
                depth += 1;
                if depth == 1 && is_special_group(&chars, i) {
                    i = special_width(&chars, i + 1, &mut depth, &mut width);
                    continue;
                }
                width += char_width(c);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                width += char_width(c);
            }
            _ => width += char_width(c),
        }
        i += 1;
    }
    width
}

/// Measures a special character starting at its first backslash.
fn special_width(chars: &[char], mut i: usize, depth: &mut usize, width: &mut i32) -> usize {
    while i < chars.len() && *depth > 0 {
        let (word, next) = control_word(chars, i);
        let is_symbol = !word.starts_with(|c: char| c.is_ascii_alphabetic());
        // Control symbols like \' are measured as ordinary characters.
        i = if is_symbol { i + 1 } else { next };
        if let Some(w) = foreign_width(&word) {
            *width += w;
        }
        while chars.get(i).is_some_and(|c| c.is_whitespace()) {
            i += 1;
        }
        while i < chars.len() && *depth > 0 && chars[i] != '\\' {
            match chars[i] {
                '{' => *depth += 1,
                '}' => *depth -= 1,
                c => *width += char_width(c),
            }
            i += 1;
        }
    }
    i
}
