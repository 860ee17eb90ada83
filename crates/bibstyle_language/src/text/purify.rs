//! Stripping text down to sortable letters for `purify$`.

use super::{control_word, is_foreign_letter, is_special_group};

/// Removes everything but letters, digits, and word separators.
///
/// Whitespace, hyphens, and ties become spaces. Special characters keep
/// their letters: `{\'e}` becomes `e` and `{\ss}` becomes `ss`; other
/// control sequences vanish.
#[must_use]
pub fn purify(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '{' => {
                depth += 1;
                if depth == 1 && is_special_group(&chars, i) {
                    i = purify_special(&chars, i + 1, &mut depth, &mut out);
                    continue;
                }
            }
            '}' => depth = depth.saturating_sub(1),
            '-' | '~' => out.push(' '),
            c if c.is_whitespace() => out.push(' '),
            c if c.is_alphanumeric() => out.push(c),
            _ => {}
        }
        i += 1;
    }
    out
}

/// Purifies a special character whose first backslash is at `i`.
///
/// Returns the index past the group.
fn purify_special(chars: &[char], mut i: usize, depth: &mut usize, out: &mut String) -> usize {
    while i < chars.len() && *depth > 0 {
        if chars[i] == '\\' {
            let (word, next) = control_word(chars, i);
            if is_foreign_letter(&word) {
                out.push_str(&word);
            }
            i = next;
            continue;
        }
        match chars[i] {
            '{' => *depth += 1,
            '}' => *depth -= 1,
            c if c.is_alphanumeric() => out.push(c),
            _ => {}
        }
        i += 1;
    }
    i
}
