//! Counting and slicing text.

use super::is_special_group;

/// Extracts `len` characters starting at the 1-based position `start`.
///
/// A negative `start` counts from the end (`-1` is the last character) and
/// selects the `len` characters ending at that position. A start of zero or
/// beyond either end of the text selects nothing, as does a non-positive
/// length.
#[must_use]
pub fn substring(s: &str, start: i32, len: i32) -> String {
    let chars: Vec<char> = s.chars().collect();
    let n = i64::try_from(chars.len()).unwrap_or(i64::MAX);
    let start = i64::from(start);
    let len = i64::from(len);

    if start == 0 || start.abs() > n || len <= 0 {
        return String::new();
    }

    let (begin, end) = if start > 0 {
        let begin = start - 1;
        (begin, (begin + len).min(n))
    } else {
        let end = n + start + 1;
        ((end - len).max(0), end)
    };

    // Both bounds lie in 0..=n here.
    let begin = usize::try_from(begin).unwrap_or_default();
    let end = usize::try_from(end).unwrap_or_default();
    chars[begin..end].iter().collect()
}

/// Counts characters the way BibTeX does.
///
/// Braces are not counted. A special character counts as one, even when its
/// group is never closed.
#[must_use]
pub fn text_length(s: &str) -> usize {
    let chars: Vec<char> = s.chars().collect();
    let mut count = 0;
    let mut depth = 0usize;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '{' => {
                depth += 1;
                if depth == 1 && is_special_group(&chars, i) {
                    count += 1;
                    i += 1;
                    while i < chars.len() && depth > 0 {
                        match chars[i] {
                            '{' => depth += 1,
                            '}' => depth -= 1,
                            _ => {}
                        }
                        i += 1;
                    }
                    continue;
                }
            }
            '}' => depth = depth.saturating_sub(1),
            _ => count += 1,
        }
        i += 1;
    }
    count
}

/// Returns the first `n` characters, counted as [`text_length`] counts them.
///
/// Groups left open by the cut are closed.
#[must_use]
pub fn text_prefix(s: &str, n: i32) -> String {
    let Ok(limit) = usize::try_from(n) else {
        return String::new();
    };
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut count = 0;
    let mut depth = 0usize;
    let mut i = 0;
    while i < chars.len() && count < limit {
        let c = chars[i];
        out.push(c);
        match c {
            '{' => {
                depth += 1;
                if depth == 1 && is_special_group(&chars, i) {
                    count += 1;
                    i += 1;
                    while i < chars.len() && depth > 0 {
                        match chars[i] {
                            '{' => depth += 1,
                            '}' => depth -= 1,
                            _ => {}
                        }
                        out.push(chars[i]);
                        i += 1;
                    }
                    continue;
                }
            }
            '}' => depth = depth.saturating_sub(1),
            _ => count += 1,
        }
        i += 1;
    }
    out.extend(std::iter::repeat_n('}', depth));
    out
}
