//! Syntax highlighting for the REPL.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

use bibstyle_language::BUILTIN_NAMES;

use crate::editor::COMMAND_KEYWORDS;

const RESET: &str = "\x1b[0m";

/// Highlighter for style syntax.
pub struct StyleHighlighter {}

impl StyleHighlighter {
    /// Creates a new highlighter.
    pub const fn new() -> Self {
        Self {}
    }

    /// Highlight a line of input.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                // Comments run to the end of the line
                '%' => {
                    result.push_str("\x1b[2;3m"); // dim italic
                    result.push(c);
                    result.extend(chars.by_ref());
                    result.push_str(RESET);
                }

                // Strings have no escapes
                '"' => {
                    result.push_str("\x1b[33m"); // yellow
                    result.push(c);
                    for next in chars.by_ref() {
                        result.push(next);
                        if next == '"' {
                            break;
                        }
                    }
                    result.push_str(RESET);
                }

                // Integer literals
                '#' => {
                    result.push_str("\x1b[35m"); // magenta
                    result.push(c);
                    result.push_str(&take_name(&mut chars));
                    result.push_str(RESET);
                }

                // Quoted function names
                '\'' => {
                    result.push_str("\x1b[34m"); // blue
                    result.push(c);
                    result.push_str(&take_name(&mut chars));
                    result.push_str(RESET);
                }

                '{' | '}' => {
                    result.push_str("\x1b[1m"); // bold
                    result.push(c);
                    result.push_str(RESET);
                }

                ':' if result.is_empty() && chars.peek().is_some_and(|n| n.is_alphabetic()) => {
                    // REPL meta command
                    result.push_str("\x1b[36m"); // cyan
                    result.push(c);
                    result.push_str(&take_name(&mut chars));
                    result.push_str(RESET);
                }

                c if c.is_whitespace() => result.push(c),

                c => {
                    let mut word = String::new();
                    word.push(c);
                    word.push_str(&take_name(&mut chars));

                    let color = if COMMAND_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(&word)) {
                        "\x1b[1;32m" // bold green
                    } else if BUILTIN_NAMES.contains(&word.to_lowercase().as_str()) {
                        "\x1b[32m" // green
                    } else {
                        ""
                    };

                    if color.is_empty() {
                        result.push_str(&word);
                    } else {
                        result.push_str(color);
                        result.push_str(&word);
                        result.push_str(RESET);
                    }
                }
            }
        }

        Cow::Owned(result)
    }
}

impl Default for StyleHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Consumes the rest of a name or literal.
fn take_name(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut word = String::new();
    while let Some(&next) = chars.peek() {
        if next.is_whitespace() || matches!(next, '{' | '}' | '"' | '%' | '\'' | '#') {
            break;
        }
        word.push(next);
        chars.next();
    }
    word
}
