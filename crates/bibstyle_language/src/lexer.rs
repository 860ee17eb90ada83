//! Lexer for `.bst` style source.
//!
//! The lexer converts source text into a stream of tokens. Words are returned
//! exactly as written; the parser decides which ones are command keywords.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer for style source code.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some('{') => {
                self.advance();
                TokenKind::LBrace
            }
            Some('}') => {
                self.advance();
                TokenKind::RBrace
            }
            Some('%') => self.scan_comment(),
            Some('"') => self.scan_string(),
            Some('#') => self.scan_integer(),
            Some('\'') => self.scan_quote(),
            Some(_) => TokenKind::Word(self.scan_word()),
        };

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
        )
    }

    /// Tokenizes all source and returns a vector of tokens.
    ///
    /// Comments are included in the output.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Scans a comment running from `%` to the end of the line.
    fn scan_comment(&mut self) -> TokenKind {
        self.advance(); // consume '%'
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        TokenKind::Comment(self.source[start..self.position].to_string())
    }

    /// Scans a string literal. There are no escapes: the next `"` closes it.
    fn scan_string(&mut self) -> TokenKind {
        self.advance(); // consume opening '"'
        let start = self.position;
        loop {
            match self.peek_char() {
                Some('"') => {
                    let text = self.source[start..self.position].to_string();
                    self.advance();
                    return TokenKind::Text(text);
                }
                Some(_) => self.advance(),
                None => return TokenKind::Error("unterminated string literal".into()),
            }
        }
    }

    /// Scans an integer literal `#[+-]digits`.
    fn scan_integer(&mut self) -> TokenKind {
        self.advance(); // consume '#'
        let start = self.position;
        if matches!(self.peek_char(), Some('+' | '-')) {
            self.advance();
        }
        let digits_start = self.position;
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.position == digits_start {
            return TokenKind::Error("expected digits after '#'".into());
        }
        // A literal glued to word characters, like `#12abc`, is malformed.
        if self.peek_char().is_some_and(is_word_char) {
            self.scan_word();
            return TokenKind::Error("malformed integer literal".into());
        }
        match self.source[start..self.position].parse::<i32>() {
            Ok(n) => TokenKind::Integer(n),
            Err(e) => TokenKind::Error(format!("invalid integer: {e}")),
        }
    }

    /// Scans a quoted name `'word`.
    fn scan_quote(&mut self) -> TokenKind {
        self.advance(); // consume '\''
        let name = self.scan_word();
        if name.is_empty() {
            TokenKind::Error("expected a name after quote".into())
        } else {
            TokenKind::Quote(name)
        }
    }

    /// Scans a run of word characters.
    fn scan_word(&mut self) -> String {
        let start = self.position;
        while self.peek_char().is_some_and(is_word_char) {
            self.advance();
        }
        self.source[start..self.position].to_string()
    }
}

/// Returns true if `c` can appear in a bare word.
fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '{' | '}' | '"' | '%' | '\'' | '#')
}
