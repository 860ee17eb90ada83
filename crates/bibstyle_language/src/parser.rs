//! Parser for style files.
//!
//! The parser converts a stream of tokens into a [`Style`]. Command keywords
//! are case-insensitive; identifiers and quoted names are lowercased so that
//! `Format.Names` and `format.names` denote the same function.

use bibstyle_foundation::{Error, Result};

use crate::ast::{Block, Command, CommandKind, Item, Style};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Deepest block nesting the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parser for style source code.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Span of the most recently consumed token.
    previous: Span,
    /// Source text (for error messages).
    source: &'src str,
    /// Number of blocks currently open.
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut parser = Self {
            lexer: Lexer::new(source),
            current: Token::new(TokenKind::Eof, Span::default()),
            previous: Span::default(),
            source,
            depth: 0,
        };
        parser.advance();
        parser
    }

    /// Parses every command in the source.
    ///
    /// # Errors
    /// Returns a parse error for malformed commands, unknown keywords,
    /// unterminated strings or blocks, and malformed integer literals.
    pub fn parse_style(&mut self) -> Result<Style> {
        let mut commands = Vec::new();
        while self.current.kind != TokenKind::Eof {
            commands.push(self.parse_command()?);
        }
        Ok(Style { commands })
    }

    /// Parses block items until the end of input.
    ///
    /// This is the form interactive sessions evaluate: a bare body without
    /// the surrounding braces.
    ///
    /// # Errors
    /// Returns a parse error if an item is malformed or a brace is unbalanced.
    pub fn parse_items(&mut self) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::Eof => return Ok(items),
                TokenKind::RBrace => return Err(self.error("unbalanced '}'")),
                _ => items.push(self.parse_item()?),
            }
        }
    }

    /// Parses a single top-level command.
    fn parse_command(&mut self) -> Result<Command> {
        let start = self.current.span;
        let keyword = match &self.current.kind {
            TokenKind::Word(word) => word.to_ascii_lowercase(),
            TokenKind::Error(message) => return Err(self.error(message)),
            _ => {
                return Err(self.error(&format!("expected command, found {}", self.found())));
            }
        };
        self.advance();

        let kind = match keyword.as_str() {
            "entry" => {
                let fields = self.parse_name_list()?;
                let integers = self.parse_name_list()?;
                let strings = self.parse_name_list()?;
                CommandKind::Entry {
                    fields,
                    integers,
                    strings,
                }
            }
            "strings" => CommandKind::Strings(self.parse_name_list()?),
            "integers" => CommandKind::Integers(self.parse_name_list()?),
            "function" => {
                let name = self.parse_single_name()?;
                let body = self.parse_block()?;
                CommandKind::Function { name, body }
            }
            "macro" => {
                let name = self.parse_single_name()?;
                let text = self.parse_macro_text()?;
                CommandKind::Macro { name, text }
            }
            "read" => CommandKind::Read,
            "sort" => CommandKind::Sort,
            "iterate" => CommandKind::Iterate(self.parse_single_name()?),
            "reverse" => CommandKind::Reverse(self.parse_single_name()?),
            "execute" => CommandKind::Execute(self.parse_single_name()?),
            _ => return Err(self.error_at(start, &format!("unknown command: {keyword}"))),
        };

        Ok(Command {
            kind,
            span: start.to(self.previous),
        })
    }

    /// Parses `{ name name ... }`, possibly empty.
    fn parse_name_list(&mut self) -> Result<Vec<String>> {
        self.expect(&TokenKind::LBrace)?;
        let mut names = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::Word(name) => {
                    names.push(name.to_lowercase());
                    self.advance();
                }
                TokenKind::RBrace => {
                    self.advance();
                    return Ok(names);
                }
                _ => {
                    return Err(self.error(&format!(
                        "expected identifier or '}}', found {}",
                        self.found()
                    )));
                }
            }
        }
    }

    /// Parses `{ name }`.
    fn parse_single_name(&mut self) -> Result<String> {
        self.expect(&TokenKind::LBrace)?;
        let name = match &self.current.kind {
            TokenKind::Word(name) => name.to_lowercase(),
            _ => {
                return Err(self.error(&format!("expected identifier, found {}", self.found())));
            }
        };
        self.advance();
        self.expect(&TokenKind::RBrace)?;
        Ok(name)
    }

    /// Parses `{ "text" }`.
    fn parse_macro_text(&mut self) -> Result<String> {
        self.expect(&TokenKind::LBrace)?;
        let text = match &self.current.kind {
            TokenKind::Text(text) => text.clone(),
            _ => {
                return Err(self.error(&format!("expected string, found {}", self.found())));
            }
        };
        self.advance();
        self.expect(&TokenKind::RBrace)?;
        Ok(text)
    }

    /// Parses a braced block body.
    fn parse_block(&mut self) -> Result<Block> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let block = self.parse_block_body();
        self.depth -= 1;
        block
    }

    fn parse_block_body(&mut self) -> Result<Block> {
        let start = self.current.span;
        self.expect(&TokenKind::LBrace)?;
        let mut items = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::RBrace => {
                    self.advance();
                    return Ok(Block::new(items, start.to(self.previous)));
                }
                TokenKind::Eof => return Err(self.error_at(start, "unterminated block")),
                _ => items.push(self.parse_item()?),
            }
        }
    }

    /// Parses one block item.
    fn parse_item(&mut self) -> Result<Item> {
        let span = self.current.span;
        let item = match &self.current.kind {
            TokenKind::Integer(n) => Item::Integer(*n, span),
            TokenKind::Text(text) => Item::Text(text.clone(), span),
            TokenKind::Quote(name) => Item::Quote(name.to_lowercase(), span),
            TokenKind::Word(name) => Item::Identifier(name.to_lowercase(), span),
            TokenKind::LBrace => return Ok(Item::Block(self.parse_block()?)),
            TokenKind::Error(message) => return Err(self.error(message)),
            _ => {
                return Err(self.error(&format!("expected block item, found {}", self.found())));
            }
        };
        self.advance();
        Ok(item)
    }

    /// Advances to the next significant token, skipping comments.
    fn advance(&mut self) {
        self.previous = self.current.span;
        self.current = self.lexer.next_token();
        while self.current.kind.is_trivia() {
            self.current = self.lexer.next_token();
        }
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<()> {
        let matches =
            std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected);

        if matches {
            self.advance();
            Ok(())
        } else if let TokenKind::Error(message) = &self.current.kind {
            Err(self.error(message))
        } else {
            Err(self.error(&format!(
                "expected {}, found {}",
                expected.name(),
                self.found()
            )))
        }
    }

    /// Describes the current token for error messages, quoting its source.
    fn found(&self) -> String {
        let name = self.current.kind.name();
        match (&self.current.kind, self.current.text(self.source)) {
            (TokenKind::LBrace | TokenKind::RBrace | TokenKind::Eof, _) | (_, "") => {
                name.to_string()
            }
            (_, text) => format!("{name} `{text}`"),
        }
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    /// Creates a parse error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::parse(
            message,
            span.line,
            span.column,
            span.line_text(self.source).to_string(),
        )
    }
}

/// Parses a style file.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse(source: &str) -> Result<Style> {
    Parser::new(source).parse_style()
}

/// Parses a bare sequence of block items.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse_items(source: &str) -> Result<Vec<Item>> {
    Parser::new(source).parse_items()
}
