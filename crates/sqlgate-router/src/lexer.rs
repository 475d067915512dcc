// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tokenizer for the simple-query classifier.
//!
//! Only as much SQL lexing as the classifier needs: words, quoted
//! identifiers, literals, placeholders, comparison operators, and
//! punctuation. Whitespace and comments (`-- ...`, `# ...`, `/* ... */`) are
//! dropped.

use thiserror::Error;

/// Comparison operators accepted in a simple predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

/// A lexical token. Word and identifier text keeps its original case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Bare identifier or keyword.
    Word(String),
    /// `"name"`, `` `name` `` or `[name]`, with the quotes removed.
    QuotedIdent(String),
    /// Single-quoted string literal, unescaped.
    StringLit(String),
    Number(String),
    /// `?`, `?1`, `$1`, `:name`, `@name`.
    Placeholder(String),
    Cmp(CmpOp),
    Comma,
    Dot,
    LParen,
    RParen,
    Star,
    Semicolon,
    /// Any other ASCII operator character (`+`, `-`, `/`, `%`, `|`, ...).
    Punct(char),
}

impl Token {
    /// True if this is a bare word equal to `keyword`, ignoring ASCII case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(w) if w.eq_ignore_ascii_case(keyword))
    }
}

/// Input that cannot be tokenized at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error("query is empty")]
    Empty,

    #[error("unterminated string literal starting at byte {0}")]
    UnterminatedString(usize),

    #[error("unterminated quoted identifier starting at byte {0}")]
    UnterminatedIdentifier(usize),

    #[error("unterminated block comment starting at byte {0}")]
    UnterminatedComment(usize),

    #[error("unexpected character {ch:?} at byte {offset}")]
    UnexpectedChar { ch: char, offset: usize },
}

/// Tokenize `source`. Comment-only or blank input is [`MalformedInput::Empty`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, MalformedInput> {
    let mut lexer = Lexer { src: source, pos: 0 };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    if tokens.is_empty() {
        return Err(MalformedInput::Empty);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    src: &'a str,
    /// Byte offset, always on a char boundary.
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &src[start..self.pos]
    }

    fn next_token(&mut self) -> Result<Option<Token>, MalformedInput> {
        self.skip_whitespace_and_comments()?;

        let start = self.pos;
        let Some(ch) = self.peek() else {
            return Ok(None);
        };

        let token = match ch {
            '\'' => self.lex_string(start)?,
            '"' => self.lex_quoted_ident(start, '"')?,
            '`' => self.lex_quoted_ident(start, '`')?,
            '[' => self.lex_quoted_ident(start, ']')?,
            '0'..='9' => self.lex_number(),
            '.' if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => self.lex_number(),
            c if is_ident_start(c) => Token::Word(self.bump_while(is_ident_continue).to_string()),
            '?' => {
                self.bump();
                let digits = self.bump_while(|c| c.is_ascii_digit());
                Token::Placeholder(format!("?{digits}"))
            }
            '$' | ':' | '@' => self.lex_prefixed_placeholder(ch),
            '=' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                }
                Token::Cmp(CmpOp::Eq)
            }
            '<' => {
                self.bump();
                match self.peek() {
                    Some('=') => {
                        self.bump();
                        Token::Cmp(CmpOp::LtEq)
                    }
                    Some('>') => {
                        self.bump();
                        Token::Cmp(CmpOp::NotEq)
                    }
                    _ => Token::Cmp(CmpOp::Lt),
                }
            }
            '>' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    Token::Cmp(CmpOp::GtEq)
                } else {
                    Token::Cmp(CmpOp::Gt)
                }
            }
            '!' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    Token::Cmp(CmpOp::NotEq)
                } else {
                    Token::Punct('!')
                }
            }
            ',' => self.single(Token::Comma),
            '.' => self.single(Token::Dot),
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            '*' => self.single(Token::Star),
            ';' => self.single(Token::Semicolon),
            '+' | '-' | '/' | '%' | '|' | '&' | '^' | '~' | ']' | '{' | '}' => {
                self.bump();
                Token::Punct(ch)
            }
            other => {
                return Err(MalformedInput::UnexpectedChar {
                    ch: other,
                    offset: start,
                })
            }
        };

        Ok(Some(token))
    }

    fn single(&mut self, token: Token) -> Token {
        self.bump();
        token
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), MalformedInput> {
        loop {
            self.bump_while(char::is_whitespace);
            match (self.peek(), self.peek_second()) {
                (Some('-'), Some('-')) | (Some('#'), _) => {
                    self.bump_while(|c| c != '\n');
                }
                (Some('/'), Some('*')) => {
                    let start = self.pos;
                    self.pos += 2;
                    match self.src[self.pos..].find("*/") {
                        Some(end) => self.pos += end + 2,
                        None => return Err(MalformedInput::UnterminatedComment(start)),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// `'...'` with `''` and backslash escapes.
    fn lex_string(&mut self, start: usize) -> Result<Token, MalformedInput> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(MalformedInput::UnterminatedString(start)),
                Some('\'') if self.peek() == Some('\'') => {
                    self.bump();
                    value.push('\'');
                }
                Some('\'') => return Ok(Token::StringLit(value)),
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(MalformedInput::UnterminatedString(start)),
                },
                Some(c) => value.push(c),
            }
        }
    }

    /// Quoted identifier; a doubled closing quote is an escaped quote.
    fn lex_quoted_ident(&mut self, start: usize, close: char) -> Result<Token, MalformedInput> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(MalformedInput::UnterminatedIdentifier(start)),
                Some(c) if c == close && self.peek() == Some(close) => {
                    self.bump();
                    value.push(close);
                }
                Some(c) if c == close => return Ok(Token::QuotedIdent(value)),
                Some(c) => value.push(c),
            }
        }
    }

    fn lex_number(&mut self) -> Token {
        let start = self.pos;
        self.bump_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.bump();
            self.bump_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let exp_digit_at = match self.peek_second() {
                Some('+' | '-') => 2,
                _ => 1,
            };
            let has_digit = self.src[self.pos..]
                .chars()
                .nth(exp_digit_at)
                .is_some_and(|c| c.is_ascii_digit());
            if has_digit {
                self.pos += exp_digit_at;
                self.bump_while(|c| c.is_ascii_digit());
            }
        }
        Token::Number(self.src[start..self.pos].to_string())
    }

    /// `$1`, `$name`, `:name`, `@name`. A bare sigil is punctuation
    /// (e.g. the `::` cast operator).
    fn lex_prefixed_placeholder(&mut self, sigil: char) -> Token {
        self.bump();
        let name = self.bump_while(is_ident_continue);
        if name.is_empty() {
            Token::Punct(sigil)
        } else {
            Token::Placeholder(format!("{sigil}{name}"))
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
