// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Simple-query classification.
//!
//! A query is *simple* when it is a single-table `SELECT` with at most one
//! `WHERE` predicate comparing a column to a literal or placeholder. Anything
//! the grammar below does not recognize is classified complex, so ambiguous
//! input goes to the expert instead of receiving a wrong local answer.
//!
//! ```text
//! query      := SELECT items FROM table [WHERE predicate] [LIMIT n [(OFFSET | ,) n]] [;]*
//! items      := item (',' item)*
//! item       := '*' | path ['.' '*'] [[AS] alias]
//! table      := path [[AS] alias]
//! predicate  := operand cmp operand      -- exactly one side is a column
//! operand    := path | literal | placeholder
//! ```

use serde::Serialize;
use tracing::debug;

use crate::lexer::{tokenize, Token};

/// Result of classifying one query.
///
/// `where_columns` is non-empty only for simple queries that have a `WHERE`
/// clause. The constructors are the only way to build a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationVerdict {
    is_simple: bool,
    where_columns: Vec<String>,
    #[serde(skip)]
    reason: &'static str,
}

impl ClassificationVerdict {
    fn simple(where_columns: Vec<String>) -> Self {
        let reason = if where_columns.is_empty() {
            "single-table SELECT without WHERE clause"
        } else {
            "single-table SELECT with one comparison predicate"
        };
        Self {
            is_simple: true,
            where_columns,
            reason,
        }
    }

    fn complex(reason: &'static str) -> Self {
        Self {
            is_simple: false,
            where_columns: Vec::new(),
            reason,
        }
    }

    pub fn is_simple(&self) -> bool {
        self.is_simple
    }

    /// Bare column names from the `WHERE` predicate, in extraction order.
    pub fn where_columns(&self) -> &[String] {
        &self.where_columns
    }

    /// Human-readable reason for the verdict.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// Keywords whose presence anywhere in the query rules out the simple path.
const COMPLEX_KEYWORDS: &[(&str, &str)] = &[
    ("join", "JOIN"),
    ("union", "set operation"),
    ("intersect", "set operation"),
    ("except", "set operation"),
    ("group", "GROUP BY"),
    ("order", "ORDER BY"),
    ("having", "HAVING"),
    ("over", "window function"),
    ("window", "window function"),
    ("with", "common table expression"),
    ("exists", "EXISTS subquery"),
    ("distinct", "DISTINCT"),
    ("into", "SELECT INTO"),
];

/// Words that can never be a column, table or alias name here.
const RESERVED: &[&str] = &[
    "select", "from", "where", "as", "and", "or", "not", "in", "is", "null", "like", "ilike",
    "between", "limit", "offset", "by", "on", "using", "all", "any", "some", "case", "when",
    "then", "else", "end", "true", "false", "inner", "left", "right", "full", "outer", "cross",
    "natural", "lateral", "values", "fetch", "for", "escape", "similar", "regexp", "rlike",
    "collate", "interval", "cast",
];

fn is_reserved(word: &str) -> bool {
    RESERVED.iter().any(|r| word.eq_ignore_ascii_case(r))
        || COMPLEX_KEYWORDS
            .iter()
            .any(|(k, _)| word.eq_ignore_ascii_case(k))
}

/// Classify a query as simple or complex.
///
/// Never fails: input that cannot be tokenized is classified complex.
pub fn classify(query: &str) -> ClassificationVerdict {
    let tokens = match tokenize(query) {
        Ok(tokens) => tokens,
        Err(err) => {
            debug!(error = %err, "query could not be tokenized");
            return ClassificationVerdict::complex("malformed input");
        }
    };

    let verdict = match check_simple(&tokens) {
        Ok(columns) => ClassificationVerdict::simple(columns),
        Err(reason) => ClassificationVerdict::complex(reason),
    };

    debug!(
        is_simple = verdict.is_simple,
        columns = ?verdict.where_columns,
        reason = verdict.reason,
        "query classified"
    );
    verdict
}

type Check<T> = Result<T, &'static str>;

fn check_simple(tokens: &[Token]) -> Check<Vec<String>> {
    let tokens = strip_trailing_semicolons(tokens);
    if tokens.is_empty() {
        return Err("empty statement");
    }
    if tokens.contains(&Token::Semicolon) {
        return Err("multiple statements");
    }

    screen_keywords(tokens)?;

    let mut cursor = Cursor { tokens, pos: 0 };
    cursor.parse_select()
}

fn strip_trailing_semicolons(tokens: &[Token]) -> &[Token] {
    let mut end = tokens.len();
    while end > 0 && tokens[end - 1] == Token::Semicolon {
        end -= 1;
    }
    &tokens[..end]
}

/// Clause counts and disqualifying keywords, checked before parsing.
fn screen_keywords(tokens: &[Token]) -> Check<()> {
    let count = |kw: &str| tokens.iter().filter(|t| t.is_keyword(kw)).count();

    match count("select") {
        0 => return Err("not a SELECT statement"),
        1 => {}
        _ => return Err("nested or compound SELECT"),
    }

    for token in tokens {
        if let Token::Word(word) = token {
            if let Some(&(_, reason)) = COMPLEX_KEYWORDS
                .iter()
                .find(|(k, _)| word.eq_ignore_ascii_case(k))
            {
                return Err(reason);
            }
        }
    }

    match count("from") {
        0 => return Err("missing FROM clause"),
        1 => {}
        _ => return Err("multiple FROM clauses"),
    }

    if count("where") > 1 {
        return Err("multiple WHERE clauses");
    }

    Ok(())
}

/// One side of a comparison.
enum Operand {
    Column(String),
    Value,
}

struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Cursor<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn peek_second(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos + 1)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Next token as an identifier (bare non-reserved word or quoted).
    fn peek_ident(&self) -> Option<&'t str> {
        match self.peek()? {
            Token::Word(w) if !is_reserved(w) => Some(w.as_str()),
            Token::QuotedIdent(q) => Some(q.as_str()),
            _ => None,
        }
    }

    fn parse_select(&mut self) -> Check<Vec<String>> {
        if !self.eat_keyword("select") {
            return Err("statement does not start with SELECT");
        }

        self.parse_select_items()?;

        if !self.eat_keyword("from") {
            return Err("unsupported select list");
        }
        self.parse_table()?;

        let columns = if self.eat_keyword("where") {
            vec![self.parse_predicate()?]
        } else {
            Vec::new()
        };

        if self.eat_keyword("limit") {
            self.parse_limit()?;
        }

        match self.peek() {
            None => Ok(columns),
            Some(t) if t.is_keyword("and") || t.is_keyword("or") => {
                Err("multiple predicates combined with AND/OR")
            }
            Some(Token::LParen) => Err("function call or subquery"),
            Some(_) => Err("unsupported trailing clause"),
        }
    }

    fn parse_select_items(&mut self) -> Check<()> {
        loop {
            self.parse_select_item()?;
            if !self.eat(&Token::Comma) {
                return Ok(());
            }
        }
    }

    fn parse_select_item(&mut self) -> Check<()> {
        if self.eat(&Token::Star) {
            return Ok(());
        }

        if self.peek_ident().is_none() {
            return Err(match self.peek() {
                Some(Token::LParen) => "subquery or expression in select list",
                Some(t) if t.is_keyword("case") => "CASE expression in select list",
                None => "empty select list",
                Some(_) => "unsupported select list",
            });
        }

        // `t.*` ends the item; otherwise a plain column path.
        loop {
            self.advance();
            if !self.eat(&Token::Dot) {
                break;
            }
            if self.eat(&Token::Star) {
                return Ok(());
            }
            if self.peek_ident().is_none() {
                return Err("unsupported select list");
            }
        }

        if self.peek() == Some(&Token::LParen) {
            return Err("function call in select list");
        }

        self.parse_optional_alias()
    }

    fn parse_table(&mut self) -> Check<()> {
        match self.peek() {
            Some(Token::LParen) => return Err("subquery in FROM"),
            None => return Err("FROM does not name a table"),
            _ => {}
        }
        self.parse_path().ok_or("FROM does not name a table")?;

        if self.peek() == Some(&Token::LParen) {
            return Err("table-valued function in FROM");
        }

        self.parse_optional_alias()?;

        if self.peek() == Some(&Token::Comma) {
            return Err("multiple tables in FROM");
        }
        Ok(())
    }

    fn parse_optional_alias(&mut self) -> Check<()> {
        if self.eat_keyword("as") {
            if self.peek_ident().is_none() {
                return Err("missing alias after AS");
            }
            self.advance();
        } else if self.peek_ident().is_some() {
            self.advance();
        }
        Ok(())
    }

    /// `ident ('.' ident)*`, returning the last component.
    fn parse_path(&mut self) -> Option<&'t str> {
        let mut last = self.peek_ident()?;
        self.advance();
        while self.peek() == Some(&Token::Dot) {
            self.advance();
            last = self.peek_ident()?;
            self.advance();
        }
        Some(last)
    }

    fn parse_predicate(&mut self) -> Check<String> {
        let left = self.parse_operand()?;

        match self.peek() {
            Some(Token::Cmp(_)) => {
                self.advance();
            }
            Some(t) if ["like", "ilike", "in", "between", "is", "similar", "regexp", "rlike"]
                .iter()
                .any(|kw| t.is_keyword(kw)) =>
            {
                return Err("non-comparison predicate");
            }
            Some(t) if t.is_keyword("not") => return Err("boolean combinator in WHERE clause"),
            Some(t) if t.is_keyword("and") || t.is_keyword("or") => {
                return Err("boolean combinator in WHERE clause")
            }
            None => return Err("incomplete WHERE clause"),
            Some(_) => return Err("unsupported predicate"),
        }

        let right = self.parse_operand()?;

        match (left, right) {
            (Operand::Column(column), Operand::Value) | (Operand::Value, Operand::Column(column)) => {
                Ok(column)
            }
            (Operand::Column(_), Operand::Column(_)) => Err("column compared to another column"),
            (Operand::Value, Operand::Value) => Err("predicate does not reference a column"),
        }
    }

    fn parse_operand(&mut self) -> Check<Operand> {
        let Some(token) = self.peek() else {
            return Err("incomplete WHERE clause");
        };

        match token {
            Token::StringLit(_) | Token::Number(_) | Token::Placeholder(_) => {
                self.advance();
                Ok(Operand::Value)
            }
            Token::Punct('-' | '+') if matches!(self.peek_second(), Some(Token::Number(_))) => {
                self.pos += 2;
                Ok(Operand::Value)
            }
            t if t.is_keyword("true") || t.is_keyword("false") || t.is_keyword("null") => {
                self.advance();
                Ok(Operand::Value)
            }
            t if t.is_keyword("not") => Err("boolean combinator in WHERE clause"),
            Token::LParen => Err("subquery or parenthesized expression in WHERE clause"),
            Token::Word(_) | Token::QuotedIdent(_) => {
                let column = self
                    .parse_path()
                    .ok_or("unsupported expression in WHERE clause")?;
                if self.peek() == Some(&Token::LParen) {
                    return Err("function call in WHERE clause");
                }
                Ok(Operand::Column(column.to_string()))
            }
            _ => Err("unsupported expression in WHERE clause"),
        }
    }

    fn parse_limit(&mut self) -> Check<()> {
        self.parse_limit_value()?;
        if self.eat_keyword("offset") || self.eat(&Token::Comma) {
            self.parse_limit_value()?;
        }
        Ok(())
    }

    fn parse_limit_value(&mut self) -> Check<()> {
        match self.advance() {
            Some(Token::Number(_) | Token::Placeholder(_)) => Ok(()),
            _ => Err("unsupported LIMIT clause"),
        }
    }
}
