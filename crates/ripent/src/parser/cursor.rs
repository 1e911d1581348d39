//! A cursor over tokenized rule source.

use super::error::{LexError, ParseError};
use super::lexer::tokenize;
use super::token::{Literal, Token, TokenKind};

/// Walks a token list produced by [`tokenize`].
///
/// The cursor never moves past the end-of-input sentinel, so `current` is
/// always valid. `position` and `jump_to` allow the same token range to be
/// scanned more than once.
#[derive(Debug, Clone)]
pub struct TokenCursor<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    index: usize,
}

impl<'s> TokenCursor<'s> {
    /// Tokenize `source` and position the cursor on the first token.
    pub fn from_source(source: &'s str, include_whitespace: bool) -> Result<Self, LexError> {
        Ok(Self::new(source, tokenize(source, include_whitespace)?))
    }

    /// Wrap an existing token list. A missing end-of-input sentinel is added.
    pub fn new(source: &'s str, mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EndOfInput) {
            let line = tokens.last().map_or(1, |token| token.line);
            tokens.push(Token {
                kind: TokenKind::EndOfInput,
                start: source.len(),
                end: source.len(),
                line,
                literal: None,
            });
        }
        Self {
            source,
            tokens,
            index: 0,
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.index.min(last)]
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::EndOfInput
    }

    /// Move to the next token. Has no effect on the sentinel.
    pub fn advance(&mut self) {
        if !self.is_at_end() {
            self.index += 1;
        }
    }

    pub fn position(&self) -> usize {
        self.index
    }

    /// Return to a position previously obtained from [`TokenCursor::position`].
    pub fn jump_to(&mut self, index: usize) {
        self.index = index.min(self.tokens.len() - 1);
    }

    /// Source text of a token.
    pub fn lexeme(&self, token: &Token) -> &'s str {
        token.lexeme(self.source)
    }

    /// Require the current token to be of `kind`, optionally consuming it.
    pub fn expect(&mut self, kind: TokenKind, advance: bool) -> Result<Token, ParseError> {
        let token = self.current().clone();
        if token.kind != kind {
            return Err(self.unexpected(&format!("expected {kind}")));
        }
        if advance {
            self.advance();
        }
        Ok(token)
    }

    pub fn read_identifier(&mut self) -> Result<&'s str, ParseError> {
        let token = self.expect(TokenKind::Identifier, true)?;
        Ok(self.lexeme(&token))
    }

    /// Read a string token, returning its contents without the quotes.
    pub fn read_string(&mut self) -> Result<String, ParseError> {
        let token = self.expect(TokenKind::String, true)?;
        match token.literal {
            Some(Literal::String(contents)) => Ok(contents),
            Some(Literal::Integer(_) | Literal::Float(_)) | None => {
                Ok(self.lexeme(&token).trim_matches('"').to_string())
            }
        }
    }

    /// Read an integer, accepting a leading `-`.
    pub fn read_integer(&mut self) -> Result<i64, ParseError> {
        let start = self.position();
        let negative = self.consume_minus();
        let token = self.current().clone();
        match (token.kind, token.literal) {
            (TokenKind::Number, Some(Literal::Integer(value))) => {
                self.advance();
                Ok(if negative { -value } else { value })
            }
            _ => {
                let error = self.unexpected("expected integer");
                self.jump_to(start);
                Err(error)
            }
        }
    }

    /// Read a number as `f64`, accepting a leading `-`.
    pub fn read_float(&mut self) -> Result<f64, ParseError> {
        let start = self.position();
        let negative = self.consume_minus();
        let token = self.current().clone();
        let value = match (token.kind, token.literal) {
            (TokenKind::Number, Some(Literal::Float(value))) => value,
            (TokenKind::Number, Some(Literal::Integer(value))) => value as f64,
            _ => {
                let error = self.unexpected("expected number");
                self.jump_to(start);
                return Err(error);
            }
        };
        self.advance();
        Ok(if negative { -value } else { value })
    }

    /// A syntax error located at the current token.
    pub fn unexpected(&self, message: &str) -> ParseError {
        let token = self.current();
        let found = match token.kind {
            TokenKind::EndOfInput => token.kind.describe().to_string(),
            _ => format!("'{}'", self.lexeme(token)),
        };
        ParseError::Syntax {
            line: token.line,
            offset: token.start,
            message: format!("{message}, found {found}"),
        }
    }

    fn consume_minus(&mut self) -> bool {
        let negative = self.peek_kind() == TokenKind::Minus;
        if negative {
            self.advance();
        }
        negative
    }
}
