//! Token types produced by the rule tokenizer.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// The type of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Dot,
    Colon,
    Semicolon,
    Minus,
    Plus,
    Slash,
    Star,
    Backslash,
    At,
    Tilde,
    Bang,
    Equal,
    Greater,
    Less,
    BangEqual,
    EqualEqual,
    GreaterEqual,
    LessEqual,
    Identifier,
    String,
    Number,
    Whitespace,
    /// Sentinel closing every token list.
    EndOfInput,
}

impl TokenKind {
    /// Maps a single punctuation character to its token kind.
    pub(crate) fn from_punctuation(c: char) -> Option<TokenKind> {
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            '/' => TokenKind::Slash,
            '*' => TokenKind::Star,
            '\\' => TokenKind::Backslash,
            '@' => TokenKind::At,
            '~' => TokenKind::Tilde,
            '!' => TokenKind::Bang,
            '=' => TokenKind::Equal,
            '>' => TokenKind::Greater,
            '<' => TokenKind::Less,
            _ => return None,
        };
        Some(kind)
    }

    /// Human readable name used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Minus => "'-'",
            TokenKind::Plus => "'+'",
            TokenKind::Slash => "'/'",
            TokenKind::Star => "'*'",
            TokenKind::Backslash => "'\\'",
            TokenKind::At => "'@'",
            TokenKind::Tilde => "'~'",
            TokenKind::Bang => "'!'",
            TokenKind::Equal => "'='",
            TokenKind::Greater => "'>'",
            TokenKind::Less => "'<'",
            TokenKind::BangEqual => "'!='",
            TokenKind::EqualEqual => "'=='",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::LessEqual => "'<='",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Whitespace => "whitespace",
            TokenKind::EndOfInput => "end of input",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.describe())
    }
}

/// The decoded value of a string or number token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Contents of a string, without the quotes.
    String(String),
    Integer(i64),
    Float(f64),
}

/// A token with its byte range and 1-based line in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub literal: Option<Literal>,
}

impl Token {
    /// The exact source text of this token.
    pub fn lexeme<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end).unwrap_or_default()
    }
}
