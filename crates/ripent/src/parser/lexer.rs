//! Rule source tokenizer using winnow.
//!
//! Produces a flat token list terminated by an [`TokenKind::EndOfInput`]
//! sentinel. Comments (`//` and `#` to end of line) are dropped. Newlines
//! only advance the line counter; other whitespace becomes a
//! [`TokenKind::Whitespace`] token when requested.

use super::error::LexError;
use super::token::{Literal, Token, TokenKind};
use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited, opt, repeat};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_till, take_while};

/// Tokenize `source`.
///
/// # Example
///
/// ```
/// use ripent::parser::{TokenKind, tokenize};
///
/// let tokens = tokenize("map a { have classname }", false).unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::Identifier,
///         TokenKind::Identifier,
///         TokenKind::LeftBrace,
///         TokenKind::Identifier,
///         TokenKind::Identifier,
///         TokenKind::RightBrace,
///         TokenKind::EndOfInput,
///     ]
/// );
/// ```
pub fn tokenize(source: &str, include_whitespace: bool) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut remaining = source;
    let mut line = 1;

    while !remaining.is_empty() {
        let start = source.len() - remaining.len();
        let before = remaining;
        let Ok(raw) = raw_token(&mut remaining) else {
            return Err(lex_failure(before, start, line));
        };
        let end = source.len() - remaining.len();

        let (kind, literal) = match raw {
            Raw::Newline => {
                line += 1;
                continue;
            }
            Raw::Comment => continue,
            Raw::Blank if include_whitespace => (TokenKind::Whitespace, None),
            Raw::Blank => continue,
            Raw::Identifier => (TokenKind::Identifier, None),
            Raw::Punct(kind) => (kind, None),
            Raw::Number(text) => (TokenKind::Number, Some(number_literal(text, start, line)?)),
            Raw::String(contents) => (
                TokenKind::String,
                Some(Literal::String(contents.to_string())),
            ),
        };

        tokens.push(Token {
            kind,
            start,
            end,
            line,
            literal,
        });

        // Strings may span lines; the token keeps its starting line.
        if kind == TokenKind::String {
            line += before[..end - start].matches('\n').count();
        }
    }

    tokens.push(Token {
        kind: TokenKind::EndOfInput,
        start: source.len(),
        end: source.len(),
        line,
        literal: None,
    });
    Ok(tokens)
}

/// Characters that may start an identifier.
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Characters that may continue an identifier.
pub(crate) fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Raw lexeme before it is turned into a token.
#[derive(Debug, Clone)]
enum Raw<'i> {
    Newline,
    Blank,
    Comment,
    Identifier,
    Punct(TokenKind),
    Number(&'i str),
    String(&'i str),
}

fn raw_token<'i>(input: &mut &'i str) -> ModalResult<Raw<'i>> {
    alt((
        '\n'.value(Raw::Newline),
        take_while(1.., |c: char| c.is_whitespace() && c != '\n').value(Raw::Blank),
        line_comment.value(Raw::Comment),
        string_literal.map(Raw::String),
        number.map(Raw::Number),
        identifier.value(Raw::Identifier),
        punctuation.map(Raw::Punct),
    ))
    .parse_next(input)
}

/// Parse a line comment: `// ...` or `# ...` up to (not including) the newline.
fn line_comment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (alt(("//", "#")), take_till(0.., '\n'))
        .take()
        .parse_next(input)
}

/// Parse a string literal, returning its contents without quotes.
fn string_literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited('"', take_till(0.., '"'), '"').parse_next(input)
}

/// Parse `digits` or `digits.digits`.
fn number<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (digit1, opt(('.', digit1))).take().parse_next(input)
}

/// Parse an identifier. A `-` belongs to the identifier only when another
/// identifier character follows it.
pub(crate) fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(is_ident_start),
        take_while(0.., is_ident_cont),
        hyphen_suffixes,
    )
        .take()
        .parse_next(input)
}

fn hyphen_suffixes(input: &mut &str) -> ModalResult<()> {
    repeat(0.., ('-', take_while(1.., is_ident_cont)).void()).parse_next(input)
}

/// Parse a one or two character punctuation token.
fn punctuation(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        "!=".value(TokenKind::BangEqual),
        "==".value(TokenKind::EqualEqual),
        ">=".value(TokenKind::GreaterEqual),
        "<=".value(TokenKind::LessEqual),
        any.verify_map(TokenKind::from_punctuation),
    ))
    .parse_next(input)
}

fn number_literal(text: &str, offset: usize, line: usize) -> Result<Literal, LexError> {
    let invalid = || LexError::InvalidNumber {
        text: text.to_string(),
        offset,
        line,
    };
    if text.contains('.') {
        text.parse::<f64>()
            .map(Literal::Float)
            .map_err(|_| invalid())
    } else {
        text.parse::<i64>()
            .map(Literal::Integer)
            .map_err(|_| invalid())
    }
}

/// Classify why no token could be read at `rest`.
fn lex_failure(rest: &str, offset: usize, line: usize) -> LexError {
    match rest.chars().next() {
        Some('"') => LexError::UnterminatedString { offset, line },
        other => LexError::UnexpectedCharacter {
            character: other.unwrap_or('\0'),
            offset,
            line,
        },
    }
}
