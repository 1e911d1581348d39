//! Error types for tokenizing and parsing rule files.

use ripent_semantics::ActionKind;
use thiserror::Error;

/// An error raised while splitting source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{character}' on line {line}")]
    UnexpectedCharacter {
        character: char,
        offset: usize,
        line: usize,
    },

    #[error("unterminated string starting on line {line}")]
    UnterminatedString { offset: usize, line: usize },

    /// A number literal that does not fit in 64 bits.
    #[error("invalid number '{text}' on line {line}")]
    InvalidNumber {
        text: String,
        offset: usize,
        line: usize,
    },
}

impl LexError {
    /// Byte offset of the offending character.
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { offset, .. }
            | LexError::UnterminatedString { offset, .. }
            | LexError::InvalidNumber { offset, .. } => *offset,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. }
            | LexError::UnterminatedString { line, .. }
            | LexError::InvalidNumber { line, .. } => *line,
        }
    }
}

/// A structural error in a rule file.
///
/// Every variant except [`ParseError::Empty`] carries the line and byte
/// offset of the token or block at fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("syntax error on line {line}: {message}")]
    Syntax {
        line: usize,
        offset: usize,
        message: String,
    },

    #[error("unknown pre-block keyword '{keyword}' on line {line}, expected 'map'")]
    UnknownPreBlockKeyword {
        keyword: String,
        line: usize,
        offset: usize,
    },

    #[error("unknown keyword '{keyword}' on line {line}{}", suggestion_hint(suggestions))]
    UnknownKeyword {
        keyword: String,
        line: usize,
        offset: usize,
        suggestions: Vec<String>,
    },

    #[error(
        "keyword '{keyword}' on line {line} is not allowed in a block containing '{trigger}'"
    )]
    ForbiddenKeyword {
        keyword: String,
        trigger: ActionKind,
        line: usize,
        offset: usize,
    },

    #[error("block on line {line} contains both 'new-entity' and 'remove-entity'")]
    ConflictingBlockKind { line: usize, offset: usize },

    #[error("block on line {line} needs at least one selector and one action")]
    MissingSelectorOrAction { line: usize, offset: usize },

    #[error("block on line {line} contains 'remove-entity' but no selector")]
    MissingSelector { line: usize, offset: usize },

    #[error("invalid template on line {line}: {message}")]
    Template {
        line: usize,
        offset: usize,
        message: String,
    },

    #[error("rule source contains no rule blocks")]
    Empty,
}

impl ParseError {
    /// Byte offset into the rule source, when the error has a location.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Lex(error) => Some(error.offset()),
            ParseError::Syntax { offset, .. }
            | ParseError::UnknownPreBlockKeyword { offset, .. }
            | ParseError::UnknownKeyword { offset, .. }
            | ParseError::ForbiddenKeyword { offset, .. }
            | ParseError::ConflictingBlockKind { offset, .. }
            | ParseError::MissingSelectorOrAction { offset, .. }
            | ParseError::MissingSelector { offset, .. }
            | ParseError::Template { offset, .. } => Some(*offset),
            ParseError::Empty => None,
        }
    }

    /// 1-based source line, when the error has a location.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Lex(error) => Some(error.line()),
            ParseError::Syntax { line, .. }
            | ParseError::UnknownPreBlockKeyword { line, .. }
            | ParseError::UnknownKeyword { line, .. }
            | ParseError::ForbiddenKeyword { line, .. }
            | ParseError::ConflictingBlockKind { line, .. }
            | ParseError::MissingSelectorOrAction { line, .. }
            | ParseError::MissingSelector { line, .. }
            | ParseError::Template { line, .. } => Some(*line),
            ParseError::Empty => None,
        }
    }
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// A malformed substitution in a value template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at position {position}")]
pub struct TemplateError {
    /// Byte position within the template text.
    pub position: usize,
    pub message: String,
}
