//! Error and warning types for rule application.

use std::io::Error as IoError;
use std::path::PathBuf;

use ripent_semantics::ActionKind;
use thiserror::Error;

use crate::parser::ParseError;

/// A rule failed while being applied. Aborts the whole application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (rule block on line {line})")]
pub struct RuleError {
    pub kind: RuleErrorKind,
    /// Line of the failing block.
    pub line: usize,
    /// Byte offset of the failing block's opening brace.
    pub offset: usize,
}

/// What went wrong while applying a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleErrorKind {
    #[error("'{action}' needs key '{key}', which the record does not have")]
    MissingKey { action: ActionKind, key: String },

    #[error("'{action}' cannot add key '{key}', which the record already has")]
    KeyExists { action: ActionKind, key: String },

    #[error("template references key '{key}', which the record does not have")]
    UndefinedKey { key: String },

    #[error("template references undefined global '{name}'")]
    UndefinedGlobal { name: String },

    #[error("template resolved to nothing")]
    EmptyTemplate,

    #[error("'{action}' value '{pattern}' is not a bit value, expected 'b' and six binary digits")]
    InvalidBitPattern { action: ActionKind, pattern: String },

    #[error("'{action}' target '{key}' holds '{value}', which is not a bitfield")]
    NotBitfield {
        action: ActionKind,
        key: String,
        value: String,
    },

    #[error("'{action}' value '{value}' is not numeric")]
    NotNumeric { action: ActionKind, value: String },

    #[error("'div' of key '{key}' by zero")]
    DivisionByZero { key: String },
}

impl RuleErrorKind {
    pub(crate) fn at(self, line: usize, offset: usize) -> RuleError {
        RuleError {
            kind: self,
            line,
            offset,
        }
    }
}

/// Errors that occur while loading a rule file from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the rule file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// Parse error, with the file contents for diagnostics.
    #[error("{path}: {error}")]
    Parse {
        path: PathBuf,
        content: String,
        #[source]
        error: ParseError,
    },
}

/// A condition worth reporting that does not stop rule application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleWarning {
    /// `new-entity` replaced a `classname` the record already had.
    #[error("'new-entity' replaced classname '{previous}' with '{classname}' (rule block on line {line})")]
    ClassnameOverwritten {
        previous: String,
        classname: String,
        line: usize,
    },
}
