//! Miette diagnostic wrapper for rule parse and runtime errors.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use ripent::{ParseError, RuleError};
use thiserror::Error;

/// A miette-compatible diagnostic pointing into a rule file.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(ripent::rules))]
pub struct RuleDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl RuleDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let offset = err.offset().unwrap_or(0);
        let help = match err {
            ParseError::ForbiddenKeyword { trigger, .. } => Some(format!(
                "move this keyword to a block without '{trigger}'"
            )),
            ParseError::ConflictingBlockKind { .. } => {
                Some("split spawning and deleting into separate blocks".to_string())
            }
            ParseError::MissingSelectorOrAction { .. } | ParseError::MissingSelector { .. } => {
                Some("add a selector such as 'match classname <value>'".to_string())
            }
            ParseError::Empty => Some("a rule file needs at least one '{ ... }' block".to_string()),
            ParseError::Lex(_)
            | ParseError::Syntax { .. }
            | ParseError::UnknownPreBlockKeyword { .. }
            | ParseError::UnknownKeyword { .. }
            | ParseError::Template { .. } => None,
        };
        Self::new(path, content, offset, err.to_string(), help)
    }

    /// Create a diagnostic for a runtime failure, pointing at the failing block.
    pub fn from_rule_error(path: &Path, content: &str, err: &RuleError) -> Self {
        Self::new(path, content, err.offset, err.to_string(), None)
    }

    fn new(
        path: &Path,
        content: &str,
        offset: usize,
        message: String,
        help: Option<String>,
    ) -> Self {
        RuleDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: span_at(content, offset),
            message,
            help,
        }
    }
}

/// Span covering the word starting at `offset`.
///
/// The offset is clamped to the content so miette never renders out of bounds.
fn span_at(content: &str, offset: usize) -> SourceSpan {
    let offset = offset.min(content.len());
    let length = content[offset..]
        .find(char::is_whitespace)
        .unwrap_or(content.len() - offset)
        .max(1)
        .min(content.len() - offset);
    (offset, length).into()
}
