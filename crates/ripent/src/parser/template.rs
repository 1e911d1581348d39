//! Value template parser using winnow.
//!
//! Parses rule value strings into a [`Template`]. Handles:
//! - Literal text (everything that is not a substitution)
//! - `{key}` substitutions from the active record
//! - `{global.name}` substitutions from the global store
//! - The `\{` escape, which produces a literal `{`

use super::ast::{Segment, Template};
use super::error::TemplateError;
use super::lexer::identifier;
use winnow::combinator::{alt, cut_err, delimited, preceded, repeat};
use winnow::error::{ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{none_of, take_while};

/// Parse a template string.
///
/// # Example
///
/// ```
/// use ripent::parser::{Segment, parse_template};
///
/// let template = parse_template("cccc {target}!").unwrap();
/// assert_eq!(
///     template.segments,
///     vec![
///         Segment::Literal("cccc ".to_string()),
///         Segment::Key("target".to_string()),
///         Segment::Literal("!".to_string()),
///     ]
/// );
/// ```
pub fn parse_template(input: &str) -> Result<Template, TemplateError> {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) => {
            if remaining.is_empty() {
                Ok(t)
            } else {
                Err(TemplateError {
                    position: input.len() - remaining.len(),
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(e) => {
            let message = match e {
                ErrMode::Backtrack(context) | ErrMode::Cut(context) => context.to_string(),
                ErrMode::Incomplete(_) => String::new(),
            };
            Err(TemplateError {
                position: input.len() - remaining.len(),
                message: if message.is_empty() {
                    "malformed substitution".to_string()
                } else {
                    message
                },
            })
        }
    }
}

/// Parse a complete template into segments.
fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((escaped_brace, substitution, literal_char)).parse_next(input)
}

/// `\{` produces a literal brace. Text after it is scanned normally.
fn escaped_brace(input: &mut &str) -> ModalResult<Segment> {
    "\\{".value(Segment::Literal("{".to_string()))
        .parse_next(input)
}

fn literal_char(input: &mut &str) -> ModalResult<Segment> {
    none_of('{')
        .map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}

/// `{ name }` or `{ global.name }`. Once a `{` is seen the substitution
/// must be well formed.
fn substitution(input: &mut &str) -> ModalResult<Segment> {
    preceded(
        '{',
        cut_err(delimited(
            ws,
            alt((global_reference, key_reference)),
            (ws, '}'.context(expected("closing '}'"))),
        )),
    )
    .parse_next(input)
}

fn global_reference(input: &mut &str) -> ModalResult<Segment> {
    preceded(
        ("global", ws, '.', ws),
        cut_err(identifier.context(expected("global name"))),
    )
    .map(|name: &str| Segment::Global(name.to_string()))
    .parse_next(input)
}

fn key_reference(input: &mut &str) -> ModalResult<Segment> {
    identifier
        .context(expected("key name"))
        .map(|name: &str| Segment::Key(name.to_string()))
        .parse_next(input)
}

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

fn expected(description: &'static str) -> StrContext {
    StrContext::Expected(StrContextValue::Description(description))
}
