//! Rule file parser.
//!
//! Parses rule source into [`RuleBlock`]s. Each block body is scanned three
//! times over the same token range: a prescan fixes the block kind, a
//! restriction pass rejects keywords that kind forbids, and a construction
//! pass builds the selectors and actions in source order.

use super::ast::{Action, MathOp, RuleBlock, Selector, Template};
use super::cursor::TokenCursor;
use super::error::ParseError;
use super::template::parse_template;
use super::token::{Token, TokenKind};
use crate::engine::numeric::format_number;
use ripent_semantics::{
    ActionKind, BlockKind, KeywordId, KeywordSpec, SelectorKind, keyword_names, resolve_keyword,
};
use strsim::levenshtein;
use tracing::debug;

/// Parse rule source into its blocks.
///
/// Fails when the source is empty or holds no block, when any block is
/// malformed, or when a block lacks the selectors or actions its kind needs.
pub fn parse_blocks(source: &str) -> Result<Vec<RuleBlock>, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut cursor = TokenCursor::from_source(source, false)?;
    let mut blocks = Vec::new();
    while !cursor.is_at_end() {
        let map_filters = if cursor.peek_kind() == TokenKind::Identifier {
            pre_block(&mut cursor)?
        } else {
            Vec::new()
        };
        blocks.push(rule_block(&mut cursor, map_filters)?);
    }

    if blocks.is_empty() {
        return Err(ParseError::Empty);
    }
    for block in &blocks {
        validate_block(block)?;
    }

    debug!(blocks = blocks.len(), "parsed rule source");
    Ok(blocks)
}

/// Parse `map name+` ahead of a block.
fn pre_block(cursor: &mut TokenCursor<'_>) -> Result<Vec<String>, ParseError> {
    let token = cursor.current().clone();
    let keyword = cursor.read_identifier()?;
    if !keyword.eq_ignore_ascii_case("map") {
        return Err(ParseError::UnknownPreBlockKeyword {
            keyword: keyword.to_string(),
            line: token.line,
            offset: token.start,
        });
    }

    let mut filters = Vec::new();
    while cursor.peek_kind() != TokenKind::LeftBrace {
        filters.push(argument(cursor)?.text);
    }
    Ok(filters)
}

/// An argument as written, with the token it came from.
struct Argument {
    text: String,
    token: Token,
}

/// One keyword occurrence inside a block body.
struct Item {
    spec: &'static KeywordSpec,
    token: Token,
    arguments: Vec<Argument>,
}

fn rule_block(
    cursor: &mut TokenCursor<'_>,
    map_filters: Vec<String>,
) -> Result<RuleBlock, ParseError> {
    let open = cursor.expect(TokenKind::LeftBrace, true)?;
    let body = cursor.position();

    // Prescan: fix the block kind.
    let mut ids = Vec::new();
    while let Some(item) = next_item(cursor)? {
        ids.push(item.spec.id);
    }
    let spawns = ids.contains(&KeywordId::Action(ActionKind::SpawnEntity));
    let deletes = ids.contains(&KeywordId::Action(ActionKind::DeleteEntity));
    if spawns && deletes {
        return Err(ParseError::ConflictingBlockKind {
            line: open.line,
            offset: open.start,
        });
    }
    let kind = BlockKind::classify(ids);

    // Restrictions: reject keywords the kind forbids anywhere in the block.
    if let Some(trigger) = kind.trigger() {
        cursor.jump_to(body);
        while let Some(item) = next_item(cursor)? {
            if kind.forbids(item.spec.id) {
                return Err(ParseError::ForbiddenKeyword {
                    keyword: item.spec.name.to_string(),
                    trigger,
                    line: item.token.line,
                    offset: item.token.start,
                });
            }
        }
    }

    // Construction.
    cursor.jump_to(body);
    let mut selectors = Vec::new();
    let mut actions = Vec::new();
    while let Some(item) = next_item(cursor)? {
        match item.spec.id {
            KeywordId::Selector(selector_kind) => selectors.push(selector(selector_kind, item)?),
            KeywordId::Action(action_kind) => actions.push(action(action_kind, item)?),
        }
    }
    cursor.expect(TokenKind::RightBrace, true)?;

    Ok(RuleBlock::builder()
        .kind(kind)
        .map_filters(map_filters)
        .selectors(selectors)
        .actions(actions)
        .line(open.line)
        .offset(open.start)
        .build())
}

/// Read the next keyword and its arguments, or `None` at the closing brace.
fn next_item(cursor: &mut TokenCursor<'_>) -> Result<Option<Item>, ParseError> {
    while cursor.peek_kind() == TokenKind::Semicolon {
        cursor.advance();
    }
    if cursor.peek_kind() == TokenKind::RightBrace {
        return Ok(None);
    }
    if cursor.peek_kind() != TokenKind::Identifier {
        return Err(cursor.unexpected("expected selector or action keyword"));
    }

    let token = cursor.current().clone();
    let word = cursor.read_identifier()?;
    let Some(spec) = resolve_keyword(word) else {
        return Err(ParseError::UnknownKeyword {
            keyword: word.to_string(),
            line: token.line,
            offset: token.start,
            suggestions: compute_suggestions(&word.to_ascii_lowercase()),
        });
    };

    let mut arguments = Vec::with_capacity(spec.arity);
    for _ in 0..spec.arity {
        arguments.push(argument(cursor)?);
    }
    Ok(Some(Item {
        spec,
        token,
        arguments,
    }))
}

/// Read an identifier, string or (possibly negative) number.
///
/// Numbers are re-rendered in shortest form, so `100.50` reads as `100.5`.
fn argument(cursor: &mut TokenCursor<'_>) -> Result<Argument, ParseError> {
    let token = cursor.current().clone();
    let text = match token.kind {
        TokenKind::Identifier => cursor.read_identifier()?.to_string(),
        TokenKind::String => cursor.read_string()?,
        TokenKind::Minus | TokenKind::Number => format_number(cursor.read_float()?),
        _ => return Err(cursor.unexpected("expected identifier, string or number")),
    };
    Ok(Argument { text, token })
}

fn selector(kind: SelectorKind, item: Item) -> Result<Selector, ParseError> {
    let mut arguments = item.arguments.into_iter();
    let key = next_text(&mut arguments);
    let value = match kind {
        SelectorKind::Match | SelectorKind::DontMatch => {
            Some(template(arguments.next(), &item.token)?)
        }
        SelectorKind::Have | SelectorKind::DontHave => None,
    };
    Ok(Selector { kind, key, value })
}

fn action(kind: ActionKind, item: Item) -> Result<Action, ParseError> {
    let mut arguments = item.arguments.into_iter();
    let action = match kind {
        ActionKind::Replace => Action::Replace {
            key: next_text(&mut arguments),
            value: template(arguments.next(), &item.token)?,
        },
        ActionKind::New => Action::New {
            key: next_text(&mut arguments),
            value: template(arguments.next(), &item.token)?,
        },
        ActionKind::BitSet => Action::BitSet {
            key: next_text(&mut arguments),
            pattern: next_text(&mut arguments),
        },
        ActionKind::BitClear => Action::BitClear {
            key: next_text(&mut arguments),
            pattern: next_text(&mut arguments),
        },
        ActionKind::Rename => Action::Rename {
            from: next_text(&mut arguments),
            to: next_text(&mut arguments),
        },
        ActionKind::Store => Action::Store {
            key: next_text(&mut arguments),
            name: next_text(&mut arguments),
        },
        ActionKind::Remove => Action::Remove {
            key: next_text(&mut arguments),
        },
        ActionKind::SpawnEntity => Action::SpawnEntity {
            classname: next_text(&mut arguments),
        },
        ActionKind::DeleteEntity => Action::DeleteEntity,
        ActionKind::Add => math(MathOp::Add, &mut arguments),
        ActionKind::Sub => math(MathOp::Sub, &mut arguments),
        ActionKind::Mult => math(MathOp::Mult, &mut arguments),
        ActionKind::Div => math(MathOp::Div, &mut arguments),
    };
    Ok(action)
}

fn math(op: MathOp, arguments: &mut impl Iterator<Item = Argument>) -> Action {
    Action::Math {
        op,
        key: next_text(arguments),
        operand: next_text(arguments),
    }
}

/// Arity comes from the keyword table, so every expected argument is present.
fn next_text(arguments: &mut impl Iterator<Item = Argument>) -> String {
    arguments
        .next()
        .map(|argument| argument.text)
        .unwrap_or_default()
}

/// Compile a value argument into a template.
fn template(argument: Option<Argument>, keyword: &Token) -> Result<Template, ParseError> {
    let Some(argument) = argument else {
        return Ok(Template::default());
    };
    parse_template(&argument.text).map_err(|error| {
        // String tokens start at the opening quote.
        let quote = usize::from(argument.token.kind == TokenKind::String);
        ParseError::Template {
            line: keyword.line,
            offset: argument.token.start + quote + error.position,
            message: error.to_string(),
        }
    })
}

fn validate_block(block: &RuleBlock) -> Result<(), ParseError> {
    let missing_selector = block.kind.requires_selector() && block.selectors.is_empty();
    let missing_action = block.kind.requires_action() && block.actions.is_empty();
    match block.kind {
        BlockKind::Normal if missing_selector || missing_action => {
            Err(ParseError::MissingSelectorOrAction {
                line: block.line,
                offset: block.offset,
            })
        }
        BlockKind::DeleteEntity if missing_selector => Err(ParseError::MissingSelector {
            line: block.line,
            offset: block.offset,
        }),
        BlockKind::Normal | BlockKind::SpawnEntity | BlockKind::DeleteEntity => Ok(()),
    }
}

/// Compute "did you mean" suggestions for an unknown keyword.
///
/// Uses Levenshtein distance with thresholds:
/// - distance <= 1 for names <= 3 chars
/// - distance <= 2 for longer names
/// - Limit to 3 suggestions, sorted by distance
fn compute_suggestions(name: &str) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &str)> = keyword_names()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.to_string())
        .collect()
}
