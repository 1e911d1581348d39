//! AST types for parsed rule files.

use std::fmt::{Display, Formatter, Result as FmtResult};

use bon::Builder;
use ripent_semantics::{ActionKind, BlockKind, SelectorKind};

/// A compiled value template.
///
/// Templates are compiled once when the rule file is parsed and resolved
/// against a record each time an action or selector runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// A segment of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied verbatim.
    Literal(String),
    /// `{key}`: the value of `key` on the active record.
    Key(String),
    /// `{global.name}`: a value from the global store.
    Global(String),
}

impl Template {
    /// A template consisting of a single literal.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            segments: vec![Segment::Literal(text)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the text if this template has no substitutions.
    pub fn as_literal(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [Segment::Literal(text)] => Some(text),
            _ => None,
        }
    }
}

/// Renders the template back into rule syntax.
impl Display for Template {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(&text.replace('{', "\\{"))?,
                Segment::Key(key) => write!(f, "{{{key}}}")?,
                Segment::Global(name) => write!(f, "{{global.{name}}}")?,
            }
        }
        Ok(())
    }
}

/// A record predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub kind: SelectorKind,
    pub key: String,
    /// Expected value, present for `match` and `dont-match`.
    pub value: Option<Template>,
}

/// Arithmetic operator of the `add`, `sub`, `mult` and `div` actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathOp {
    Add,
    Sub,
    Mult,
    Div,
}

impl MathOp {
    pub const fn kind(self) -> ActionKind {
        match self {
            MathOp::Add => ActionKind::Add,
            MathOp::Sub => ActionKind::Sub,
            MathOp::Mult => ActionKind::Mult,
            MathOp::Div => ActionKind::Div,
        }
    }
}

/// A mutation applied to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Replace { key: String, value: Template },
    New { key: String, value: Template },
    /// `pattern` is the raw `b`-prefixed bit literal, checked when the action runs.
    BitSet { key: String, pattern: String },
    BitClear { key: String, pattern: String },
    Rename { from: String, to: String },
    Store { key: String, name: String },
    Remove { key: String },
    SpawnEntity { classname: String },
    DeleteEntity,
    Math {
        op: MathOp,
        key: String,
        operand: String,
    },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Replace { .. } => ActionKind::Replace,
            Action::New { .. } => ActionKind::New,
            Action::BitSet { .. } => ActionKind::BitSet,
            Action::BitClear { .. } => ActionKind::BitClear,
            Action::Rename { .. } => ActionKind::Rename,
            Action::Store { .. } => ActionKind::Store,
            Action::Remove { .. } => ActionKind::Remove,
            Action::SpawnEntity { .. } => ActionKind::SpawnEntity,
            Action::DeleteEntity => ActionKind::DeleteEntity,
            Action::Math { op, .. } => op.kind(),
        }
    }
}

/// One `{ ... }` unit of a rule file.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct RuleBlock {
    pub kind: BlockKind,

    /// Target names this block is limited to. Empty means every target.
    #[builder(default)]
    pub map_filters: Vec<String>,

    #[builder(default)]
    pub selectors: Vec<Selector>,

    #[builder(default)]
    pub actions: Vec<Action>,

    /// 1-based line of the opening brace.
    #[builder(default = 1)]
    pub line: usize,

    /// Byte offset of the opening brace.
    #[builder(default)]
    pub offset: usize,
}

impl RuleBlock {
    /// Whether the block's map filter admits `target`.
    pub fn applies_to(&self, target: &str) -> bool {
        self.map_filters.is_empty() || self.map_filters.iter().any(|name| name == target)
    }
}
