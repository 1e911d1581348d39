//! Shared ripent keyword tables used by both the rule parser and the CLI.
//!
//! This crate centralizes keyword spelling, argument arity and the block-kind
//! restrictions so that parsing and the `ripent keywords` listing cannot drift.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Canonical selector identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Match,
    DontMatch,
    Have,
    DontHave,
}

impl SelectorKind {
    /// The keyword spelling used in rule files.
    pub const fn keyword(self) -> &'static str {
        match self {
            SelectorKind::Match => "match",
            SelectorKind::DontMatch => "dont-match",
            SelectorKind::Have => "have",
            SelectorKind::DontHave => "dont-have",
        }
    }
}

impl Display for SelectorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.keyword())
    }
}

/// Canonical action identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Replace,
    New,
    BitSet,
    BitClear,
    Rename,
    Store,
    Remove,
    SpawnEntity,
    DeleteEntity,
    Add,
    Sub,
    Mult,
    Div,
}

impl ActionKind {
    /// The keyword spelling used in rule files.
    pub const fn keyword(self) -> &'static str {
        match self {
            ActionKind::Replace => "replace",
            ActionKind::New => "new",
            ActionKind::BitSet => "bit-set",
            ActionKind::BitClear => "bit-clear",
            ActionKind::Rename => "rename",
            ActionKind::Store => "store",
            ActionKind::Remove => "remove",
            ActionKind::SpawnEntity => "new-entity",
            ActionKind::DeleteEntity => "remove-entity",
            ActionKind::Add => "add",
            ActionKind::Sub => "sub",
            ActionKind::Mult => "mult",
            ActionKind::Div => "div",
        }
    }
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.keyword())
    }
}

/// A keyword resolved to either a selector or an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    Selector(SelectorKind),
    Action(ActionKind),
}

impl KeywordId {
    pub const fn keyword(self) -> &'static str {
        match self {
            KeywordId::Selector(kind) => kind.keyword(),
            KeywordId::Action(kind) => kind.keyword(),
        }
    }

    pub const fn is_selector(self) -> bool {
        matches!(self, KeywordId::Selector(_))
    }
}

impl Display for KeywordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.keyword())
    }
}

/// One row of the keyword table: spelling, tag and number of arguments consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordSpec {
    pub name: &'static str,
    pub id: KeywordId,
    pub arity: usize,
}

const fn selector(kind: SelectorKind, arity: usize) -> KeywordSpec {
    KeywordSpec {
        name: kind.keyword(),
        id: KeywordId::Selector(kind),
        arity,
    }
}

const fn action(kind: ActionKind, arity: usize) -> KeywordSpec {
    KeywordSpec {
        name: kind.keyword(),
        id: KeywordId::Action(kind),
        arity,
    }
}

/// Every keyword accepted inside a rule block, selectors first.
pub const KEYWORDS: &[KeywordSpec] = &[
    selector(SelectorKind::Match, 2),
    selector(SelectorKind::DontMatch, 2),
    selector(SelectorKind::Have, 1),
    selector(SelectorKind::DontHave, 1),
    action(ActionKind::Replace, 2),
    action(ActionKind::New, 2),
    action(ActionKind::BitSet, 2),
    action(ActionKind::BitClear, 2),
    action(ActionKind::Rename, 2),
    action(ActionKind::Store, 2),
    action(ActionKind::Remove, 1),
    action(ActionKind::SpawnEntity, 1),
    action(ActionKind::DeleteEntity, 0),
    action(ActionKind::Add, 2),
    action(ActionKind::Sub, 2),
    action(ActionKind::Mult, 2),
    action(ActionKind::Div, 2),
];

/// Resolve a keyword as written in a rule file. Matching ignores ASCII case.
pub fn resolve_keyword(name: &str) -> Option<&'static KeywordSpec> {
    KEYWORDS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// Accepted keyword spellings, in table order.
///
/// Used for diagnostics and typo suggestions.
pub fn keyword_names() -> impl Iterator<Item = &'static str> {
    KEYWORDS.iter().map(|spec| spec.name)
}

/// How a rule block treats the records it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Mutates selected records in place.
    Normal,
    /// Creates new records (`new-entity`).
    SpawnEntity,
    /// Deletes selected records (`remove-entity`).
    DeleteEntity,
}

impl BlockKind {
    pub const ALL: [BlockKind; 3] = [
        BlockKind::Normal,
        BlockKind::SpawnEntity,
        BlockKind::DeleteEntity,
    ];

    /// Classify a block from the keywords it contains.
    ///
    /// `new-entity` takes precedence over `remove-entity`; a block holding
    /// both is rejected separately by the parser.
    pub fn classify<I>(ids: I) -> BlockKind
    where
        I: IntoIterator<Item = KeywordId>,
    {
        let mut kind = BlockKind::Normal;
        for id in ids {
            match id {
                KeywordId::Action(ActionKind::SpawnEntity) => return BlockKind::SpawnEntity,
                KeywordId::Action(ActionKind::DeleteEntity) => kind = BlockKind::DeleteEntity,
                KeywordId::Selector(_) | KeywordId::Action(_) => {}
            }
        }
        kind
    }

    /// The action keyword that puts a block into this kind, if any.
    pub const fn trigger(self) -> Option<ActionKind> {
        match self {
            BlockKind::Normal => None,
            BlockKind::SpawnEntity => Some(ActionKind::SpawnEntity),
            BlockKind::DeleteEntity => Some(ActionKind::DeleteEntity),
        }
    }

    /// Actions that may not appear anywhere in a block of this kind.
    pub const fn forbidden_actions(self) -> &'static [ActionKind] {
        match self {
            BlockKind::Normal => &[],
            BlockKind::SpawnEntity => &[ActionKind::Replace, ActionKind::Remove],
            BlockKind::DeleteEntity => &[
                ActionKind::Replace,
                ActionKind::Remove,
                ActionKind::New,
                ActionKind::BitSet,
                ActionKind::BitClear,
            ],
        }
    }

    pub fn forbids(self, id: KeywordId) -> bool {
        match id {
            KeywordId::Selector(_) => false,
            KeywordId::Action(kind) => self.forbidden_actions().contains(&kind),
        }
    }

    /// Whether a block of this kind needs at least one selector.
    pub const fn requires_selector(self) -> bool {
        matches!(self, BlockKind::Normal | BlockKind::DeleteEntity)
    }

    /// Whether a block of this kind needs at least one action.
    pub const fn requires_action(self) -> bool {
        matches!(self, BlockKind::Normal)
    }

    pub const fn name(self) -> &'static str {
        match self {
            BlockKind::Normal => "normal",
            BlockKind::SpawnEntity => "spawn-entity",
            BlockKind::DeleteEntity => "delete-entity",
        }
    }
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}
