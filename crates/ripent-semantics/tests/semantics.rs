use std::collections::HashSet;

use ripent_semantics::{
    ActionKind, BlockKind, KEYWORDS, KeywordId, SelectorKind, keyword_names, resolve_keyword,
};

#[test]
fn keyword_resolution_matrix() {
    let cases = [
        ("match", KeywordId::Selector(SelectorKind::Match), 2),
        ("dont-match", KeywordId::Selector(SelectorKind::DontMatch), 2),
        ("have", KeywordId::Selector(SelectorKind::Have), 1),
        ("dont-have", KeywordId::Selector(SelectorKind::DontHave), 1),
        ("replace", KeywordId::Action(ActionKind::Replace), 2),
        ("new", KeywordId::Action(ActionKind::New), 2),
        ("bit-set", KeywordId::Action(ActionKind::BitSet), 2),
        ("bit-clear", KeywordId::Action(ActionKind::BitClear), 2),
        ("rename", KeywordId::Action(ActionKind::Rename), 2),
        ("store", KeywordId::Action(ActionKind::Store), 2),
        ("remove", KeywordId::Action(ActionKind::Remove), 1),
        ("new-entity", KeywordId::Action(ActionKind::SpawnEntity), 1),
        ("remove-entity", KeywordId::Action(ActionKind::DeleteEntity), 0),
        ("add", KeywordId::Action(ActionKind::Add), 2),
        ("sub", KeywordId::Action(ActionKind::Sub), 2),
        ("mult", KeywordId::Action(ActionKind::Mult), 2),
        ("div", KeywordId::Action(ActionKind::Div), 2),
    ];

    for (name, id, arity) in cases {
        let spec = resolve_keyword(name).unwrap_or_else(|| panic!("{name} should resolve"));
        assert_eq!(spec.id, id, "{name}");
        assert_eq!(spec.arity, arity, "{name}");
        assert_eq!(id.keyword(), name);
    }
    assert_eq!(KEYWORDS.len(), cases.len());
}

#[test]
fn keyword_resolution_ignores_case() {
    assert_eq!(
        resolve_keyword("MATCH").map(|spec| spec.id),
        Some(KeywordId::Selector(SelectorKind::Match))
    );
    assert_eq!(
        resolve_keyword("New-Entity").map(|spec| spec.id),
        Some(KeywordId::Action(ActionKind::SpawnEntity))
    );
}

#[test]
fn unknown_keywords_do_not_resolve() {
    assert!(resolve_keyword("motch").is_none());
    assert!(resolve_keyword("map").is_none());
    assert!(resolve_keyword("").is_none());
}

#[test]
fn keyword_names_are_unique() {
    let names: Vec<&str> = keyword_names().collect();
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(names.len(), unique.len());
}

#[test]
fn selectors_are_listed_before_actions() {
    let first_action = KEYWORDS
        .iter()
        .position(|spec| !spec.id.is_selector())
        .unwrap();
    assert!(KEYWORDS[first_action..].iter().all(|spec| !spec.id.is_selector()));
}

#[test]
fn classify_prefers_spawn_over_delete() {
    let normal = [
        KeywordId::Selector(SelectorKind::Match),
        KeywordId::Action(ActionKind::Replace),
    ];
    assert_eq!(BlockKind::classify(normal), BlockKind::Normal);

    let delete = [
        KeywordId::Selector(SelectorKind::Match),
        KeywordId::Action(ActionKind::DeleteEntity),
    ];
    assert_eq!(BlockKind::classify(delete), BlockKind::DeleteEntity);

    let both = [
        KeywordId::Action(ActionKind::DeleteEntity),
        KeywordId::Action(ActionKind::SpawnEntity),
    ];
    assert_eq!(BlockKind::classify(both), BlockKind::SpawnEntity);
    assert_eq!(BlockKind::classify([]), BlockKind::Normal);
}

#[test]
fn forbidden_keyword_table() {
    for spec in KEYWORDS {
        assert!(!BlockKind::Normal.forbids(spec.id), "{}", spec.name);
    }

    let spawn_forbidden: Vec<&str> = KEYWORDS
        .iter()
        .filter(|spec| BlockKind::SpawnEntity.forbids(spec.id))
        .map(|spec| spec.name)
        .collect();
    assert_eq!(spawn_forbidden, vec!["replace", "remove"]);

    let delete_forbidden: Vec<&str> = KEYWORDS
        .iter()
        .filter(|spec| BlockKind::DeleteEntity.forbids(spec.id))
        .map(|spec| spec.name)
        .collect();
    assert_eq!(
        delete_forbidden,
        vec!["replace", "new", "bit-set", "bit-clear", "remove"]
    );
}

#[test]
fn block_minimums() {
    assert!(BlockKind::Normal.requires_selector());
    assert!(BlockKind::Normal.requires_action());
    assert!(BlockKind::DeleteEntity.requires_selector());
    assert!(!BlockKind::DeleteEntity.requires_action());
    assert!(!BlockKind::SpawnEntity.requires_selector());
    assert!(!BlockKind::SpawnEntity.requires_action());
}

#[test]
fn block_kind_triggers() {
    assert_eq!(BlockKind::Normal.trigger(), None);
    assert_eq!(
        BlockKind::SpawnEntity.trigger(),
        Some(ActionKind::SpawnEntity)
    );
    assert_eq!(
        BlockKind::DeleteEntity.trigger().map(ActionKind::keyword),
        Some("remove-entity")
    );
}
