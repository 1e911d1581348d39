//! Error and warning messages for parsing and applying rules.

use insta::assert_snapshot;
use ripent::{Record, RuleError, RuleErrorKind, RuleFile, parse_rule_file, record};

fn parse_error(source: &str) -> String {
    parse_rule_file(source).unwrap_err().to_string()
}

fn apply_error(rules: &str, records: Vec<Record>) -> RuleError {
    RuleFile::parse(rules)
        .unwrap()
        .apply_rules("", records)
        .unwrap_err()
}

// =============================================================================
// Parse errors
// =============================================================================

#[test]
fn test_empty_source_message() {
    assert_snapshot!(parse_error(""), @"rule source contains no rule blocks");
}

#[test]
fn test_unknown_keyword_message() {
    assert_snapshot!(
        parse_error("{\n motch classname test_ignore\n}"),
        @"unknown keyword 'motch' on line 2, did you mean: match?"
    );
}

#[test]
fn test_unknown_pre_block_keyword_message() {
    assert_snapshot!(
        parse_error("mop a { have x\n remove x }"),
        @"unknown pre-block keyword 'mop' on line 1, expected 'map'"
    );
}

#[test]
fn test_forbidden_keyword_message() {
    assert_snapshot!(
        parse_error("{\n new-entity a\n replace b c\n}"),
        @"keyword 'replace' on line 3 is not allowed in a block containing 'new-entity'"
    );
}

#[test]
fn test_conflicting_block_message() {
    assert_snapshot!(
        parse_error("{ match a b\n new-entity c\n remove-entity }"),
        @"block on line 1 contains both 'new-entity' and 'remove-entity'"
    );
}

#[test]
fn test_missing_selector_or_action_message() {
    assert_snapshot!(
        parse_error("{\n match imaginary imaginary\n}"),
        @"block on line 1 needs at least one selector and one action"
    );
}

#[test]
fn test_missing_selector_message() {
    assert_snapshot!(
        parse_error("\n{ remove-entity }"),
        @"block on line 2 contains 'remove-entity' but no selector"
    );
}

#[test]
fn test_lex_error_messages() {
    assert_snapshot!(parse_error("{ have $ }"), @"unexpected character '$' on line 1");
    assert_snapshot!(
        parse_error("{ have\n \"abc }"),
        @"unterminated string starting on line 2"
    );
}

#[test]
fn test_syntax_error_message() {
    assert_snapshot!(
        parse_error("{ have x\n remove x"),
        @"syntax error on line 2: expected selector or action keyword, found end of input"
    );
}

#[test]
fn test_template_error_has_location() {
    let error = parse_rule_file("{ have a\n replace a \"x {oops\" }").unwrap_err();
    assert!(error.to_string().starts_with("invalid template on line 2: "));
    let offset = error.offset().unwrap();
    assert!((23..=28).contains(&offset), "offset {offset} outside the string");
}

// =============================================================================
// Rule errors
// =============================================================================

#[test]
fn test_replace_missing_key() {
    let error = apply_error("{ have a\n replace b c }", vec![record! { "a" => "1" }]);
    assert_snapshot!(
        error.to_string(),
        @"'replace' needs key 'b', which the record does not have (rule block on line 1)"
    );
}

#[test]
fn test_remove_missing_key() {
    let error = apply_error("{ have a\n remove b }", vec![record! { "a" => "1" }]);
    assert!(matches!(error.kind, RuleErrorKind::MissingKey { .. }));
}

#[test]
fn test_new_existing_key() {
    let error = apply_error("{ have a\n new a x }", vec![record! { "a" => "1" }]);
    assert_snapshot!(
        error.to_string(),
        @"'new' cannot add key 'a', which the record already has (rule block on line 1)"
    );
}

#[test]
fn test_rename_onto_existing_key() {
    let error = apply_error(
        "{ have a\n rename a b }",
        vec![record! { "a" => "1", "b" => "2" }],
    );
    assert_snapshot!(
        error.to_string(),
        @"'rename' cannot add key 'b', which the record already has (rule block on line 1)"
    );
}

#[test]
fn test_store_missing_key() {
    let error = apply_error("{ have a\n store b name }", vec![record! { "a" => "1" }]);
    assert!(matches!(error.kind, RuleErrorKind::MissingKey { ref key, .. } if key == "b"));
}

#[test]
fn test_invalid_bit_pattern() {
    let error = apply_error("{ have f\n bit-set f b12 }", vec![record! { "f" => "1" }]);
    assert_snapshot!(
        error.to_string(),
        @"'bit-set' value 'b12' is not a bit value, expected 'b' and six binary digits (rule block on line 1)"
    );
}

#[test]
fn test_bit_pattern_without_prefix() {
    let error = apply_error("{ have f\n bit-set f 000010 }", vec![record! { "f" => "1" }]);
    assert!(matches!(error.kind, RuleErrorKind::InvalidBitPattern { .. }));
}

#[test]
fn test_bit_target_not_integer() {
    let error = apply_error(
        "{ have f\n bit-clear f b000001 }",
        vec![record! { "f" => "abc" }],
    );
    assert_snapshot!(
        error.to_string(),
        @"'bit-clear' target 'f' holds 'abc', which is not a bitfield (rule block on line 1)"
    );
}

#[test]
fn test_math_not_numeric() {
    let error = apply_error("{ have h\n sub h 1 }", vec![record! { "h" => "aaaa" }]);
    assert_snapshot!(
        error.to_string(),
        @"'sub' value 'aaaa' is not numeric (rule block on line 1)"
    );
}

#[test]
fn test_math_operand_not_numeric() {
    let error = apply_error("{ have h\n mult h abc }", vec![record! { "h" => "1" }]);
    assert!(matches!(error.kind, RuleErrorKind::NotNumeric { ref value, .. } if value == "abc"));
}

#[test]
fn test_division_by_zero() {
    let error = apply_error("{ have h\n div h 0 }", vec![record! { "h" => "10" }]);
    assert_snapshot!(error.to_string(), @"'div' of key 'h' by zero (rule block on line 1)");
}

#[test]
fn test_undefined_global() {
    let error = apply_error(
        "{ have a\n replace a \"{global.nope}\" }",
        vec![record! { "a" => "1" }],
    );
    assert_snapshot!(
        error.to_string(),
        @"template references undefined global 'nope' (rule block on line 1)"
    );
}

#[test]
fn test_selector_template_missing_key() {
    let error = apply_error(
        "{ match a \"{b}\"\n remove a }",
        vec![record! { "a" => "1" }],
    );
    assert_eq!(
        error.kind,
        RuleErrorKind::UndefinedKey { key: "b".into() }
    );
}

#[test]
fn test_empty_value_template() {
    let error = apply_error("{ have a\n replace a \"\" }", vec![record! { "a" => "1" }]);
    assert_snapshot!(
        error.to_string(),
        @"template resolved to nothing (rule block on line 1)"
    );
}

#[test]
fn test_error_names_failing_block() {
    let error = apply_error(
        "{ have a\n new b 1 }\n\n{ have a\n new b 2 }",
        vec![record! { "a" => "1" }],
    );
    assert_eq!(error.line, 4);
    assert_eq!(error.offset, 21);
}

#[test]
fn test_error_stops_before_later_blocks() {
    let mut rules =
        RuleFile::parse("{ have a\n remove b }\n{ have a\n store a reached }").unwrap();
    assert!(rules.apply_rules("", vec![record! { "a" => "1" }]).is_err());
    assert_eq!(rules.try_get_store_value("reached"), None);
}

// =============================================================================
// Warnings
// =============================================================================

#[test]
fn test_classname_overwrite_warning_message() {
    let mut rules = RuleFile::parse("{\n new classname x\n new-entity y\n}").unwrap();
    let (_, warnings) = rules.apply_rules_with_warnings("", Vec::new()).unwrap();
    assert_snapshot!(
        warnings[0].to_string(),
        @"'new-entity' replaced classname 'x' with 'y' (rule block on line 1)"
    );
}
