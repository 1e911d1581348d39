use ripent::{Record, record};

#[test]
fn empty_record() {
    let r = record! {};
    assert!(r.is_empty());
    assert_eq!(r, Record::new());
}

#[test]
fn macro_keeps_order() {
    let r = record! { "classname" => "light", "_light" => "255 255 255 200", "style" => "0" };
    assert_eq!(r.len(), 3);
    assert_eq!(
        r.keys().collect::<Vec<_>>(),
        vec!["classname", "_light", "style"]
    );
    assert_eq!(r.classname(), Some("light"));
}

#[test]
fn macro_accepts_owned_values() {
    let value = String::from("t1");
    let r = record! { "target" => value, "delay".to_string() => 2.to_string(), };
    assert_eq!(r.get("target"), Some("t1"));
    assert_eq!(r.get("delay"), Some("2"));
}

#[test]
fn insert_overwrites_in_place() {
    let mut r = record! { "a" => "1", "b" => "2" };
    assert_eq!(r.insert("a", "3"), Some("1".to_string()));
    assert_eq!(r.insert("c", "4"), None);
    assert_eq!(r.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(r.get("a"), Some("3"));
}

#[test]
fn set_requires_existing_key() {
    let mut r = record! { "a" => "1" };
    assert!(r.set("a", "2"));
    assert!(!r.set("b", "2"));
    assert_eq!(r, record! { "a" => "2" });
}

#[test]
fn remove_keeps_remaining_order() {
    let mut r = record! { "a" => "1", "b" => "2", "c" => "3" };
    assert_eq!(r.remove("a"), Some("1".to_string()));
    assert_eq!(r.remove("a"), None);
    assert_eq!(r.keys().collect::<Vec<_>>(), vec!["b", "c"]);
}

#[test]
fn rename_appends_new_key() {
    let mut r = record! { "a" => "1", "b" => "2" };
    assert!(r.rename("a", "z"));
    assert_eq!(r.keys().collect::<Vec<_>>(), vec!["b", "z"]);
    assert_eq!(r.get("z"), Some("1"));
}

#[test]
fn rename_refuses_missing_or_taken_keys() {
    let mut r = record! { "a" => "1", "b" => "2" };
    assert!(!r.rename("missing", "c"));
    assert!(!r.rename("a", "b"));
    assert_eq!(r, record! { "a" => "1", "b" => "2" });
}

#[test]
fn equality_ignores_order() {
    assert_eq!(
        record! { "a" => "1", "b" => "2" },
        record! { "b" => "2", "a" => "1" }
    );
}

#[test]
fn collect_and_iterate() {
    let r: Record = [("a", "1"), ("b", "2")].into_iter().collect();
    let pairs: Vec<(String, String)> = r.clone().into_iter().collect();
    assert_eq!(
        pairs,
        vec![("a".into(), "1".into()), ("b".into(), "2".into())]
    );
    let borrowed: Vec<&str> = (&r).into_iter().map(|(_, value)| value.as_str()).collect();
    assert_eq!(borrowed, vec!["1", "2"]);
}

#[test]
fn json_round_trip_keeps_order() {
    let records: Vec<Record> =
        serde_json::from_str(r#"[{"classname":"light","angle":"90"},{"classname":"worldspawn"}]"#)
            .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["classname", "angle"]);
    assert_eq!(
        serde_json::to_string(&records[0]).unwrap(),
        r#"{"classname":"light","angle":"90"}"#
    );
}
