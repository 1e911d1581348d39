use ripent::{KEY_UPGRADES, UpgradeWarning, record, upgrade_keys};

#[test]
fn test_angle_becomes_angles() {
    let mut records = vec![record! { "classname" => "info_target", "angle" => "90", "x" => "1" }];
    let report = upgrade_keys(&mut records);
    assert_eq!(report.upgraded, 1);
    assert!(report.warnings.is_empty());
    assert_eq!(records[0].get("angles"), Some("0 90 0"));
    assert_eq!(
        records[0].keys().collect::<Vec<_>>(),
        vec!["classname", "x", "angles"]
    );
}

#[test]
fn test_value_is_copied_verbatim() {
    let mut records = vec![record! { "angle" => "-1" }];
    upgrade_keys(&mut records);
    assert_eq!(records[0].get("angles"), Some("0 -1 0"));
}

#[test]
fn test_records_without_legacy_keys_untouched() {
    let input = vec![record! { "classname" => "light", "angles" => "0 0 0" }];
    let mut records = input.clone();
    let report = upgrade_keys(&mut records);
    assert_eq!(report.upgraded, 0);
    assert_eq!(records, input);
}

#[test]
fn test_conflict_is_reported_and_left_alone() {
    let input = vec![
        record! { "classname" => "light", "angle" => "90", "angles" => "0 0 0" },
        record! { "angle" => "90", "angles" => "0 0 0" },
    ];
    let mut records = input.clone();
    let report = upgrade_keys(&mut records);
    assert_eq!(records, input);
    assert_eq!(report.upgraded, 0);
    assert_eq!(
        report.warnings,
        vec![
            UpgradeWarning {
                legacy_key: "angle",
                new_key: "angles",
                classname: Some("light".into()),
            },
            UpgradeWarning {
                legacy_key: "angle",
                new_key: "angles",
                classname: None,
            },
        ]
    );
    assert_eq!(
        report.warnings[0].to_string(),
        "could not upgrade key 'angle', entity 'light' already has key 'angles'"
    );
    assert_eq!(
        report.warnings[1].to_string(),
        "could not upgrade key 'angle', entity already has key 'angles'"
    );
}

#[test]
fn test_upgrade_table() {
    let upgrades: Vec<(&str, &str)> = KEY_UPGRADES
        .iter()
        .map(|upgrade| (upgrade.legacy_key, upgrade.new_key))
        .collect();
    assert_eq!(upgrades, vec![("angle", "angles")]);
    assert_eq!((KEY_UPGRADES[0].convert)("45"), "0 45 0");
}
