//! tests/export_tests.rs
//! Redacted JSON export of the settings table

mod common;
mod support;

use std::fs;

use serde_json::Value;
use showcase_settings::{export_settings_json, SettingCategory};
use support::TestEnv;

#[test]
fn export_contains_every_setting_with_secrets_redacted() {
    common::setup();
    let env = TestEnv::new();
    env.manager
        .update_setting("site_name", "Corner Shop", Some("admin-1"), None)
        .unwrap();
    env.manager
        .update_setting("contact_email", "a@b.com", None, Some(SettingCategory::Contact))
        .unwrap();
    env.manager
        .update_setting("email_smtp_password", "secret123", None, Some(SettingCategory::Email))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings-export.json");
    let total = export_settings_json(&env.manager, &path).expect("export failed");
    assert_eq!(total, 3);

    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["export_format"], "showcase-settings-v1");
    assert_eq!(json["total_settings"], 3);
    assert!(json["exported_at"].as_str().unwrap().ends_with('Z'));

    let settings = json["settings"].as_array().unwrap();
    let find = |key: &str| {
        settings
            .iter()
            .find(|s| s["key"] == key)
            .unwrap_or_else(|| panic!("missing {key}"))
    };

    assert_eq!(find("site_name")["value"], "Corner Shop");
    assert_eq!(find("site_name")["updated_by"], "admin-1");
    assert_eq!(find("contact_email")["category"], "CONTACT");

    let secret = find("email_smtp_password");
    assert_eq!(secret["value"], "********");
    assert!(!fs::read_to_string(&path).unwrap().contains("secret123"));
}

#[test]
fn export_of_empty_store_is_valid() {
    let env = TestEnv::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");

    assert_eq!(export_settings_json(&env.manager, &path).unwrap(), 0);
    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["settings"], Value::Array(vec![]));
}
