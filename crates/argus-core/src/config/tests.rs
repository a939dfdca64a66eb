use super::*;
use serde_json::json;

#[test]
fn test_connection_config_all_keys() {
    let cfg: ConnectionConfig = serde_json::from_value(json!({
        "jid": "argus@example.net",
        "resource": "relay",
        "host": "xmpp.example.net",
        "port": 5222,
        "password": "hunter2",
        "call_start_hour": 22,
        "call_end_hour": 6,
        "country_prefix": "+49"
    }))
    .unwrap();
    assert_eq!(cfg.full_jid(), "argus@example.net/relay");
    assert_eq!(cfg.port, 5222);
    assert_eq!(cfg.password.as_deref(), Some("hunter2"));
    assert_eq!(cfg.call_start_hour, Some(22));
    assert_eq!(cfg.call_end_hour, Some(6));
    assert_eq!(cfg.country_prefix.as_deref(), Some("+49"));
    assert_eq!(cfg.display, ":0");
    assert_eq!(cfg.notify_command, "notify-send");
}

#[test]
fn test_connection_config_optional_keys_absent() {
    let cfg: ConnectionConfig = serde_json::from_value(json!({
        "jid": "argus@example.net",
        "resource": "relay",
        "host": "xmpp.example.net",
        "port": 5222
    }))
    .unwrap();
    assert!(cfg.password.is_none());
    assert!(cfg.call_start_hour.is_none());
    assert!(cfg.call_end_hour.is_none());
    assert!(cfg.country_prefix.is_none());
}

#[test]
fn test_connection_config_missing_required_key_fails() {
    let result: Result<ConnectionConfig, _> = serde_json::from_value(json!({
        "jid": "argus@example.net",
        "resource": "relay",
        "host": "xmpp.example.net"
    }));
    assert!(result.is_err(), "missing port must fail deserialization");
}

#[test]
fn test_load_connection_missing_file_is_config_error() {
    let path = std::env::temp_dir().join("__argus_no_such_config__.json");
    let err = load_connection(&path).unwrap_err();
    assert!(matches!(err, crate::error::ArgusError::Config(_)));
}

#[test]
fn test_parse_keywords_canonical_mapping() {
    let table = parse_keywords(&json!({
        "disk": ["+15551234"],
        "cpu": [],
        "oom killer": ["+15551234", "5559876"]
    }))
    .unwrap();
    assert_eq!(table.len(), 3);
    // BTreeMap order: cpu, disk, "oom killer".
    let patterns: Vec<&str> = table.rules().iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["cpu", "disk", "oom killer"]);
    assert!(table.rules()[1].matches("[ALARM] Disk full on /var"));
    assert!(!table.rules()[1].matches("[ALARM] memory pressure"));
}

#[test]
fn test_parse_keywords_literal_is_case_insensitive_substring() {
    let table = parse_keywords(&json!({ "RAID": [] })).unwrap();
    assert!(table.rules()[0].matches("raid degraded on md0"));
    assert!(table.rules()[0].matches("paraide")); // anchorless substring
}

#[test]
fn test_parse_keywords_detailed_regex_rule() {
    let table = parse_keywords(&json!({
        "disk (full|failure)": { "targets": ["+15551234"], "regex": true }
    }))
    .unwrap();
    let rule = &table.rules()[0];
    assert!(rule.matches("[ALARM] DISK FULL on /srv"));
    assert!(rule.matches("disk failure imminent"));
    assert!(!rule.matches("disk slow"));
    assert_eq!(rule.targets, vec!["+15551234"]);
}

#[test]
fn test_parse_keywords_detailed_defaults_to_literal() {
    let table = parse_keywords(&json!({
        "disk (full|failure)": { "targets": [] }
    }))
    .unwrap();
    // Without regex: true the parentheses are literal characters.
    assert!(!table.rules()[0].matches("disk full"));
    assert!(table.rules()[0].matches("disk (full|failure)"));
}

#[test]
fn test_parse_keywords_invalid_regex_fails() {
    let err = parse_keywords(&json!({
        "disk [": { "regex": true }
    }))
    .unwrap_err();
    assert!(matches!(err, crate::error::ArgusError::Config(_)));
}

#[test]
fn test_parse_keywords_legacy_list_form() {
    let table = parse_keywords(&json!({ "keywords": ["disk", "Backup"] })).unwrap();
    assert_eq!(table.len(), 2);
    for rule in table.rules() {
        assert!(rule.targets.is_empty(), "legacy rules carry no targets");
    }
    assert!(table.rules()[0].matches("backup failed"));
}

#[test]
fn test_parse_keywords_rejects_non_object() {
    assert!(parse_keywords(&json!(["disk"])).is_err());
}

#[test]
fn test_parse_superusers_shell_and_list() {
    let table = parse_superusers(&json!({
        "root": "SHELL",
        "ops": ["uptime", "df"]
    }))
    .unwrap();
    assert_eq!(table.get("root"), Some(&Privilege::Shell));
    assert_eq!(
        table.get("ops"),
        Some(&Privilege::Commands(vec![
            "uptime".to_string(),
            "df".to_string()
        ]))
    );
    assert!(table.get("mallory").is_none());
}

#[test]
fn test_parse_superusers_rejects_unknown_sentinel() {
    let err = parse_superusers(&json!({ "root": "shell" })).unwrap_err();
    assert!(matches!(err, crate::error::ArgusError::Config(_)));
}

#[test]
fn test_parse_superusers_rejects_non_object() {
    assert!(parse_superusers(&json!("SHELL")).is_err());
}

#[test]
fn test_load_keywords_roundtrip_through_file() {
    let dir = std::env::temp_dir().join(format!("__argus_cfg_test_{}__", std::process::id()));
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join("keywords.json");
    std::fs::write(&path, r#"{"disk": ["+15551234"]}"#).unwrap();

    let table = load_keywords(&path).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rules()[0].targets, vec!["+15551234"]);

    let _ = std::fs::remove_file(&path);
}
