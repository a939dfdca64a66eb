//! Keyword matching against alarm bodies.

use argus_core::config::RuleTable;

/// A keyword rule that matched an alarm body. One notification per
/// triggered rule; one call per target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triggered {
    pub pattern: String,
    pub targets: Vec<String>,
}

/// Evaluate an alarm body against the keyword table, in table order.
/// Every matching rule contributes — including rules with no targets,
/// which mean "notify only".
pub fn match_alarm(body: &str, table: &RuleTable) -> Vec<Triggered> {
    table
        .rules()
        .iter()
        .filter(|rule| rule.matches(body))
        .map(|rule| Triggered {
            pattern: rule.pattern.clone(),
            targets: rule.targets.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_core::config::parse_keywords;
    use serde_json::json;

    #[test]
    fn test_match_preserves_table_order() {
        let table = parse_keywords(&json!({
            "disk": ["+1"],
            "cpu": ["+2"],
            "full": []
        }))
        .unwrap();
        let hits = match_alarm("[ALARM] disk full", &table);
        let patterns: Vec<&str> = hits.iter().map(|h| h.pattern.as_str()).collect();
        // Table order is pattern-sorted: cpu, disk, full.
        assert_eq!(patterns, vec!["disk", "full"]);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let table = parse_keywords(&json!({ "disk": ["+1"] })).unwrap();
        let hits = match_alarm("[ALARM] DISK FULL", &table);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].targets, vec!["+1"]);
    }

    #[test]
    fn test_empty_target_rule_still_triggers() {
        let table = parse_keywords(&json!({ "backup": [] })).unwrap();
        let hits = match_alarm("[ALARM] backup failed", &table);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].targets.is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let table = parse_keywords(&json!({ "disk": ["+1"] })).unwrap();
        assert!(match_alarm("[ALARM] cpu pegged", &table).is_empty());
    }

    #[test]
    fn test_regex_rule_matches() {
        let table = parse_keywords(&json!({
            "raid[0-9]+ degraded": { "targets": ["+1"], "regex": true }
        }))
        .unwrap();
        assert_eq!(match_alarm("[ALARM] RAID5 degraded", &table).len(), 1);
        assert!(match_alarm("[ALARM] raid degraded", &table).is_empty());
    }
}
