//! The two reload-replaceable tables: keyword rules and sender privileges.
//!
//! Both load into immutable values that the session swaps wholesale on
//! reload, so concurrent readers never observe a half-updated table.

use regex::RegexBuilder;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::read_config_file;
use crate::error::ArgusError;

/// The privilege sentinel granting unrestricted shell access.
pub const SHELL_SENTINEL: &str = "SHELL";

/// How a keyword rule is matched against an alarm body.
#[derive(Debug, Clone)]
enum Matcher {
    /// Case-insensitive substring search (pattern stored lowercased).
    Literal(String),
    /// Case-insensitive regex search.
    Pattern(regex::Regex),
}

/// A single keyword rule: a pattern plus the call targets it triggers.
/// An empty target list means "notify only, no calls".
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub pattern: String,
    matcher: Matcher,
    pub targets: Vec<String>,
}

impl KeywordRule {
    /// Literal substring rule. Bare keywords are anchorless substrings.
    pub fn literal(pattern: &str, targets: Vec<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            matcher: Matcher::Literal(pattern.to_lowercase()),
            targets,
        }
    }

    /// Regex rule. The pattern is compiled case-insensitive.
    pub fn regex(pattern: &str, targets: Vec<String>) -> Result<Self, ArgusError> {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ArgusError::Config(format!("invalid keyword regex {pattern:?}: {e}")))?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: Matcher::Pattern(re),
            targets,
        })
    }

    /// Whether the pattern is found anywhere in `body`.
    pub fn matches(&self, body: &str) -> bool {
        match &self.matcher {
            Matcher::Literal(needle) => body.to_lowercase().contains(needle),
            Matcher::Pattern(re) => re.is_match(body),
        }
    }
}

/// The keyword table, iterated in deterministic (pattern-sorted) order.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<KeywordRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Value side of a canonical keyword entry: either a plain target list
/// (literal match) or the detailed form selecting regex matching.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RuleSpec {
    Targets(Vec<String>),
    Detailed {
        #[serde(default)]
        targets: Vec<String>,
        #[serde(default)]
        regex: bool,
    },
}

/// Parse a keyword table from its JSON representation.
///
/// Canonical form: an object mapping pattern → target list (or the
/// detailed `{"targets": [...], "regex": true}` form). The older
/// `{"keywords": ["disk", "cpu"]}` list form is accepted as a fallback
/// and maps to literal rules with no targets.
pub fn parse_keywords(value: &serde_json::Value) -> Result<RuleTable, ArgusError> {
    // Legacy list form.
    if let Some(obj) = value.as_object() {
        if obj.len() == 1 {
            if let Some(list) = obj.get("keywords").and_then(|v| v.as_array()) {
                let mut rules = Vec::with_capacity(list.len());
                for entry in list {
                    let word = entry.as_str().ok_or_else(|| {
                        ArgusError::Config("legacy keywords list must contain strings".to_string())
                    })?;
                    rules.push(KeywordRule::literal(word, Vec::new()));
                }
                rules.sort_by(|a, b| a.pattern.cmp(&b.pattern));
                return Ok(RuleTable::new(rules));
            }
        }
    }

    // Canonical mapping form. BTreeMap gives the deterministic order.
    let entries: BTreeMap<String, RuleSpec> = serde_json::from_value(value.clone())
        .map_err(|e| ArgusError::Config(format!("malformed keywords table: {e}")))?;

    let mut rules = Vec::with_capacity(entries.len());
    for (pattern, spec) in entries {
        let rule = match spec {
            RuleSpec::Targets(targets) => KeywordRule::literal(&pattern, targets),
            RuleSpec::Detailed { targets, regex } => {
                if regex {
                    KeywordRule::regex(&pattern, targets)?
                } else {
                    KeywordRule::literal(&pattern, targets)
                }
            }
        };
        rules.push(rule);
    }
    Ok(RuleTable::new(rules))
}

/// Load the keyword table from `keywords.json`. Fatal on missing or
/// malformed file, at startup and on reload alike.
pub fn load_keywords(path: &Path) -> Result<RuleTable, ArgusError> {
    let content = read_config_file(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| ArgusError::Config(format!("failed to parse {}: {e}", path.display())))?;
    parse_keywords(&value)
}

/// What a listed sender is allowed to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Privilege {
    /// Unrestricted shell access — may run arbitrary command lines.
    Shell,
    /// Restricted to the named commands (checked against argv[0]).
    Commands(Vec<String>),
}

/// The sender privilege table, keyed by user local part.
#[derive(Debug, Clone, Default)]
pub struct PrivilegeTable {
    users: BTreeMap<String, Privilege>,
}

impl PrivilegeTable {
    pub fn new(users: BTreeMap<String, Privilege>) -> Self {
        Self { users }
    }

    pub fn get(&self, local_part: &str) -> Option<&Privilege> {
        self.users.get(local_part)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PrivilegeSpec {
    Sentinel(String),
    Commands(Vec<String>),
}

/// Parse the privilege table from its JSON representation: an object
/// mapping user local part → the literal `"SHELL"` or a command list.
pub fn parse_superusers(value: &serde_json::Value) -> Result<PrivilegeTable, ArgusError> {
    let entries: BTreeMap<String, PrivilegeSpec> = serde_json::from_value(value.clone())
        .map_err(|e| ArgusError::Config(format!("malformed superusers table: {e}")))?;

    let mut users = BTreeMap::new();
    for (user, spec) in entries {
        let privilege = match spec {
            PrivilegeSpec::Sentinel(s) if s == SHELL_SENTINEL => Privilege::Shell,
            PrivilegeSpec::Sentinel(s) => {
                return Err(ArgusError::Config(format!(
                    "invalid privilege {s:?} for user {user:?}: expected {SHELL_SENTINEL:?} or a command list"
                )));
            }
            PrivilegeSpec::Commands(list) => Privilege::Commands(list),
        };
        users.insert(user, privilege);
    }
    Ok(PrivilegeTable::new(users))
}

/// Load the privilege table from `superusers.json`. Fatal on missing or
/// malformed file, at startup and on reload alike.
pub fn load_superusers(path: &Path) -> Result<PrivilegeTable, ArgusError> {
    let content = read_config_file(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| ArgusError::Config(format!("failed to parse {}: {e}", path.display())))?;
    parse_superusers(&value)
}
