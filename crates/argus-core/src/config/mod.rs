mod tables;

#[cfg(test)]
mod tests;

pub use tables::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ArgusError;

/// Connection configuration, loaded from `xmpp.json`.
///
/// `jid`, `resource`, `host`, and `port` are mandatory — a missing key
/// fails deserialization and aborts startup. `password` may be omitted
/// and supplied interactively instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub jid: String,
    pub resource: String,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub password: Option<String>,
    /// Start of the outbound-call window (hour 0-23). No window = calls
    /// always allowed.
    #[serde(default)]
    pub call_start_hour: Option<u8>,
    /// End of the outbound-call window (hour 0-23). May be below
    /// `call_start_hour` for a window that wraps midnight.
    #[serde(default)]
    pub call_end_hour: Option<u8>,
    /// Prefix applied to call targets that lack a leading `+`
    /// (e.g. `"+49"`).
    #[serde(default)]
    pub country_prefix: Option<String>,
    /// Value for the display environment variable handed to host
    /// commands (notifications need a running X session).
    #[serde(default = "default_display")]
    pub display: String,
    /// Desktop notification command.
    #[serde(default = "default_notify_command")]
    pub notify_command: String,
    /// Outbound telephony command.
    #[serde(default = "default_call_command")]
    pub call_command: String,
}

impl ConnectionConfig {
    /// The full address the session logs in as: `jid/resource`.
    pub fn full_jid(&self) -> String {
        format!("{}/{}", self.jid, self.resource)
    }
}

fn default_display() -> String {
    ":0".to_string()
}

fn default_notify_command() -> String {
    "notify-send".to_string()
}

fn default_call_command() -> String {
    "callout".to_string()
}

/// Load the connection config from a JSON file.
///
/// A missing or malformed file is a fatal condition — the relay cannot
/// operate without it.
pub fn load_connection(path: &Path) -> Result<ConnectionConfig, ArgusError> {
    let content = read_config_file(path)?;
    serde_json::from_str(&content)
        .map_err(|e| ArgusError::Config(format!("failed to parse {}: {e}", path.display())))
}

pub(crate) fn read_config_file(path: &Path) -> Result<String, ArgusError> {
    std::fs::read_to_string(path)
        .map_err(|e| ArgusError::Config(format!("failed to read {}: {e}", path.display())))
}
