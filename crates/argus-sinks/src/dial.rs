//! Outbound telephony sink.

use async_trait::async_trait;
use chrono::{Local, Timelike};
use tokio::process::Command;
use tracing::{info, warn};

use crate::policy::{format_number, CallWindow};

/// Outbound call sink. Failures stay local — a failed call is logged
/// and does not abort the remaining targets of a triggered rule.
#[async_trait]
pub trait Dialer: Send + Sync {
    async fn call(&self, target: &str);
}

/// Invokes the host telephony command (`--call <number>`), suppressing
/// calls outside the configured time window.
pub struct PhoneDialer {
    command: String,
    display: String,
    window: CallWindow,
    country_prefix: Option<String>,
}

impl PhoneDialer {
    pub fn new(
        command: impl Into<String>,
        display: impl Into<String>,
        window: CallWindow,
        country_prefix: Option<String>,
    ) -> Self {
        Self {
            command: command.into(),
            display: display.into(),
            window,
            country_prefix,
        }
    }
}

#[async_trait]
impl Dialer for PhoneDialer {
    async fn call(&self, target: &str) {
        let hour = Local::now().hour();
        if !self.window.contains(hour) {
            info!("call to {target} suppressed: hour {hour} outside call window");
            return;
        }

        let number = format_number(target, self.country_prefix.as_deref());
        if !number.starts_with('+') {
            warn!("calling {number} without a country prefix");
        }

        info!("placing call to {number}");
        let result = Command::new(&self.command)
            .arg("--call")
            .arg(&number)
            .env("DISPLAY", &self.display)
            .output()
            .await;

        match result {
            Ok(out) if !out.status.success() => {
                warn!(
                    "call command exited with {}: {}",
                    out.status,
                    String::from_utf8_lossy(&out.stderr).trim()
                );
            }
            Ok(_) => {}
            Err(e) => warn!("failed to launch call command: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_call_failure_does_not_panic() {
        let sink = PhoneDialer::new(
            "__argus_missing_dialer__",
            ":0",
            CallWindow::default(),
            None,
        );
        sink.call("+15551234").await;
    }

    #[tokio::test]
    async fn test_call_with_real_command() {
        let sink = PhoneDialer::new("true", ":0", CallWindow::default(), Some("+49".to_string()));
        sink.call("5551234").await;
    }
}
