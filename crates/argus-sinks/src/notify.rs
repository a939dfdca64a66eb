//! Desktop notification sink.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::warn;

/// Desktop alert sink. Failures stay local — they are logged, never
/// propagated to the sender or the pipeline.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, summary: &str, body: &str);
}

/// Invokes the host desktop-notification command
/// (`notify-send -u <urgency> <summary> <body>`).
pub struct DesktopNotifier {
    command: String,
    display: String,
    urgency: String,
}

impl DesktopNotifier {
    pub fn new(command: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            display: display.into(),
            urgency: "critical".to_string(),
        }
    }

    pub fn with_urgency(mut self, urgency: impl Into<String>) -> Self {
        self.urgency = urgency.into();
        self
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, summary: &str, body: &str) {
        let result = Command::new(&self.command)
            .arg("-u")
            .arg(&self.urgency)
            .arg(summary)
            .arg(body)
            .env("DISPLAY", &self.display)
            .output()
            .await;

        match result {
            Ok(out) if !out.status.success() => {
                warn!(
                    "notification command exited with {}: {}",
                    out.status,
                    String::from_utf8_lossy(&out.stderr).trim()
                );
            }
            Ok(_) => {}
            Err(e) => warn!("failed to launch notification command: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notify_failure_does_not_panic() {
        let sink = DesktopNotifier::new("__argus_missing_notifier__", ":0");
        sink.notify("[ALARM]", "disk full").await;
    }

    #[tokio::test]
    async fn test_notify_with_real_command() {
        // `true` ignores its arguments and exits 0.
        let sink = DesktopNotifier::new("true", ":0").with_urgency("low");
        sink.notify("[ALARM]", "disk full").await;
    }
}
