//! Per-message processing: classification, keyword actions, and the
//! authorization/execution path.

use super::authorize::{authorize, Decision};
use super::classify::{classify, Category, ALARM_MARKER};
use super::keywords::match_alarm;
use super::SessionController;
use argus_core::{
    error::ArgusError,
    message::{CommandResult, InboundMessage, MessageKind},
};
use chrono::Local;
use colored::Colorize;
use tracing::{debug, info, warn};

impl SessionController {
    /// Process one inbound message. Alarm handling and command handling
    /// are independent stages; both see the same body.
    pub(super) async fn handle_message(&self, msg: &InboundMessage) -> Result<(), ArgusError> {
        if msg.kind == MessageKind::Other {
            debug!("dropping message of ignored kind from {}", msg.sender);
            return Ok(());
        }

        // --- 1. CLASSIFY ---
        let category = classify(&msg.body);
        print_console_line(category, &msg.body);

        // --- 2. KEYWORD ACTIONS ---
        if category == Category::Alarm {
            self.process_alarm(msg).await;
        }

        // --- 3. COMMAND PATH ---
        self.process_command(msg).await
    }

    /// Evaluate an alarm body against the keyword table: one
    /// notification per triggered rule, one (delayed) call per target.
    async fn process_alarm(&self, msg: &InboundMessage) {
        let table = self.rules.load_full();
        let triggered = match_alarm(&msg.body, &table);

        let mut first_call = true;
        for hit in &triggered {
            info!(
                "keyword {:?} triggered: {} call target(s)",
                hit.pattern,
                hit.targets.len()
            );
            self.notifier.notify(ALARM_MARKER, &msg.body).await;

            for target in &hit.targets {
                if !first_call {
                    tokio::time::sleep(self.call_delay).await;
                }
                first_call = false;
                self.dialer.call(target).await;
            }
        }
    }

    /// Authorize the body against the privilege table and act on the
    /// decision. Only a failed reload propagates an error.
    async fn process_command(&self, msg: &InboundMessage) -> Result<(), ArgusError> {
        let privileges = self.privileges.load_full();
        let decision = authorize(&privileges, msg.sender_local(), &msg.body);

        match decision {
            Decision::NotACommand => {}
            Decision::Unauthorized => {
                warn!("unauthorized command attempt from {}", msg.sender);
                self.reply(&msg.sender, "unauthorized").await;
            }
            Decision::ShellAllowed(line) => {
                info!("shell command from {}: {line}", msg.sender);
                let result = self.executor.run_shell(&line).await;
                self.reply_result(msg, result).await;
            }
            Decision::ShellDenied => {
                warn!("shell request denied for restricted sender {}", msg.sender);
                self.reply(&msg.sender, "shell access denied: you are limited to `cmd`")
                    .await;
            }
            Decision::ArgvAllowed(argv) => {
                info!("command from {}: {argv:?}", msg.sender);
                let result = self.executor.run_argv(&argv).await;
                self.reply_result(msg, result).await;
            }
            Decision::ArgvDenied { attempted, allowed } => {
                warn!("command {attempted:?} denied for {}", msg.sender);
                let text = format!(
                    "command {attempted:?} not allowed. allowed commands: {}",
                    allowed.join(", ")
                );
                self.reply(&msg.sender, &text).await;
            }
            Decision::ReloadRequested => {
                info!("reload requested by {}", msg.sender);
                self.reload()?;
                let text = format!(
                    "configuration reloaded: {} keyword rules, {} superusers",
                    self.rules.load().len(),
                    self.privileges.load().len()
                );
                self.reply(&msg.sender, &text).await;
            }
            Decision::UnrecognizedCommand => {
                self.reply(&msg.sender, "unrecognized command. known: sh, cmd, reload")
                    .await;
            }
        }
        Ok(())
    }

    /// Report an execution outcome back to the requester. Failures are
    /// reply text, never a crashed session.
    async fn reply_result(&self, msg: &InboundMessage, result: CommandResult) {
        let text = if result.success {
            if result.output.is_empty() {
                "(no output)".to_string()
            } else {
                result.output
            }
        } else {
            format!("command failed:\n{}", result.output)
        };
        self.reply(&msg.sender, &text).await;
    }
}

/// Print the timestamped, category-colored console line for an inbound
/// message: alarms red, recoveries green, everything else plain.
fn print_console_line(category: Category, body: &str) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let line = match category {
        Category::Alarm => body.red().to_string(),
        Category::Recovery => body.green().to_string(),
        Category::Plain => body.to_string(),
    };
    println!("{timestamp} {line}");
}
