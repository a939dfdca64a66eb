//! Line-oriented stdio transport.
//!
//! Each stdin line is one inbound chat message: `<sender> <body>`.
//! Replies are written to stdout as `-> <recipient>: <body>`.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use argus_core::{
    error::ArgusError,
    message::{InboundMessage, MessageKind},
    traits::Transport,
};

/// Reads messages from stdin and writes replies to stdout.
pub struct StdioTransport {
    /// Local address reported in the roster.
    jid: String,
}

impl StdioTransport {
    pub fn new(jid: impl Into<String>) -> Self {
        Self { jid: jid.into() }
    }

    /// Parse one stdin line into a message. Lines without a body and
    /// blank lines are dropped.
    fn parse_line(line: &str) -> Option<InboundMessage> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (sender, body) = line.split_once(' ')?;
        if sender.is_empty() || body.is_empty() {
            return None;
        }
        Some(InboundMessage {
            id: Uuid::new_v4(),
            kind: MessageKind::Chat,
            sender: sender.to_string(),
            body: body.to_string(),
            timestamp: chrono::Utc::now(),
        })
    }
}

#[async_trait]
impl Transport for StdioTransport {
    fn name(&self) -> &str {
        "stdio"
    }

    async fn start(&self) -> Result<mpsc::Receiver<InboundMessage>, ArgusError> {
        let (tx, rx) = mpsc::channel(64);

        info!("stdio transport reading messages: <sender> <body>");
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let Some(msg) = Self::parse_line(&line) else {
                            debug!("stdio: dropping unparseable line");
                            continue;
                        };
                        if tx.send(msg).await.is_err() {
                            info!("stdio receiver dropped, stopping reader");
                            return;
                        }
                    }
                    Ok(None) => {
                        info!("stdin closed, stdio transport done");
                        return;
                    }
                    Err(e) => {
                        info!("stdin read error, stopping: {e}");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, to: &str, body: &str) -> Result<(), ArgusError> {
        println!("-> {to}: {body}");
        Ok(())
    }

    async fn fetch_roster(&self) -> Result<Vec<String>, ArgusError> {
        Ok(vec![self.jid.clone()])
    }

    async fn stop(&self) -> Result<(), ArgusError> {
        info!("stdio transport stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_sender_and_body() {
        let msg = StdioTransport::parse_line("ops@example.net [ALARM] disk full").unwrap();
        assert_eq!(msg.sender, "ops@example.net");
        assert_eq!(msg.body, "[ALARM] disk full");
        assert_eq!(msg.kind, MessageKind::Chat);
    }

    #[test]
    fn test_parse_line_rejects_bodyless_and_blank() {
        assert!(StdioTransport::parse_line("ops@example.net").is_none());
        assert!(StdioTransport::parse_line("").is_none());
        assert!(StdioTransport::parse_line("ops@example.net ").is_none());
    }

    #[test]
    fn test_parse_line_strips_trailing_newline() {
        let msg = StdioTransport::parse_line("ops hello\r\n").unwrap();
        assert_eq!(msg.body, "hello");
    }
}
