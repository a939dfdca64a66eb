use crate::{error::ArgusError, message::InboundMessage};
use async_trait::async_trait;

/// Messaging transport trait — the seam between the relay and the
/// federated messaging network.
///
/// Session establishment, authentication, and the wire protocol are the
/// implementation's concern; the relay only consumes this interface.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Human-readable transport name.
    fn name(&self) -> &str;

    /// Start receiving messages.
    /// Returns a receiver that yields inbound messages in arrival order.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<InboundMessage>, ArgusError>;

    /// Send a message to the given address.
    async fn send(&self, to: &str, body: &str) -> Result<(), ArgusError>;

    /// Announce availability to the network.
    async fn send_presence(&self) -> Result<(), ArgusError> {
        Ok(())
    }

    /// Fetch the roster of known contacts.
    async fn fetch_roster(&self) -> Result<Vec<String>, ArgusError> {
        Ok(Vec::new())
    }

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), ArgusError>;
}
