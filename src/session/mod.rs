//! Session controller — the event loop connecting the transport to the
//! classification, keyword, and authorization pipelines.

pub mod authorize;
pub mod classify;
pub mod keywords;
mod pipeline;


use arc_swap::ArcSwap;
use argus_core::{
    config::{self, PrivilegeTable, RuleTable},
    error::ArgusError,
    traits::Transport,
};
use argus_exec::CommandExecutor;
use argus_sinks::{Dialer, Notifier};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Delay between successive outbound call attempts, so a keyword storm
/// does not flood the telephony sink.
const INTER_CALL_DELAY: Duration = Duration::from_secs(3);

/// Owns the transport, the sinks, the executor, and the two
/// reload-replaceable tables. Messages are processed strictly serially:
/// command execution and inter-call delays block the loop by design.
pub struct SessionController {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    dialer: Arc<dyn Dialer>,
    executor: CommandExecutor,
    /// Keyword table, swapped wholesale on reload — readers see either
    /// the old table or the new one, never a mix.
    rules: ArcSwap<RuleTable>,
    /// Privilege table, same swap guarantee.
    privileges: ArcSwap<PrivilegeTable>,
    keywords_path: PathBuf,
    superusers_path: PathBuf,
    call_delay: Duration,
}

impl SessionController {
    pub fn new(
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        dialer: Arc<dyn Dialer>,
        executor: CommandExecutor,
        keywords_path: PathBuf,
        superusers_path: PathBuf,
    ) -> Self {
        Self {
            transport,
            notifier,
            dialer,
            executor,
            rules: ArcSwap::from_pointee(RuleTable::default()),
            privileges: ArcSwap::from_pointee(PrivilegeTable::default()),
            keywords_path,
            superusers_path,
            call_delay: INTER_CALL_DELAY,
        }
    }

    /// Override the inter-call delay (tests use zero).
    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.call_delay = delay;
        self
    }

    /// Re-read the keyword and privilege files and swap both tables in.
    /// Each new table is built fully before it is published. Failure is
    /// fatal — a broken reload must surface loudly, not limp along on
    /// stale tables.
    pub fn reload(&self) -> Result<(), ArgusError> {
        let rules = config::load_keywords(&self.keywords_path)?;
        let privileges = config::load_superusers(&self.superusers_path)?;
        info!(
            "tables loaded: {} keyword rules, {} superusers",
            rules.len(),
            privileges.len()
        );
        self.rules.store(Arc::new(rules));
        self.privileges.store(Arc::new(privileges));
        Ok(())
    }

    /// Run the session: presence + roster, initial table load, then the
    /// serial message loop until stdin/transport ends or Ctrl-C.
    pub async fn run(&self) -> Result<(), ArgusError> {
        info!("getting roster ...");
        if let Err(e) = self.initialize_presence().await {
            error!("there was an error getting the roster: {e}");
            let _ = self.transport.stop().await;
            return Err(e);
        }

        self.reload()?;
        info!("initialization sequence completed, ready for service");

        let mut rx = self.transport.start().await?;

        loop {
            tokio::select! {
                maybe = rx.recv() => match maybe {
                    Some(msg) => {
                        // Only a failed reload is fatal; everything else
                        // aborts that message's processing at most.
                        if let Err(e) = self.handle_message(&msg).await {
                            let _ = self.transport.stop().await;
                            return Err(e);
                        }
                    }
                    None => {
                        info!("transport closed its message stream");
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("received shutdown signal");
                    break;
                }
            }
        }

        self.transport.stop().await?;
        Ok(())
    }

    async fn initialize_presence(&self) -> Result<(), ArgusError> {
        self.transport.send_presence().await?;
        let roster = self.transport.fetch_roster().await?;
        info!("roster: {} contacts", roster.len());
        Ok(())
    }

    /// Send a reply back to the message's full sender address.
    async fn reply(&self, to: &str, text: &str) {
        if let Err(e) = self.transport.send(to, text).await {
            error!("failed to send reply to {to}: {e}");
        }
    }
}
