mod session;

use anyhow::Context;
use argus_channels::StdioTransport;
use argus_core::config;
use argus_exec::CommandExecutor;
use argus_sinks::{CallWindow, DesktopNotifier, PhoneDialer};
use clap::{Parser, Subcommand};
use session::SessionController;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "argus",
    version,
    about = "Argus — chat-triggered alerting and remote-command relay"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the connection config file.
    #[arg(short, long, default_value = "xmpp.json")]
    config: String,

    /// Path to the keyword table.
    #[arg(long, default_value = "keywords.json")]
    keywords: String,

    /// Path to the privilege table.
    #[arg(long, default_value = "superusers.json")]
    superusers: String,

    /// Directory prepended to the command search path for executed
    /// commands.
    #[arg(long, default_value = "bin")]
    bin_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay session.
    Run,
    /// Validate the config, keyword, and privilege files.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Run => {
            let mut cfg = config::load_connection(Path::new(&cli.config))?;

            // Interactive password prompt when the config omits it and a
            // terminal is attached (a piped stdin is the message stream).
            if cfg.password.is_none() && std::io::stdin().is_terminal() {
                let password = rpassword::prompt_password("Password: ")
                    .context("failed to read password")?;
                cfg.password = Some(password);
            }

            let window = CallWindow::new(cfg.call_start_hour, cfg.call_end_hour);
            let notifier = Arc::new(DesktopNotifier::new(&cfg.notify_command, &cfg.display));
            let dialer = Arc::new(PhoneDialer::new(
                &cfg.call_command,
                &cfg.display,
                window,
                cfg.country_prefix.clone(),
            ));

            info!(
                "session for {} via {}:{}",
                cfg.full_jid(),
                cfg.host,
                cfg.port
            );
            let transport = Arc::new(StdioTransport::new(cfg.full_jid()));

            let controller = SessionController::new(
                transport,
                notifier,
                dialer,
                CommandExecutor::new(cli.bin_dir),
                PathBuf::from(cli.keywords),
                PathBuf::from(cli.superusers),
            );
            controller.run().await?;
        }
        Commands::Check => {
            let cfg = config::load_connection(Path::new(&cli.config))?;
            println!("config: {} ({})", cli.config, cfg.full_jid());
            println!(
                "  call window: {}",
                match (cfg.call_start_hour, cfg.call_end_hour) {
                    (Some(s), Some(e)) => format!("{s:02}:00-{e:02}:00"),
                    _ => "none (calls always allowed)".to_string(),
                }
            );

            let keywords = config::load_keywords(Path::new(&cli.keywords))?;
            println!("keywords: {} ({} rules)", cli.keywords, keywords.len());

            let superusers = config::load_superusers(Path::new(&cli.superusers))?;
            println!(
                "superusers: {} ({} users)",
                cli.superusers,
                superusers.len()
            );

            println!("all files OK");
        }
    }

    Ok(())
}
