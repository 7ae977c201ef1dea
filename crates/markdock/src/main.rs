//! MarkDock headless host: entry point.
//!
//! Stands in for the desktop shell.  It wires the [`AppState`], runs the
//! startup hook, and drives the same commands the widget's front-end calls.
//!
//! # Usage
//!
//! ```text
//! markdock [OPTIONS] <COMMAND>
//!
//! Commands:
//!   settings       Print the stored settings
//!   save-settings  Save the displayed symbol and theme
//!   set-api-key    Save the news API key
//!   news           Fetch the news feed once and print it
//!   run            Keep the dock alive and refresh news periodically
//!
//! Options:
//!   --config-file <PATH>     Settings file instead of the platform directory
//!   --news-endpoint <URL>    News API base URL
//!   --persist-on-shutdown    Save default symbol/theme when stopping
//! ```
//!
//! # Environment variables
//!
//! | Variable               | Description                                |
//! |------------------------|--------------------------------------------|
//! | `CURRENTS_API_KEY`     | News API key, takes precedence over file   |
//! | `MARKDOCK_CONFIG_FILE` | Same as `--config-file`                    |
//! | `RUST_LOG`             | Log filter, default `info`                 |
//!
//! # Architecture overview
//!
//! ```text
//! main()
//!  └─ AppState::new()         -- settings store, reqwest transport, clock
//!  └─ on_start()              -- resolves the API key
//!  └─ drain host events       -- startup events are logged before any output
//!  └─ host event pump         -- later events, awaited before exit
//!  └─ command                 -- ui_bridge::{load_settings, fetch_news, ...}
//!  └─ on_stop()               -- `run` only
//! ```
//!
//! One-shot commands never run the shutdown hook, so
//! `--persist-on-shutdown` only takes effect when a `run` session ends.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

use markdock::application::lifecycle::HostEvent;
use markdock::domain::{
    ConfigLocation, DockOptions, ShutdownBehavior, CREDENTIAL_ENV_VAR, DEFAULT_NEWS_ENDPOINT,
};
use markdock::infrastructure::notifier::ChannelNotifier;
use markdock::infrastructure::ui_bridge::{self, feed, AppState};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// MarkDock dock widget backend.
#[derive(Debug, Parser)]
#[command(
    name = "markdock",
    about = "Ticker dock backend: settings and cached business news",
    version
)]
struct Cli {
    /// Settings file to use instead of `<config dir>/MarkDock/config.json`.
    #[arg(long, global = true, env = "MARKDOCK_CONFIG_FILE")]
    config_file: Option<PathBuf>,

    /// News API key.  Takes precedence over the key stored in the settings file.
    #[arg(long, global = true, env = CREDENTIAL_ENV_VAR, hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the latest-news endpoint.
    #[arg(long, global = true, default_value = DEFAULT_NEWS_ENDPOINT)]
    news_endpoint: String,

    /// Save the default symbol and theme when a `run` session stops.
    #[arg(long, global = true)]
    persist_on_shutdown: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the stored settings.
    Settings,
    /// Save the displayed symbol and theme.
    SaveSettings {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        theme: String,
    },
    /// Save the news API key.
    SetApiKey { key: String },
    /// Fetch the news feed once.
    News {
        /// Print the response body instead of headlines.
        #[arg(long)]
        raw: bool,
    },
    /// Keep the dock alive, refreshing news until Ctrl-C.
    Run {
        /// Seconds between refreshes; refreshes inside the cache window are
        /// served from memory.
        #[arg(long, default_value_t = 300)]
        refresh_secs: u64,
    },
}

impl Command {
    /// `true` for the long-running session, the only command followed by the
    /// shutdown hook.
    fn is_session(&self) -> bool {
        matches!(self, Command::Run { .. })
    }
}

impl Cli {
    /// Converts the global arguments into [`DockOptions`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--news-endpoint` is not a valid URL.
    fn dock_options(&self) -> anyhow::Result<DockOptions> {
        let news_endpoint = Url::parse(&self.news_endpoint)
            .with_context(|| format!("invalid news endpoint: '{}'", self.news_endpoint))?;

        Ok(DockOptions {
            config_location: match &self.config_file {
                Some(path) => ConfigLocation::File(path.clone()),
                None => ConfigLocation::PlatformDirectory,
            },
            news_endpoint,
            shutdown: if self.persist_on_shutdown {
                ShutdownBehavior::PersistDefaults
            } else {
                ShutdownBehavior::Nothing
            },
            ..DockOptions::default()
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.dock_options()?;

    let (notifier, mut events) = ChannelNotifier::new();
    let state = AppState::new(options, Arc::new(notifier));

    state.on_start(cli.api_key.as_deref()).await;
    drain_host_events(&mut events);

    // ── Host event pump ──────────────────────────────────────────────────────
    let pump = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            report_host_event(event);
        }
    });

    let session = cli.command.is_session();
    let outcome = run_command(Arc::clone(&state), cli.command).await;
    if session {
        state.on_stop();
    }

    // Dropping the last AppState closes the channel and ends the pump.
    drop(state);
    if let Err(e) = pump.await {
        warn!("host event pump ended abnormally: {e}");
    }
    outcome
}

/// Logs every event already queued, returning how many there were.
fn drain_host_events(events: &mut UnboundedReceiver<HostEvent>) -> usize {
    let mut count = 0;
    while let Ok(event) = events.try_recv() {
        report_host_event(event);
        count += 1;
    }
    count
}

fn report_host_event(event: HostEvent) {
    match event {
        HostEvent::CredentialRequired => warn!(
            event = event.name(),
            "no news API key; run `markdock set-api-key <KEY>` or set {CREDENTIAL_ENV_VAR}"
        ),
    }
}

async fn run_command(state: Arc<AppState>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Settings => {
            let result = ui_bridge::load_settings(state).await;
            if let Some(dto) = result.data {
                println!("symbol:  {}", dto.symbol);
                println!("theme:   {}", dto.theme);
                println!(
                    "api key: {}",
                    if dto.has_api_key { "stored" } else { "not stored" }
                );
            }
            Ok(())
        }
        Command::SaveSettings { symbol, theme } => {
            report(ui_bridge::save_settings(state, symbol, theme).await)
        }
        Command::SetApiKey { key } => report(ui_bridge::save_api_key(state, key).await),
        Command::News { raw } => {
            let result = ui_bridge::fetch_news(state).await;
            match (result.data, result.error) {
                (Some(body), _) if raw => println!("{body}"),
                (Some(body), _) => print_headlines(&body),
                (None, err) => bail!(err.unwrap_or_else(|| "unknown error".to_string())),
            }
            Ok(())
        }
        Command::Run { refresh_secs } => run_dock(state, Duration::from_secs(refresh_secs)).await,
    }
}

fn report(result: ui_bridge::CommandResult<String>) -> anyhow::Result<()> {
    match (result.data, result.error) {
        (Some(msg), _) => {
            println!("{msg}");
            Ok(())
        }
        (None, err) => bail!(err.unwrap_or_else(|| "unknown error".to_string())),
    }
}

fn print_headlines(body: &str) {
    match feed::parse_articles(body) {
        Ok(articles) => {
            println!("{} articles", articles.len());
            for article in &articles {
                println!("- {} ({})", article.title, article.byline());
                if !article.url.is_empty() {
                    println!("  {}", article.url);
                }
            }
        }
        Err(e) => {
            warn!("news body is not a recognised feed: {e}");
            println!("0 articles");
        }
    }
}

/// Refreshes news on an interval until Ctrl-C.
async fn run_dock(state: Arc<AppState>, every: Duration) -> anyhow::Result<()> {
    if every.is_zero() {
        bail!("--refresh-secs must be greater than zero");
    }

    info!("MarkDock ready.  Press Ctrl-C to exit.");
    let mut ticker = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let result = ui_bridge::fetch_news(Arc::clone(&state)).await;
                match result.data {
                    Some(body) => {
                        let count = feed::parse_articles(&body).map(|a| a.len()).unwrap_or(0);
                        let age = ui_bridge::get_cached_news_age(Arc::clone(&state))
                            .await
                            .data
                            .unwrap_or(-1);
                        info!(articles = count, age_minutes = age, "news available");
                    }
                    None => error!(
                        "news refresh failed: {}",
                        result.error.unwrap_or_default()
                    ),
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                info!("shutdown signal received");
                break;
            }
        }
    }

    info!("MarkDock stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
