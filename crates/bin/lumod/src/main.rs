//! # lumod — lumo interactive controller
//!
//! Composition root that wires the parsers, state store, and lamp gateway
//! together and runs the line-at-a-time loop.
//!
//! ## Responsibilities
//! - Parse CLI args (`--dry-run`, `--config`) and the TOML/env config
//! - Initialize tracing
//! - Construct the state store (and fail fast when its directory cannot
//!   be created)
//! - Pick the gateway: the USB DALI adapter, or the virtual lamp in
//!   dry-run mode
//! - Enable the model-based parser only when a credential is configured
//! - Read stdin one line at a time and hand each line to `CommandService`
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lumo_adapter_dali_usb::DaliLampGateway;
use lumo_adapter_parser_openai::OpenAiCommandParser;
use lumo_adapter_storage_file::FileStateStore;
use lumo_adapter_virtual::VirtualLamp;
use lumo_app::ports::{CommandParser, LampGateway, StateStore};
use lumo_app::services::{CommandOutcome, CommandService};
use lumo_domain::error::LumoError;
use lumo_domain::lamp::LampState;
use tokio::io::AsyncBufReadExt;
use tracing::{error, info};

use crate::config::Config;

/// Natural-language controller for a DALI lamp.
#[derive(Debug, Parser)]
#[command(name = "lumod", version)]
struct Cli {
    /// Run without sending commands to hardware; logs intended actions only.
    #[arg(long)]
    dry_run: bool,

    /// Path to the configuration file (default: lumo.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// The configured lamp backend, selected once at startup.
enum Gateway {
    Dali(DaliLampGateway),
    DryRun(VirtualLamp),
}

impl LampGateway for Gateway {
    fn apply(&self, state: &LampState) -> impl Future<Output = Result<(), LumoError>> + Send {
        async move {
            match self {
                Self::Dali(gateway) => gateway.apply(state).await,
                Self::DryRun(lamp) => lamp.apply(state).await,
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    let store = FileStateStore::new(&config.state.path).with_context(|| {
        format!(
            "cannot prepare state directory for {}",
            config.state.path.display()
        )
    })?;
    let initial = store.load().await?;
    info!(state = %initial, "loaded last lamp state");

    let model = if config.model.is_configured() {
        let parser = OpenAiCommandParser::new(config.model.clone())
            .context("failed to initialize model parser")?;
        info!(model = %config.model.model, "model-based parser enabled");
        Some(parser)
    } else {
        info!("no API credential; using rules-based parser only");
        None
    };

    let gateway = if cli.dry_run {
        info!("dry-run mode: hardware writes disabled");
        Gateway::DryRun(VirtualLamp::new())
    } else {
        let dali = DaliLampGateway::open(&config.device).context(
            "failed to open the DALI gateway (is it plugged in? try --dry-run)",
        )?;
        Gateway::Dali(dali)
    };

    let service = CommandService::new(model, store, gateway);
    run_loop(&service).await
}

/// Read one line at a time until EOF; no single command's failure ends the
/// loop.
async fn run_loop<M, S, G>(service: &CommandService<M, S, G>) -> anyhow::Result<()>
where
    M: CommandParser,
    S: StateStore,
    G: LampGateway,
{
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            info!("input closed; exiting");
            return Ok(());
        };
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        match service.handle_line(text).await {
            Ok(CommandOutcome::Applied(state)) => println!("lamp> {state}"),
            Ok(CommandOutcome::DeviceFailed(state)) => {
                println!("lamp> saved {state}, but the lamp did not respond");
            }
            Ok(CommandOutcome::Unchanged(state)) => println!("lamp> already {state}"),
            Ok(CommandOutcome::NoOp) => println!("lamp> nothing to do"),
            Err(err) => error!(error = %err, "command failed; continuing"),
        }
    }
}

fn prompt() -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "you> ")?;
    stdout.flush()?;
    Ok(())
}
