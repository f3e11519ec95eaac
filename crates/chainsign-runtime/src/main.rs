//! # ChainSign
//!
//! Entry point for the `chainsign` command.
//!
//! ## Startup Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration from `CS_*` variables, then apply flag overrides
//! 3. Initialize telemetry
//! 4. Run the subcommand; `watch` runs until Ctrl+C

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use chainsign_runtime::cli::{encode_lines, selector_line, type_lines, Cli, Command};
use chainsign_runtime::{log_event, ChainSignRuntime, RuntimeConfig};
use cs_05_signer_sequence::StaticCatalog;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.rpc_url {
        config.gateway.rpc_url = url;
    }
    if let Some(contract) = cli.contract {
        config.gateway.contract_address = contract;
    }

    match cli.command {
        Command::Encode(args) => {
            for line in encode_lines(&args).context("Failed to encode submission")? {
                println!("{}", line);
            }
        }
        Command::Selector { name } => println!("{}", selector_line(&name)),
        Command::Types => {
            for line in type_lines(&StaticCatalog::standard()) {
                println!("{}", line);
            }
        }
        Command::Watch {
            interval,
            from_block,
        } => {
            if let Some(secs) = interval {
                config.reconciler.poll_interval_secs = secs;
            }
            if from_block.is_some() {
                config.reconciler.start_block = from_block;
            }
            config.validate().context("Invalid configuration")?;

            let _telemetry = cs_telemetry::init_telemetry(config.telemetry.clone())
                .context("Failed to initialize telemetry")?;
            watch(&config).await?;
        }
    }

    Ok(())
}

async fn watch(config: &RuntimeConfig) -> Result<()> {
    let runtime = Arc::new(ChainSignRuntime::connect(config)?);

    let signal_runtime = Arc::clone(&runtime);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("[chainsign] Ctrl+C received"),
            Err(e) => error!("[chainsign] Failed to listen for Ctrl+C: {}", e),
        }
        signal_runtime.shutdown();
    });

    info!("[chainsign] Press Ctrl+C to stop.");
    runtime.watch(log_event).await?;

    if let Ok(metrics) = cs_telemetry::gather_metrics() {
        tracing::debug!("[chainsign] Final metrics:\n{}", metrics);
    }
    Ok(())
}
