// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NOVA Ledger Node
//!
//! Entry point for the `nova-ledger-node` binary. Parses CLI arguments,
//! initializes logging and metrics, constructs the settlement token ledger,
//! and serves the HTTP/WebSocket API.
//!
//! The binary supports three subcommands:
//!
//! - `run`     — serve the ledger API and metrics endpoints
//! - `demo`    — run a scripted operation sequence and print the event log
//! - `version` — print build version information

mod api;
mod cli;
mod logging;
mod metrics;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::{broadcast, RwLock};

use nova_ledger::{Address, Ledger, LedgerConfig, MemoryRegistry, NoFlows};

use cli::{Commands, LedgerNodeCli, LogFormatArg, RunArgs};
use metrics::LedgerMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = LedgerNodeCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Demo => run_demo(),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Builds a ledger from the run arguments over an in-memory registry.
fn build_ledger(args: &RunArgs, registry: Arc<MemoryRegistry>) -> Ledger {
    Ledger::new(
        LedgerConfig {
            name: args.token_name.clone(),
            symbol: args.token_symbol.clone(),
            underlying: Address::new(args.underlying.clone()),
            underlying_decimals: args.underlying_decimals,
            host: Address::new(args.host.clone()),
            ledger_identity: Address::new(args.ledger_identity.clone()),
            default_operators: args
                .default_operators
                .iter()
                .map(|op| Address::new(op.as_str()))
                .collect(),
        },
        registry,
        Arc::new(NoFlows),
    )
}

/// Serves the full node: ledger API and metrics endpoint.
async fn run_node(args: RunArgs) -> Result<()> {
    logging::init_logging(
        "nova_ledger_node=info,nova_ledger=info,tower_http=debug",
        args.log_format,
    );

    tracing::info!(
        rpc_port = args.rpc_port,
        metrics_port = args.metrics_port,
        token = %args.token_name,
        symbol = %args.token_symbol,
        host = %args.host,
        "starting nova-ledger-node"
    );

    // --- Ledger over the in-memory registry collaborator ---
    let registry = Arc::new(MemoryRegistry::new());
    let ledger = build_ledger(&args, registry);
    let ledger = Arc::new(RwLock::new(ledger));

    // --- Metrics ---
    let node_metrics = Arc::new(LedgerMetrics::new());

    // --- Event broadcast ---
    let (event_tx, _) = broadcast::channel(api::EVENT_CHANNEL_CAPACITY);

    // --- Application state ---
    let app_state = api::AppState {
        version: format!(
            "{} (ledger {})",
            env!("CARGO_PKG_VERSION"),
            nova_ledger::config::LEDGER_VERSION,
        ),
        ledger,
        metrics: Arc::clone(&node_metrics),
        event_tx,
    };

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("0.0.0.0:{}", args.rpc_port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind RPC listener on {}", api_addr))?;
    tracing::info!("ledger API listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&node_metrics));
    let metrics_addr = format!("0.0.0.0:{}", args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("metrics listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    tracing::info!("nova-ledger-node stopped");
    Ok(())
}

/// Runs a scripted sequence against an in-memory ledger and prints the
/// resulting event log to stdout.
fn run_demo() -> Result<()> {
    logging::init_logging("nova_ledger_node=info", LogFormatArg::Pretty);

    let host = Address::new("nova1host");
    let alice = Address::new("nova1alice");
    let bob = Address::new("nova1bob");
    let operator = Address::new("nova1operator");

    let registry = Arc::new(MemoryRegistry::new());
    let mut ledger = Ledger::new(
        LedgerConfig {
            name: "NOVA Dollar".into(),
            symbol: "nUSDx".into(),
            underlying: Address::new("erc:usd"),
            underlying_decimals: 6,
            host: host.clone(),
            ledger_identity: Address::new("nova1ledger"),
            default_operators: vec![operator.clone()],
        },
        registry,
        Arc::new(NoFlows),
    );

    ledger
        .operation_mint(&host, &alice, 1_000, false, vec![], vec![])
        .context("mint failed")?;
    ledger.transfer(&alice, &bob, 250).context("transfer failed")?;
    ledger
        .approve(&alice, &bob, 100)
        .context("approve failed")?;
    ledger
        .transfer_from(&bob, &alice, &bob, 60)
        .context("transferFrom failed")?;
    ledger
        .send(&bob, &alice, 10, b"refund".to_vec())
        .context("send failed")?;
    ledger
        .operator_send(&operator, &alice, &bob, 5, vec![], b"sweep".to_vec())
        .context("operator send failed")?;
    ledger.burn(&bob, 25, vec![]).context("burn failed")?;

    println!("Final state:");
    println!("  alice        : {}", ledger.balance_of(&alice));
    println!("  bob          : {}", ledger.balance_of(&bob));
    println!("  total supply : {}", ledger.total_supply());
    println!();
    println!("Event log:");
    for record in ledger.events() {
        println!("  #{:03} {}", record.seq, serde_json::to_string(&record.event)?);
    }

    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("nova-ledger-node {}", env!("CARGO_PKG_VERSION"));
    println!("ledger          {}", nova_ledger::config::LEDGER_VERSION);
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
