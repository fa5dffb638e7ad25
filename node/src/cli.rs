//! # CLI Interface
//!
//! Command-line argument structure for `nova-ledger-node` using `clap`
//! derive. Three subcommands: `run` (serve the ledger API), `demo` (run a
//! scripted sequence against an in-memory ledger), and `version`.

use clap::{Parser, Subcommand, ValueEnum};

/// NOVA settlement token ledger node.
///
/// Hosts a single settlement token ledger behind an HTTP/WebSocket API,
/// with Prometheus metrics and structured logging.
#[derive(Parser, Debug)]
#[command(
    name = "nova-ledger-node",
    about = "NOVA settlement token ledger node",
    version,
    propagate_version = true
)]
pub struct LedgerNodeCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the ledger API.
    Run(RunArgs),
    /// Run a scripted demo sequence against an in-memory ledger and print
    /// the resulting event log.
    Demo,
    /// Print version information and exit.
    Version,
}

/// Log output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable, colored output. Suitable for local development.
    Pretty,
    /// Machine-parseable JSON lines. Suitable for log aggregation.
    Json,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Port for the REST/WebSocket API.
    #[arg(long, env = "NOVA_LEDGER_RPC_PORT", default_value_t = 9751)]
    pub rpc_port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "NOVA_LEDGER_METRICS_PORT", default_value_t = 9752)]
    pub metrics_port: u16,

    /// Human-readable token name.
    #[arg(long, env = "NOVA_LEDGER_TOKEN_NAME", default_value = "NOVA Dollar")]
    pub token_name: String,

    /// Ticker symbol.
    #[arg(long, env = "NOVA_LEDGER_TOKEN_SYMBOL", default_value = "nUSDx")]
    pub token_symbol: String,

    /// Informational reference to the underlying token.
    #[arg(long, env = "NOVA_LEDGER_UNDERLYING", default_value = "erc:usd")]
    pub underlying: String,

    /// The underlying token's own display decimals.
    #[arg(long, env = "NOVA_LEDGER_UNDERLYING_DECIMALS", default_value_t = 6)]
    pub underlying_decimals: u8,

    /// Address of the host collaborator allowed through the privileged gate.
    #[arg(long, env = "NOVA_LEDGER_HOST", default_value = "nova1host")]
    pub host: String,

    /// The ledger contract's own identity address.
    #[arg(long, env = "NOVA_LEDGER_IDENTITY", default_value = "nova1ledger")]
    pub ledger_identity: String,

    /// Default operators pre-authorized for every holder (repeatable or
    /// comma-separated).
    #[arg(long, env = "NOVA_LEDGER_DEFAULT_OPERATORS", value_delimiter = ',')]
    pub default_operators: Vec<String>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,
}
