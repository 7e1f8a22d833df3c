//! # po: Purchase Order Desk CLI
//!
//! Command-line front end over the totals engine, the order backend and the
//! local draft journal.
//!
//! ## Module Organization
//! ```text
//! po-cli/src/
//! ├── main.rs         ◄─── You are here (arguments, tracing, dispatch)
//! ├── context.rs      ◄─── Config + store + journal wiring
//! ├── render.rs       ◄─── Plain-text tables for the terminal
//! └── commands/
//!     ├── mod.rs      ◄─── Draft file loading, notification output
//!     ├── orders.rs   ◄─── totals, list, show, save, delete
//!     ├── documents.rs◄─── print, export
//!     └── drafts.rs   ◄─── local journal
//! ```
//!
//! ## Output Streams
//! Results go to stdout; logs and notifications go to stderr, so
//! `po show PO/1 --json | jq` stays clean.

mod commands;
mod context;
mod render;

use anyhow::Result;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use context::AppContext;

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "po",
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Config file (default: po.toml in the platform config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Order backend base URL; overrides config and PO_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Debug logging (RUST_LOG still wins when set).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the totals of a draft file (backend JSON shape, `-` for stdin).
    Totals {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// List stored orders.
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show one stored order with recomputed totals.
    Show {
        po_no: String,
        #[arg(long)]
        json: bool,
    },

    /// Create an order from a draft file, or update one with --update.
    Save {
        file: PathBuf,
        /// PO number of the stored order to replace.
        #[arg(long, value_name = "PO_NO")]
        update: Option<String>,
    },

    /// Delete a stored order.
    Delete {
        po_no: String,
        /// Confirm the deletion; nothing is sent without it.
        #[arg(long)]
        yes: bool,
    },

    /// Render a printable HTML purchase order.
    Print(PrintArgs),

    /// Export a stored order as CSV.
    Export {
        po_no: String,
        /// Directory to write into (default: current directory).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Inspect the local journal of drafts that failed to save.
    Drafts {
        #[command(subcommand)]
        command: Option<DraftsCommand>,
    },
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true)))]
pub struct PrintArgs {
    /// Draft file to print.
    #[arg(group = "source")]
    pub file: Option<PathBuf>,

    /// Stored order to print.
    #[arg(long = "po", value_name = "PO_NO", group = "source")]
    pub po_no: Option<String>,

    /// Output file (default: stdout).
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum DraftsCommand {
    /// List journaled drafts, most recent first.
    List,

    /// Print one journaled draft as backend JSON.
    Show { key: String },

    /// Remove a journaled draft.
    Discard { key: String },
}

// =============================================================================
// Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    debug!(command = ?cli.command, "Starting");

    let ctx = AppContext::load(cli.config.clone(), cli.api_url.clone())?;
    commands::run(&ctx, cli.command).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=po=trace` - Show trace for po crates only
/// - Default: `info,po=debug,sqlx=warn`; `-v` raises everything to debug
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug,sqlx=warn"
    } else {
        "info,po=debug,sqlx=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "po",
            "list",
            "--api-url",
            "http://erp.local:8000",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://erp.local:8000"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::List { json: false }));
    }

    #[test]
    fn test_save_update_flag() {
        let cli = Cli::try_parse_from(["po", "save", "order.json", "--update", "PO/1"]).unwrap();
        match cli.command {
            Command::Save { file, update } => {
                assert_eq!(file, PathBuf::from("order.json"));
                assert_eq!(update.as_deref(), Some("PO/1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_print_needs_a_source() {
        assert!(Cli::try_parse_from(["po", "print"]).is_err());
        assert!(Cli::try_parse_from(["po", "print", "order.json", "--po", "PO/1"]).is_err());
        assert!(Cli::try_parse_from(["po", "print", "--po", "PO/1"]).is_ok());
    }

    #[test]
    fn test_drafts_defaults_to_list() {
        let cli = Cli::try_parse_from(["po", "drafts"]).unwrap();
        assert!(matches!(cli.command, Command::Drafts { command: None }));
    }
}
