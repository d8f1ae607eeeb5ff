//! # Partner Match CLI (`pmatch`)
//!
//! ## Usage
//!
//! ```bash
//! pmatch --config ./config/pmatch.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pmatch search [QUERY]` | Search and rank organizations |
//! | `pmatch get <id>` | Show one organization with its baseline score |
//! | `pmatch export` | Write baseline-scored organizations as JSON |
//! | `pmatch sources` | Show static and remote catalog status |
//! | `pmatch focus-areas` | Print the focus-area taxonomy |
//! | `pmatch serve` | Start the HTTP server |
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use partner_match::{config, export, get, search, server, sources};
use partner_match_core::models::{
    SearchParams, SortBy, VerificationFilter, VerificationStatus,
};
use partner_match_core::taxonomy;

/// Partner Match CLI: partnership discovery for NGOs, incubators, and CSR teams.
#[derive(Parser)]
#[command(
    name = "pmatch",
    about = "Partner Match — organization search with alignment scoring",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/pmatch.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search organizations.
    ///
    /// Every filter is optional; omitted filters impose no constraint.
    Search {
        /// Free-text filter over name, mission, description, and focus areas.
        query: Option<String>,

        /// Exact focus-area label (case-insensitive).
        #[arg(long)]
        focus_area: Option<String>,

        /// Region substring (case-insensitive).
        #[arg(long)]
        region: Option<String>,

        /// Funding type, e.g. `grant`, `mixed`, `investment`.
        #[arg(long)]
        funding_type: Option<String>,

        /// `verified`, `unverified`, or `pending`.
        #[arg(long)]
        verification_status: Option<VerificationStatus>,

        /// `alignment`, `recency`, `confidence`, or `name`.
        #[arg(long, default_value = "alignment")]
        sort_by: SortBy,

        /// Show the scoring breakdown for each result.
        #[arg(long)]
        explain: bool,

        /// Print the raw JSON response.
        #[arg(long)]
        json: bool,
    },

    /// Show one organization by id, scored against an empty query.
    Get {
        id: String,

        /// Print the raw JSON result.
        #[arg(long)]
        json: bool,
    },

    /// Export baseline-scored organizations as JSON.
    Export {
        /// Output file. Prints to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Include the remote set (static only by default).
        #[arg(long)]
        with_remote: bool,
    },

    /// List catalog sources and their health.
    Sources,

    /// Print the focus-area taxonomy.
    FocusAreas,

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn print_focus_areas() {
    for category in taxonomy::categories() {
        println!("{}", category.name);
        for area in category.areas {
            println!("  - {}", area);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::FocusAreas = cli.command {
        print_focus_areas();
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Search {
            query,
            focus_area,
            region,
            funding_type,
            verification_status,
            sort_by,
            explain,
            json,
        } => {
            let params = SearchParams {
                query: non_empty(query),
                focus_area: non_empty(focus_area),
                region: non_empty(region),
                funding_type: non_empty(funding_type),
                verification_status: verification_status.map(VerificationFilter::from),
                sort_by,
                explain,
            };
            search::run_search(&cfg, params, json).await?;
        }
        Commands::Get { id, json } => {
            get::run_get(&cfg, &id, json).await?;
        }
        Commands::Export {
            output,
            with_remote,
        } => {
            export::run_export(&cfg, output.as_deref(), with_remote).await?;
        }
        Commands::Sources => {
            sources::list_sources(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::FocusAreas => unreachable!(),
    }

    Ok(())
}
