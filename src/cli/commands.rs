use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "krushi", about = "Pune APMC market rates with trend predictions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print current predicted rates as JSON
    Rates {
        #[command(subcommand)]
        action: Option<RatesAction>,
        /// Live page only: no cache, no mock fallback
        #[arg(long)]
        live: bool,
        /// Print the built-in mock dataset instead of fetching
        #[arg(long, conflicts_with = "live")]
        mock: bool,
    },
    /// Run the HTTP API
    Serve {
        /// Bind address (overrides KRUSHI_BIND)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Parse a saved rate page and print its rows
    Parse {
        /// HTML file
        file: PathBuf,
        /// Column layout (serial, plain); overrides APMC_COLUMN_LAYOUT
        #[arg(long)]
        layout: Option<String>,
    },
    /// Resolve a commodity name into both languages
    Resolve {
        label: String,
        /// Language of the label (marathi, english)
        #[arg(long, default_value = "marathi")]
        from: String,
    },
    /// Print cached rates still inside the freshness horizon
    Cached,
}

#[derive(Subcommand)]
pub enum RatesAction {
    /// Store a rate by hand
    Add {
        /// JSON with commodity, commodityMarathi, arrival, min, max, modal, date, prediction, previousModal
        json: String,
    },
    /// Edit fields of a stored rate
    Update {
        /// Rate ID
        id: String,
        /// JSON with the fields to change
        json: String,
    },
}
