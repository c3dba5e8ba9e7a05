//! CLI module for Pricewise
//!
//! Provides command-line interface parsing and handling for the pricewise binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pricewise - product research from the command line
///
/// Interprets a shopping question, gathers review and price evidence from web
/// search and asks a language model for an analysis, recommendations and a
/// comparison chart.
#[derive(Parser, Debug)]
#[command(
    name = "pricewise",
    version,
    about = "Pricewise - product research pipeline",
    long_about = "Researches a product question end to end: query interpretation, review and\n\
                  price search, analysis, recommendations and a comparison chart.\n\n\
                  Use 'init' to write a starter pricewise.toml.",
    after_help = "EXAMPLES:\n    \
                  pricewise init                                # Write pricewise.toml\n    \
                  pricewise research best budget 4K monitor     # Research a product\n    \
                  pricewise research \"standing desk\" --json     # Print the result as JSON\n    \
                  pricewise compare \"Pixel 9\" \"iPhone 16\"       # Comparison search only\n    \
                  pricewise serve --port 8080                   # Start the HTTP API"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "pricewise.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Research a product question
    ///
    /// Prints the interpreted needs, analysis, recommendations and comparison
    /// chart, then saves the full result as JSON.
    Research {
        /// The shopping question (quotes optional)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Where to write the result JSON (overrides output.results_path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result JSON to stdout instead of the formatted sections
        #[arg(long)]
        json: bool,

        /// Do not write the result file
        #[arg(long)]
        no_save: bool,
    },

    /// Search for comparisons between two products
    Compare {
        /// First product
        product_a: String,

        /// Second product
        product_b: String,

        /// Number of results (defaults to search.comparison_max_results)
        #[arg(short = 'n', long)]
        max_results: Option<usize>,
    },

    /// Start the HTTP API server
    Serve {
        /// Host address (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a starter configuration file
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing pricewise.toml
        #[arg(short, long)]
        force: bool,

        /// LLM provider to configure (gemini, openai or ollama)
        #[arg(long, default_value = "gemini")]
        provider: String,
    },

    /// Show configuration information
    Config {
        /// Only validate the configuration file
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
